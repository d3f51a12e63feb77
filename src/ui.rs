use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthChar;

use crate::app::{App, AppState};
use crate::session::TypingSession;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state() {
            AppState::Typing => render_typing(&self.session, area, buf),
            AppState::Results => render_results(&self.session, area, buf),
        }
    }
}

fn render_typing(session: &TypingSession, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_bold_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM);
    let cursor_style = if session.has_error() {
        Style::default().patch(bold_style).fg(Color::White).bg(Color::Red)
    } else {
        Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::UNDERLINED)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(2), // timer
            Constraint::Length(1), // text
            Constraint::Fill(1),
        ])
        .split(area);

    let timer = Paragraph::new(Span::styled(
        format!(
            "{} Seconds ({} left)",
            session.elapsed_seconds(),
            session.seconds_left()
        ),
        dim_bold_style,
    ))
    .alignment(Alignment::Center);
    timer.render(chunks[1], buf);

    // the cursor stays in the middle: typed text scrolls off to the left,
    // upcoming text is cut at the right edge
    let text_area = chunks[2];
    let half = usize::from(text_area.width / 2);
    let written = tail_within(session.written(), half);
    let mut upcoming = session.remaining().chars();
    let expected = upcoming.next().map(String::from).unwrap_or_default();
    let rest = head_within(upcoming.as_str(), half.saturating_sub(1));

    let pad = " ".repeat(half.saturating_sub(display_width(written)));
    let line = Line::from(vec![
        Span::raw(pad),
        Span::styled(written.to_string(), dim_bold_style),
        Span::styled(expected, cursor_style),
        Span::styled(rest.to_string(), bold_style),
    ]);
    Paragraph::new(line).render(text_area, buf);
}

fn render_results(session: &TypingSession, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let (wpm, mistakes) = match session.result() {
        Some(result) => (result.wpm, result.mistakes.as_slice()),
        None => (0.0, session.mistakes()),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(2), // wpm
            Constraint::Min(2),    // mistakes
            Constraint::Fill(1),
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(Span::styled(format_wpm(wpm), bold_style))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        format_mistakes(mistakes),
        Style::default().fg(Color::Red),
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(chunks[2], buf);

    Paragraph::new(Span::styled("(r)etry / (n)ew / (esc)ape", italic_style))
        .render(chunks[4], buf);
}

pub fn format_wpm(wpm: f64) -> String {
    format!("Words per Minute: {wpm:.0}")
}

pub fn format_mistakes(mistakes: &[char]) -> String {
    format!("Mistakes: {mistakes:?}")
}

fn display_width(s: &str) -> usize {
    s.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Longest suffix of `s` that fits in `width` columns
fn tail_within(s: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, c) in s.char_indices().rev() {
        used += c.width().unwrap_or(0);
        if used > width {
            return &s[idx + c.len_utf8()..];
        }
    }
    s
}

/// Longest prefix of `s` that fits in `width` columns
fn head_within(s: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, c) in s.char_indices() {
        used += c.width().unwrap_or(0);
        if used > width {
            return &s[..idx];
        }
    }
    s
}
