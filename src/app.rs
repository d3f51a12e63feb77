use crate::config::Config;
use crate::error::Result;
use crate::phrase::PhraseGenerator;
use crate::runtime::SessionEvent;
use crate::session::{KeystrokeResult, SessionConfig, TypingSession};
use crate::word_list::{WordList, DEFAULT_LIST};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use std::path::PathBuf;

/// Resolved settings for a run, after merging config file and CLI flags
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub number_of_words: usize,
    pub duration_secs: u64,
    pub words_file: Option<PathBuf>,
}

impl From<&Config> for Settings {
    fn from(cfg: &Config) -> Self {
        Self {
            number_of_words: cfg.number_of_words,
            duration_secs: cfg.number_of_secs,
            words_file: cfg.words_file.clone(),
        }
    }
}

impl Settings {
    pub fn load_words(&self) -> Result<WordList> {
        match &self.words_file {
            Some(path) => WordList::from_file(path),
            None => WordList::bundled(DEFAULT_LIST),
        }
    }

    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            duration_secs: self.duration_secs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Typing,
    Results,
}

/// What the event loop should do after an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// A fresh session started; the tick schedule should restart with it
    Restarted,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub settings: Settings,
    pub session: TypingSession,
    words: WordList,
    generator: PhraseGenerator<StdRng>,
}

impl App {
    pub fn new(settings: Settings, words: WordList, mut generator: PhraseGenerator<StdRng>) -> Self {
        let phrase = generator.generate(&words, settings.number_of_words);
        let session = TypingSession::new(phrase, settings.session_config());
        Self {
            settings,
            session,
            words,
            generator,
        }
    }

    /// Loads the configured word list and seeds the generator from entropy
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let words = settings.load_words()?;
        Ok(Self::new(settings, words, PhraseGenerator::from_entropy()))
    }

    pub fn state(&self) -> AppState {
        if self.session.is_active() {
            AppState::Typing
        } else {
            AppState::Results
        }
    }

    pub fn on_event(&mut self, event: SessionEvent) -> Flow {
        match event {
            SessionEvent::Tick => {
                self.session.on_tick();
                Flow::Continue
            }
            SessionEvent::Resize => Flow::Continue,
            SessionEvent::Key(key) => self.on_key(key),
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Esc => Flow::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Flow::Quit,
            // shortcuts like Ctrl-A are not text
            KeyCode::Char(_)
                if key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Flow::Continue
            }
            KeyCode::Char(c) if self.state() == AppState::Typing => {
                if let KeystrokeResult::Mismatched { expected } = self.session.on_keystroke(c) {
                    tracing::trace!(typed = %c, %expected, "mistake");
                }
                Flow::Continue
            }
            _ if self.state() == AppState::Results => self.on_results_key(key.code),
            _ => Flow::Continue,
        }
    }

    fn on_results_key(&mut self, code: KeyCode) -> Flow {
        match code {
            KeyCode::Char('r') | KeyCode::Left => {
                self.retry();
                Flow::Restarted
            }
            KeyCode::Char('n') | KeyCode::Right => {
                self.new_phrase();
                Flow::Restarted
            }
            _ => Flow::Continue,
        }
    }

    /// Restart with the phrase just attempted
    pub fn retry(&mut self) {
        let phrase = self.session.phrase().to_string();
        self.session.restart(phrase);
    }

    /// Restart with a freshly generated phrase
    pub fn new_phrase(&mut self) {
        let phrase = self
            .generator
            .generate(&self.words, self.settings.number_of_words);
        self.session.restart(phrase);
    }
}
