pub const DEFAULT_DURATION_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub duration_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
        }
    }
}

/// Mutable typing progress. `written` followed by `remaining` is always the phrase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub written: String,
    pub remaining: String,
    pub elapsed_seconds: u64,
    pub mistakes: Vec<char>,
    pub error: bool,
}

impl SessionState {
    fn new(phrase: String) -> Self {
        Self {
            remaining: phrase,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinalResult {
    pub wpm: f64,
    pub mistakes: Vec<char>,
    pub words_typed: usize,
    pub elapsed_seconds: u64,
}

impl FinalResult {
    /// Words-typed tokens divided by five, per elapsed minute.
    ///
    /// This counts whitespace-separated tokens rather than characters before
    /// dividing by five, so it reads lower than the usual chars/5 figure.
    fn compute(state: &SessionState) -> Self {
        let words_typed = state.written.split_whitespace().count();
        let minutes = state.elapsed_seconds as f64 / 60.0;
        let wpm = if minutes > 0.0 {
            (words_typed as f64 / 5.0) / minutes
        } else {
            0.0
        };

        Self {
            wpm,
            mistakes: state.mistakes.clone(),
            words_typed,
            elapsed_seconds: state.elapsed_seconds,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Active,
    Ended(FinalResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeystrokeResult {
    Matched { next_expected: Option<char> },
    Mismatched { expected: char },
    /// The session already ended; the key was dropped
    Ignored,
}

/// One attempt at typing a phrase within a time limit
#[derive(Debug, Clone)]
pub struct TypingSession {
    phrase: String,
    config: SessionConfig,
    state: SessionState,
    status: Status,
}

impl TypingSession {
    pub fn new(phrase: String, config: SessionConfig) -> Self {
        let mut session = Self {
            state: SessionState::new(phrase.clone()),
            phrase,
            config,
            status: Status::Active,
        };
        session.end_if_over_before_start();
        session
    }

    pub fn on_keystroke(&mut self, c: char) -> KeystrokeResult {
        if !self.is_active() {
            return KeystrokeResult::Ignored;
        }
        let Some(expected) = self.state.remaining.chars().next() else {
            return KeystrokeResult::Ignored;
        };

        if c != expected {
            self.state.mistakes.push(c);
            self.state.error = true;
            return KeystrokeResult::Mismatched { expected };
        }

        let typed = self.state.remaining.remove(0);
        self.state.written.push(typed);
        self.state.error = false;

        let next_expected = self.expected_char();
        if next_expected.is_none() {
            tracing::debug!("phrase completed");
            self.force_end();
        }
        KeystrokeResult::Matched { next_expected }
    }

    /// Advances the clock by one second, ending the session at the time limit
    pub fn on_tick(&mut self) {
        if !self.is_active() {
            return;
        }
        self.state.elapsed_seconds += 1;
        if self.state.elapsed_seconds >= self.config.duration_secs {
            tracing::debug!(secs = self.state.elapsed_seconds, "time limit reached");
            self.force_end();
        }
    }

    /// Ends the session and returns its result. Calling it again returns the
    /// result computed the first time.
    pub fn force_end(&mut self) -> FinalResult {
        if let Status::Ended(result) = &self.status {
            return result.clone();
        }

        let result = FinalResult::compute(&self.state);
        tracing::info!(
            wpm = result.wpm,
            words = result.words_typed,
            mistakes = result.mistakes.len(),
            secs = result.elapsed_seconds,
            "session ended"
        );
        self.status = Status::Ended(result.clone());
        result
    }

    pub fn restart(&mut self, phrase: String) {
        self.state = SessionState::new(phrase.clone());
        self.phrase = phrase;
        self.status = Status::Active;
        self.end_if_over_before_start();
    }

    /// An empty phrase or a zero time limit leaves nothing to play
    fn end_if_over_before_start(&mut self) {
        if self.phrase.is_empty() || self.config.duration_secs == 0 {
            self.force_end();
        }
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn written(&self) -> &str {
        &self.state.written
    }

    pub fn remaining(&self) -> &str {
        &self.state.remaining
    }

    pub fn expected_char(&self) -> Option<char> {
        self.state.remaining.chars().next()
    }

    pub fn has_error(&self) -> bool {
        self.state.error
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.state.elapsed_seconds
    }

    pub fn seconds_left(&self) -> u64 {
        self.config
            .duration_secs
            .saturating_sub(self.state.elapsed_seconds)
    }

    pub fn mistakes(&self) -> &[char] {
        &self.state.mistakes
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, Status::Active)
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn result(&self) -> Option<&FinalResult> {
        match &self.status {
            Status::Ended(result) => Some(result),
            Status::Active => None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn session(phrase: &str) -> TypingSession {
        TypingSession::new(phrase.to_string(), SessionConfig::default())
    }

    fn type_str(session: &mut TypingSession, text: &str) {
        for c in text.chars() {
            session.on_keystroke(c);
        }
    }

    #[test]
    fn test_new_session() {
        let s = session("hello world");

        assert!(s.is_active());
        assert_eq!(s.remaining(), "hello world");
        assert_eq!(s.written(), "");
        assert_eq!(s.expected_char(), Some('h'));
        assert_eq!(s.elapsed_seconds(), 0);
        assert_eq!(s.seconds_left(), DEFAULT_DURATION_SECS);
        assert!(s.mistakes().is_empty());
        assert!(!s.has_error());
        assert!(s.result().is_none());
    }

    #[test]
    fn test_correct_keystroke_advances() {
        let mut s = session("hi");

        let res = s.on_keystroke('h');

        assert_eq!(res, KeystrokeResult::Matched { next_expected: Some('i') });
        assert_eq!(s.written(), "h");
        assert_eq!(s.remaining(), "i");
    }

    #[test]
    fn test_wrong_keystroke_records_mistake() {
        let mut s = session("hi");

        let res = s.on_keystroke('x');

        assert_eq!(res, KeystrokeResult::Mismatched { expected: 'h' });
        assert_eq!(s.written(), "");
        assert_eq!(s.remaining(), "hi");
        assert_eq!(s.mistakes(), &['x']);
        assert!(s.has_error());

        s.on_keystroke('h');
        assert!(!s.has_error());
    }

    #[test]
    fn test_full_phrase_ends_session() {
        let mut s = session("Hi there.");
        let keys = ['H', 'i', ' ', 't', 'h', 'e', 'r', 'e', '.'];

        for (i, c) in keys.iter().enumerate() {
            assert!(s.is_active(), "ended early at {i}");
            s.on_keystroke(*c);
        }

        assert_eq!(s.remaining(), "");
        assert_eq!(s.written(), "Hi there.");
        assert!(!s.is_active());
        assert!(s.mistakes().is_empty());
        assert_matches!(s.status(), Status::Ended(r) if r.mistakes.is_empty());
    }

    #[test]
    fn test_last_keystroke_reports_no_next_char() {
        let mut s = session("a");
        assert_eq!(
            s.on_keystroke('a'),
            KeystrokeResult::Matched { next_expected: None }
        );
    }

    #[test]
    fn test_mistake_then_completion() {
        let mut s = session("ab");

        type_str(&mut s, "xab");

        assert_eq!(s.mistakes(), &['x']);
        assert_eq!(s.written(), "ab");
        assert!(!s.is_active());
        assert_eq!(s.result().map(|r| r.mistakes.clone()), Some(vec!['x']));
    }

    #[test]
    fn test_duplicate_mistakes_kept_in_order() {
        let mut s = session("a");
        type_str(&mut s, "zzyz");
        assert_eq!(s.mistakes(), &['z', 'z', 'y', 'z']);
    }

    #[test]
    fn test_written_plus_remaining_is_phrase() {
        let phrase = "Some words, then more; done!";
        let mut s = session(phrase);

        for c in phrase.chars() {
            s.on_keystroke('#');
            assert_eq!(format!("{}{}", s.written(), s.remaining()), phrase);
            s.on_keystroke(c);
            if s.is_active() {
                assert_eq!(format!("{}{}", s.written(), s.remaining()), phrase);
            }
        }
        assert!(!s.is_active());
    }

    #[test]
    fn test_multibyte_characters() {
        let mut s = session("née");
        type_str(&mut s, "né");
        assert_eq!(s.written(), "né");
        assert_eq!(s.remaining(), "e");
    }

    #[test]
    fn test_keystrokes_after_end_are_ignored() {
        let mut s = session("a");
        s.on_keystroke('a');

        assert_eq!(s.on_keystroke('b'), KeystrokeResult::Ignored);
        assert!(s.mistakes().is_empty());
        assert_eq!(s.written(), "a");
    }

    #[test]
    fn test_completion_before_time_limit() {
        let phrase = "one two three four five";
        let mut s = session(phrase);
        type_str(&mut s, "one two three four fiv");
        for _ in 0..59 {
            s.on_tick();
        }
        assert!(s.is_active());

        s.on_keystroke('e');

        let result = s.result().cloned().unwrap();
        assert_eq!(result.words_typed, 5);
        assert_eq!(result.elapsed_seconds, 59);
        assert!((result.wpm - 60.0 / 59.0).abs() < 1e-9);
    }

    #[test]
    fn test_wpm_one_minute_five_words() {
        let mut s = TypingSession::new(
            "one two three four five and more".to_string(),
            SessionConfig { duration_secs: 120 },
        );
        type_str(&mut s, "one two three four five");
        for _ in 0..60 {
            s.on_tick();
        }

        let result = s.force_end();

        assert_eq!(result.words_typed, 5);
        assert_eq!(result.elapsed_seconds, 60);
        assert_eq!(result.wpm, 1.0);
    }

    #[test]
    fn test_zero_elapsed_gives_zero_wpm() {
        let mut s = session("quick test");
        type_str(&mut s, "quick");

        let result = s.force_end();

        assert_eq!(result.wpm, 0.0);
        assert_eq!(result.words_typed, 1);
    }

    #[test]
    fn test_force_end_is_idempotent() {
        let mut s = session("abc");
        type_str(&mut s, "ax");
        s.on_tick();

        let first = s.force_end();
        let second = s.force_end();

        assert_eq!(first, second);
        assert!(!s.is_active());
    }

    #[test]
    fn test_tick_reaches_limit() {
        let mut s = TypingSession::new("abc".to_string(), SessionConfig { duration_secs: 3 });

        s.on_tick();
        s.on_tick();
        assert!(s.is_active());
        assert_eq!(s.seconds_left(), 1);

        s.on_tick();
        assert!(!s.is_active());
        assert_eq!(s.result().map(|r| r.elapsed_seconds), Some(3));

        // late ticks from the scheduler are dropped
        s.on_tick();
        s.on_tick();
        assert_eq!(s.elapsed_seconds(), 3);
    }

    #[test]
    fn test_restart_resets_state() {
        let mut s = session("ab");
        type_str(&mut s, "xa");
        s.on_tick();
        s.force_end();

        s.restart("cd".to_string());

        assert!(s.is_active());
        assert_eq!(s.phrase(), "cd");
        assert_eq!(s.remaining(), "cd");
        assert_eq!(s.written(), "");
        assert_eq!(s.elapsed_seconds(), 0);
        assert!(s.mistakes().is_empty());
        assert!(!s.has_error());
        assert!(s.result().is_none());
    }

    #[test]
    fn test_zero_time_limit_ends_immediately() {
        let mut s = TypingSession::new("hello".to_string(), SessionConfig { duration_secs: 0 });

        assert!(!s.is_active());
        let result = s.result().cloned().unwrap();
        assert_eq!(result.elapsed_seconds, 0);
        assert_eq!(result.wpm, 0.0);
        assert_eq!(s.on_keystroke('h'), KeystrokeResult::Ignored);

        s.on_tick();
        assert_eq!(s.elapsed_seconds(), 0);

        s.restart("again".to_string());
        assert!(!s.is_active());
    }

    #[test]
    fn test_empty_phrase_ends_immediately() {
        let mut s = session("");

        assert!(!s.is_active());
        assert_eq!(s.on_keystroke('a'), KeystrokeResult::Ignored);
        assert_eq!(s.force_end().wpm, 0.0);
    }
}
