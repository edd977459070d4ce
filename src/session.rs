use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::metrics;
use crate::theme;
use crate::word_generator::WordGenerator;

/// Most recent WPM samples kept for the history graph
pub const MAX_WPM_SAMPLES: usize = 15;

/// Minimum gap between two WPM samples
pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(1000);

/// Everything known about the current typing attempt
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub target_text: String,
    pub typed_input: String,
    pub start_time: Option<Instant>,
    pub end_time: Option<Instant>,
    pub is_finished: bool,
    pub current_time: Instant,
    pub last_sample_time: Option<Instant>,
    pub wpm_samples: VecDeque<u32>,
    pub theme_index: usize,
}

impl SessionState {
    pub fn new(target_text: String, now: Instant) -> Self {
        Self {
            target_text,
            typed_input: String::new(),
            start_time: None,
            end_time: None,
            is_finished: false,
            current_time: now,
            last_sample_time: None,
            wpm_samples: VecDeque::with_capacity(MAX_WPM_SAMPLES + 1),
            theme_index: 0,
        }
    }

    pub fn target_len(&self) -> usize {
        self.target_text.chars().count()
    }

    pub fn typed_len(&self) -> usize {
        self.typed_input.chars().count()
    }

    pub fn has_started(&self) -> bool {
        self.start_time.is_some()
    }

    /// Append a WPM sample, evicting the oldest past [`MAX_WPM_SAMPLES`]
    pub fn push_sample(&mut self, wpm: u32) {
        self.wpm_samples.push_back(wpm);
        while self.wpm_samples.len() > MAX_WPM_SAMPLES {
            self.wpm_samples.pop_front();
        }
    }
}

/// Owns the [`SessionState`] and applies keyboard and tick transitions.
///
/// Invalid input never errors; every handler that cannot apply simply leaves
/// the state untouched and reports `false`.
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    generator: WordGenerator,
    word_count: usize,
}

impl Session {
    pub fn new(mut generator: WordGenerator, word_count: usize, now: Instant) -> Self {
        let text = generator.generate(word_count);
        Self {
            state: SessionState::new(text, now),
            generator,
            word_count,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn is_active(&self) -> bool {
        self.state.has_started() && !self.state.is_finished
    }

    pub fn set_theme_index(&mut self, index: usize) {
        self.state.theme_index = index % theme::THEMES.len();
    }

    pub fn handle_character(&mut self, ch: char, now: Instant) -> bool {
        if self.state.is_finished || !is_printable(ch) {
            return false;
        }
        // An empty prompt can never be completed
        if self.state.typed_len() >= self.state.target_len() {
            return false;
        }

        if self.state.start_time.is_none() {
            self.state.start_time = Some(now);
            self.state.current_time = now;
            self.state.last_sample_time = Some(now);
            tracing::debug!(target_len = self.state.target_len(), "session started");
        }

        self.state.typed_input.push(ch);

        if self.state.typed_len() == self.state.target_len() {
            self.state.end_time = Some(now);
            self.state.current_time = now;
            self.state.is_finished = true;
            tracing::info!(
                wpm = metrics::wpm(&self.state),
                accuracy = metrics::accuracy(&self.state),
                elapsed = %metrics::elapsed_time(&self.state),
                "session finished"
            );
        }

        true
    }

    pub fn handle_backspace(&mut self) -> bool {
        if self.state.is_finished {
            return false;
        }
        self.state.typed_input.pop().is_some()
    }

    pub fn handle_reset(&mut self, now: Instant) -> bool {
        if !self.state.is_finished {
            return false;
        }
        let theme_index = self.state.theme_index;
        let text = self.generator.generate(self.word_count);
        self.state = SessionState::new(text, now);
        self.state.theme_index = theme_index;
        tracing::debug!("session reset");
        true
    }

    pub fn handle_theme_cycle(&mut self) {
        self.state.theme_index = theme::next_theme_index(self.state.theme_index);
        tracing::debug!(theme = theme::theme_at(self.state.theme_index).name, "theme changed");
    }

    /// Advance the clock and take a WPM sample when one is due
    pub fn tick(&mut self, now: Instant) {
        if !self.is_active() {
            return;
        }
        self.state.current_time = now;

        let due = self
            .state
            .last_sample_time
            .map_or(true, |last| now.saturating_duration_since(last) >= SAMPLE_INTERVAL);
        if !due {
            return;
        }

        let wpm = metrics::wpm(&self.state);
        if wpm > 0 {
            self.state.push_sample(wpm);
        }
        self.state.last_sample_time = Some(now);
    }
}

fn is_printable(ch: char) -> bool {
    let code = ch as u32;
    code >= 32 && code != 127
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    fn test_generator() -> WordGenerator {
        let language = Language {
            name: "test".to_string(),
            size: 2,
            words: vec!["cat".to_string(), "dog".to_string()],
        };
        WordGenerator::new(language, Some(1))
    }

    fn session_with_text(text: &str, now: Instant) -> Session {
        let mut session = Session::new(test_generator(), 2, now);
        session.state = SessionState::new(text.to_string(), now);
        session
    }

    fn type_str(session: &mut Session, s: &str, now: Instant) {
        for c in s.chars() {
            session.handle_character(c, now);
        }
    }

    #[test]
    fn test_new_session_is_idle() {
        let now = Instant::now();
        let session = Session::new(test_generator(), 2, now);
        let state = session.state();

        assert_eq!(state.target_text.split(' ').count(), 2);
        assert!(state.typed_input.is_empty());
        assert!(state.start_time.is_none());
        assert!(state.end_time.is_none());
        assert!(!state.is_finished);
        assert!(state.wpm_samples.is_empty());
        assert!(!session.is_active());
    }

    #[test]
    fn test_first_character_starts_clock() {
        let t0 = Instant::now();
        let mut session = session_with_text("cat dog", t0);
        let t1 = t0 + Duration::from_millis(250);

        assert!(session.handle_character('c', t1));

        assert_eq!(session.state().start_time, Some(t1));
        assert_eq!(session.state().typed_input, "c");
        assert!(session.is_active());

        session.handle_character('a', t1 + Duration::from_millis(100));
        assert_eq!(session.state().start_time, Some(t1));
    }

    #[test]
    fn test_incorrect_characters_are_recorded() {
        let now = Instant::now();
        let mut session = session_with_text("cat", now);

        type_str(&mut session, "cx", now);

        assert_eq!(session.state().typed_input, "cx");
    }

    #[test]
    fn test_control_characters_are_ignored() {
        let now = Instant::now();
        let mut session = session_with_text("cat", now);

        assert!(!session.handle_character('\u{1b}', now));
        assert!(!session.handle_character('\t', now));
        assert!(!session.handle_character('\u{7f}', now));

        assert!(session.state().typed_input.is_empty());
        assert!(session.state().start_time.is_none());
    }

    #[test]
    fn test_completion_finishes_session() {
        let t0 = Instant::now();
        let mut session = session_with_text("hi", t0);

        session.handle_character('h', t0);
        assert!(!session.state().is_finished);

        let t1 = t0 + Duration::from_secs(2);
        session.handle_character('i', t1);

        let state = session.state();
        assert!(state.is_finished);
        assert_eq!(state.end_time, Some(t1));
        assert_eq!(state.typed_len(), state.target_len());
        assert!(!session.is_active());
    }

    #[test]
    fn test_finished_session_rejects_input() {
        let t0 = Instant::now();
        let mut session = session_with_text("hi", t0);
        type_str(&mut session, "hi", t0);
        let before = session.state().clone();

        assert!(!session.handle_character('x', t0 + Duration::from_secs(1)));
        assert!(!session.handle_backspace());

        let after = session.state();
        assert_eq!(after.typed_input, before.typed_input);
        assert_eq!(after.start_time, before.start_time);
        assert_eq!(after.end_time, before.end_time);
    }

    #[test]
    fn test_input_never_exceeds_target() {
        let now = Instant::now();
        let mut session = session_with_text("ab", now);

        for c in "abcdef".chars() {
            session.handle_character(c, now);
            assert!(session.state().typed_len() <= session.state().target_len());
        }
        assert_eq!(session.state().typed_input, "ab");
    }

    #[test]
    fn test_empty_target_never_starts() {
        let now = Instant::now();
        let mut session = session_with_text("", now);

        assert!(!session.handle_character('a', now));
        assert!(session.state().start_time.is_none());
    }

    #[test]
    fn test_backspace_removes_last_character() {
        let now = Instant::now();
        let mut session = session_with_text("cat dog", now);
        type_str(&mut session, "cax", now);

        assert!(session.handle_backspace());
        assert_eq!(session.state().typed_input, "ca");
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let now = Instant::now();
        let mut session = session_with_text("cat", now);
        let before = session.state().clone();

        assert!(!session.handle_backspace());

        let after = session.state();
        assert_eq!(after.typed_input, before.typed_input);
        assert_eq!(after.start_time, before.start_time);
        assert_eq!(after.end_time, before.end_time);
        assert_eq!(after.wpm_samples, before.wpm_samples);
    }

    #[test]
    fn test_backspace_to_empty_keeps_clock() {
        let now = Instant::now();
        let mut session = session_with_text("cat", now);
        session.handle_character('c', now);
        session.handle_backspace();

        assert!(session.state().typed_input.is_empty());
        assert_eq!(session.state().start_time, Some(now));
    }

    #[test]
    fn test_reset_only_after_finish() {
        let t0 = Instant::now();
        let mut session = session_with_text("hi", t0);
        session.handle_character('h', t0);

        assert!(!session.handle_reset(t0));
        assert_eq!(session.state().typed_input, "h");
    }

    #[test]
    fn test_reset_clears_session_and_keeps_theme() {
        let t0 = Instant::now();
        let mut session = session_with_text("hi", t0);
        session.handle_theme_cycle();
        session.handle_character('h', t0);
        session.tick(t0 + Duration::from_millis(1500));
        session.handle_character('i', t0 + Duration::from_secs(2));
        assert!(session.state().is_finished);
        assert!(!session.state().wpm_samples.is_empty());

        let t1 = t0 + Duration::from_secs(5);
        assert!(session.handle_reset(t1));

        let state = session.state();
        assert!(!state.is_finished);
        assert!(state.typed_input.is_empty());
        assert!(state.start_time.is_none());
        assert!(state.end_time.is_none());
        assert!(state.last_sample_time.is_none());
        assert!(state.wpm_samples.is_empty());
        assert_eq!(state.current_time, t1);
        assert_eq!(state.theme_index, 1);
        assert_eq!(state.target_text.split(' ').count(), 2);
    }

    #[test]
    fn test_theme_cycle_wraps_and_leaves_typing_alone() {
        let now = Instant::now();
        let mut session = session_with_text("cat", now);
        session.handle_character('c', now);

        for _ in 0..theme::THEMES.len() {
            session.handle_theme_cycle();
        }

        assert_eq!(session.state().theme_index, 0);
        assert_eq!(session.state().typed_input, "c");
    }

    #[test]
    fn test_tick_before_start_is_noop() {
        let t0 = Instant::now();
        let mut session = session_with_text("cat", t0);

        session.tick(t0 + Duration::from_secs(5));

        assert_eq!(session.state().current_time, t0);
        assert!(session.state().wpm_samples.is_empty());
    }

    #[test]
    fn test_tick_updates_current_time() {
        let t0 = Instant::now();
        let mut session = session_with_text("cat dog", t0);
        session.handle_character('c', t0);

        let t1 = t0 + Duration::from_millis(100);
        session.tick(t1);

        assert_eq!(session.state().current_time, t1);
        assert!(session.state().wpm_samples.is_empty());
    }

    #[test]
    fn test_tick_samples_once_per_interval() {
        let t0 = Instant::now();
        let mut session = session_with_text("cat dog cat dog", t0);
        type_str(&mut session, "cat dog ", t0);

        // 100ms cadence for 2.5 seconds
        for step in 1..=25u64 {
            session.tick(t0 + Duration::from_millis(step * 100));
        }

        assert_eq!(session.state().wpm_samples.len(), 2);
    }

    #[test]
    fn test_zero_wpm_samples_are_skipped() {
        let t0 = Instant::now();
        let mut session = session_with_text("cat", t0);
        session.handle_character('x', t0);

        session.tick(t0 + Duration::from_millis(1000));

        assert!(session.state().wpm_samples.is_empty());
        assert_eq!(
            session.state().last_sample_time,
            Some(t0 + Duration::from_millis(1000))
        );
    }

    #[test]
    fn test_tick_after_finish_is_noop() {
        let t0 = Instant::now();
        let mut session = session_with_text("hi", t0);
        type_str(&mut session, "hi", t0 + Duration::from_secs(1));
        let end = session.state().current_time;

        session.tick(t0 + Duration::from_secs(10));

        assert_eq!(session.state().current_time, end);
        assert!(session.state().wpm_samples.is_empty());
    }

    #[test]
    fn test_sixteenth_sample_evicts_oldest() {
        let mut state = SessionState::new("cat".to_string(), Instant::now());
        for wpm in 1..=15 {
            state.push_sample(wpm);
        }
        assert_eq!(state.wpm_samples.len(), 15);

        state.push_sample(99);

        assert_eq!(state.wpm_samples.len(), 15);
        assert_eq!(state.wpm_samples.front(), Some(&2));
        assert_eq!(state.wpm_samples.back(), Some(&99));
    }

    #[test]
    fn test_set_theme_index_wraps() {
        let now = Instant::now();
        let mut session = session_with_text("cat", now);
        session.set_theme_index(6);
        assert_eq!(session.state().theme_index, 2);
    }
}
