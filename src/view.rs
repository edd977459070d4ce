use std::time::Duration;

use itertools::Itertools;
use unicode_width::UnicodeWidthStr;

use crate::metrics;
use crate::session::SessionState;
use crate::theme::{self, Theme};

/// Column budget for the prompt text
pub const TEXT_WIDTH: usize = 80;

/// Half period of the cursor blink while a test is running
pub const CURSOR_BLINK_INTERVAL: Duration = Duration::from_millis(400);

/// How a single prompt character should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Correct,
    Incorrect,
    Cursor,
    Pending,
}

/// Consecutive characters of one line sharing a [`CharClass`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub class: CharClass,
}

/// Read-only snapshot of a session, everything the UI needs to draw a frame
#[derive(Debug, Clone)]
pub struct ViewModel {
    pub target_text: String,
    pub classes: Vec<CharClass>,
    pub lines: Vec<Vec<Run>>,
    pub wpm: u32,
    pub accuracy: u32,
    pub elapsed: String,
    pub correct_chars: usize,
    pub incorrect_chars: usize,
    pub samples: Vec<u32>,
    pub sparkline: String,
    pub peak_wpm: u32,
    pub average_wpm: u32,
    pub consistency: u32,
    pub is_finished: bool,
    pub cursor_visible: bool,
    pub theme: &'static Theme,
}

impl ViewModel {
    pub fn from_state(state: &SessionState) -> Self {
        let classes = classify(state);
        let lines = wrap_lines(&state.target_text, TEXT_WIDTH)
            .into_iter()
            .map(|(start, line)| runs(&line, &classes[start..]))
            .collect();
        let samples: Vec<u32> = state.wpm_samples.iter().copied().collect();
        let correct_chars = metrics::correct_character_count(state);

        Self {
            target_text: state.target_text.clone(),
            classes,
            lines,
            wpm: metrics::wpm(state),
            accuracy: metrics::accuracy(state),
            elapsed: metrics::elapsed_time(state),
            correct_chars,
            incorrect_chars: metrics::incorrect_character_count(state),
            sparkline: metrics::sparkline(&samples),
            peak_wpm: metrics::peak_wpm(&samples),
            average_wpm: metrics::average_wpm(&samples),
            consistency: metrics::consistency(&samples),
            samples,
            is_finished: state.is_finished,
            cursor_visible: cursor_visible(state),
            theme: theme::theme_at(state.theme_index),
        }
    }

    pub fn cursor_position(&self) -> Option<usize> {
        self.classes.iter().position(|c| *c == CharClass::Cursor)
    }
}

/// Blink phase, derived from the session clock. Solid until the first keystroke.
pub fn cursor_visible(state: &SessionState) -> bool {
    match state.start_time {
        Some(start) if !state.is_finished => {
            let phase = state.current_time.saturating_duration_since(start).as_millis()
                / CURSOR_BLINK_INTERVAL.as_millis();
            phase % 2 == 0
        }
        _ => true,
    }
}

/// Classify every prompt character against the typed input
pub fn classify(state: &SessionState) -> Vec<CharClass> {
    let mut typed = state.typed_input.chars();
    let typed_len = state.typed_len();

    state
        .target_text
        .chars()
        .enumerate()
        .map(|(idx, expected)| match typed.next() {
            Some(c) if c == expected => CharClass::Correct,
            Some(_) => CharClass::Incorrect,
            None if idx == typed_len => CharClass::Cursor,
            None => CharClass::Pending,
        })
        .collect()
}

/// Greedy word wrap. Returns each line with the char index it starts at.
///
/// Words are never split; a single word wider than `width` gets a line of its
/// own. Lines joined with single spaces reproduce `text`.
pub fn wrap_lines(text: &str, width: usize) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut current: Option<(usize, String)> = None;
    let mut char_idx = 0;

    for word in text.split(' ') {
        let word_start = char_idx;
        char_idx += word.chars().count() + 1;

        let fits = matches!(
            &current,
            Some((_, line)) if line.width() + 1 + word.width() <= width
        );
        if fits {
            if let Some((_, line)) = current.as_mut() {
                line.push(' ');
                line.push_str(word);
            }
        } else {
            lines.extend(current.take());
            current = Some((word_start, word.to_string()));
        }
    }

    lines.extend(current);
    lines
}

fn runs(line: &str, classes: &[CharClass]) -> Vec<Run> {
    let chunks = line
        .chars()
        .zip(classes.iter().copied())
        .chunk_by(|(_, class)| *class);

    let runs = chunks
        .into_iter()
        .map(|(class, group)| Run {
            text: group.map(|(c, _)| c).collect(),
            class,
        })
        .collect();
    runs
}
