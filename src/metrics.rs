//! Pure scoring functions over a [`SessionState`] or a list of WPM samples.
//!
//! Nothing here mutates state, so these are safe to call on every render.

use std::time::Duration;

use crate::session::{SessionState, MAX_WPM_SAMPLES};

/// Characters that count as one word
pub const CHARS_PER_WORD: f64 = 5.0;

const SPARK_BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Positions where the typed character equals the target character.
///
/// This is a positional comparison: a skipped or doubled character shifts
/// every later comparison.
pub fn correct_character_count(state: &SessionState) -> usize {
    state
        .typed_input
        .chars()
        .zip(state.target_text.chars())
        .filter(|(typed, expected)| typed == expected)
        .count()
}

pub fn incorrect_character_count(state: &SessionState) -> usize {
    state.typed_len() - correct_character_count(state)
}

/// Time between the first keystroke and completion (or the latest tick)
pub fn elapsed(state: &SessionState) -> Option<Duration> {
    let start = state.start_time?;
    let end = state.end_time.unwrap_or(state.current_time);
    Some(end.saturating_duration_since(start))
}

pub fn wpm(state: &SessionState) -> u32 {
    let Some(elapsed) = elapsed(state) else {
        return 0;
    };
    let minutes = elapsed.as_secs_f64() / 60.0;
    if minutes == 0.0 {
        return 0;
    }
    let words = correct_character_count(state) as f64 / CHARS_PER_WORD;
    (words / minutes).round() as u32
}

pub fn accuracy(state: &SessionState) -> u32 {
    let typed = state.typed_len();
    if typed == 0 {
        return 100;
    }
    (100.0 * correct_character_count(state) as f64 / typed as f64).round() as u32
}

/// Elapsed seconds with one decimal, e.g. `"12.3s"`
pub fn elapsed_time(state: &SessionState) -> String {
    match elapsed(state) {
        Some(elapsed) => format!("{:.1}s", elapsed.as_secs_f64()),
        None => "0.0s".to_string(),
    }
}

pub fn mean(samples: &[u32]) -> Option<f64> {
    match samples.len() {
        0 => None,
        count => Some(samples.iter().map(|&s| s as f64).sum::<f64>() / count as f64),
    }
}

/// Population standard deviation
pub fn std_dev(samples: &[u32]) -> Option<f64> {
    let data_mean = mean(samples)?;
    let variance = samples
        .iter()
        .map(|&value| {
            let diff = data_mean - value as f64;
            diff * diff
        })
        .sum::<f64>()
        / samples.len() as f64;

    Some(variance.sqrt())
}

/// 100 minus the coefficient of variation, floored at 0
pub fn consistency(samples: &[u32]) -> u32 {
    if samples.len() < 2 {
        return 100;
    }
    let (Some(avg), Some(sd)) = (mean(samples), std_dev(samples)) else {
        return 100;
    };
    let cv = if avg == 0.0 { 0.0 } else { sd / avg * 100.0 };
    (100.0 - cv).round().max(0.0) as u32
}

pub fn peak_wpm(samples: &[u32]) -> u32 {
    samples.iter().copied().max().unwrap_or(0)
}

pub fn average_wpm(samples: &[u32]) -> u32 {
    mean(samples).map_or(0, |avg| avg.round() as u32)
}

/// One block glyph per sample, scaled against the largest sample
pub fn sparkline(samples: &[u32]) -> String {
    if samples.is_empty() {
        return SPARK_BLOCKS[0].to_string().repeat(MAX_WPM_SAMPLES);
    }
    let max = samples.iter().copied().max().unwrap_or(0).max(1) as f64;
    samples
        .iter()
        .map(|&sample| {
            let normalized = sample as f64 / max;
            let idx = ((normalized * SPARK_BLOCKS.len() as f64).floor() as usize)
                .min(SPARK_BLOCKS.len() - 1);
            SPARK_BLOCKS[idx]
        })
        .collect()
}
