use std::time::SystemTime;

/// Test results as shown to the user, rounded to two decimal places.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Score {
    pub wpm: f64,
    pub accuracy: f64,
}

/// Count positions where the typed text matches the reference, up to the
/// shorter of the two.
pub fn correct_chars(reference: &str, typed: &str) -> usize {
    reference
        .chars()
        .zip(typed.chars())
        .filter(|(expected, got)| expected == got)
        .count()
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn score(reference: &str, typed: &str, elapsed_mins: f64) -> Score {
    let typed = typed.trim();
    let correct = correct_chars(reference, typed);

    let wpm = if elapsed_mins > 0.0 {
        (correct as f64 / 5.0) / elapsed_mins
    } else {
        0.0
    };

    let typed_len = typed.chars().count();
    let accuracy = if typed_len > 0 {
        correct as f64 / typed_len as f64 * 100.0
    } else {
        0.0
    };

    Score {
        wpm: round2(wpm),
        accuracy: round2(accuracy),
    }
}

/// Score a session that is still running. Elapsed time is wall clock since
/// the first keystroke, floored at one second.
pub fn live_score(
    reference: &str,
    typed: &str,
    started_at: SystemTime,
    now: SystemTime,
) -> Score {
    let elapsed_secs = now
        .duration_since(started_at)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
        .max(1.0);

    score(reference, typed, elapsed_secs / 60.0)
}

/// Score a session whose countdown has expired. The full configured
/// duration counts as elapsed time.
pub fn final_score(reference: &str, typed: &str, duration_secs: u64) -> Score {
    score(reference, typed, duration_secs as f64 / 60.0)
}
