use std::time::SystemTime;

use crate::scoring::{self, Score};

pub const MAX_DURATION_SECS: u64 = 600;
pub const DEFAULT_DURATION_SECS: u64 = 60;

/// Where a session is in its life: waiting for the first keystroke, being
/// typed against the countdown, or done (input rejected until reset).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Finished,
}

/// One typing test. Never mutated in place; every event produces the next
/// value via [`update`].
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub reference: String,
    pub typed: String,
    pub duration_secs: u64,
    pub remaining_secs: u64,
    pub started_at: Option<SystemTime>,
    pub phase: Phase,
    pub score: Score,
}

impl Session {
    pub fn new(reference: String, duration_secs: u64) -> Self {
        Self {
            reference,
            typed: String::new(),
            duration_secs,
            remaining_secs: duration_secs,
            started_at: None,
            phase: Phase::Idle,
            score: Score::default(),
        }
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn has_finished(&self) -> bool {
        self.phase == Phase::Finished
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    Keystroke(char),
    Backspace,
    Tick,
    DurationInput(String),
    Reset { reference: Option<String> },
}

pub fn valid_duration(secs: u64) -> bool {
    secs > 0 && secs <= MAX_DURATION_SECS
}

/// Parse a duration entered by the user. Non-numeric input, zero, and
/// anything above [`MAX_DURATION_SECS`] are rejected.
pub fn parse_duration(raw: &str) -> Option<u64> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if valid_duration(secs) => Some(secs),
        _ => None,
    }
}

/// The single transition function: applies one event to a session and
/// returns the next session. Events that don't apply in the current phase
/// leave the session unchanged.
pub fn update(session: &Session, event: &SessionEvent, now: SystemTime) -> Session {
    match event {
        SessionEvent::Keystroke(c) => keystroke(session, *c, now),
        SessionEvent::Backspace => backspace(session, now),
        SessionEvent::Tick => tick(session),
        SessionEvent::DurationInput(raw) => duration_input(session, raw),
        SessionEvent::Reset { reference } => reset(session, reference.clone()),
    }
}

fn keystroke(session: &Session, c: char, now: SystemTime) -> Session {
    if session.phase == Phase::Finished {
        return session.clone();
    }

    let mut next = session.clone();
    let started_at = *next.started_at.get_or_insert(now);
    next.phase = Phase::Running;
    next.typed.push(c);
    next.score = scoring::live_score(&next.reference, &next.typed, started_at, now);
    next
}

fn backspace(session: &Session, now: SystemTime) -> Session {
    if session.phase != Phase::Running {
        return session.clone();
    }

    let mut next = session.clone();
    next.typed.pop();
    if let Some(started_at) = next.started_at {
        next.score = scoring::live_score(&next.reference, &next.typed, started_at, now);
    }
    next
}

fn tick(session: &Session) -> Session {
    if session.phase != Phase::Running {
        return session.clone();
    }

    let mut next = session.clone();
    next.remaining_secs = next.remaining_secs.saturating_sub(1);
    if next.remaining_secs == 0 {
        // Final scoring counts the whole configured duration as elapsed
        next.score = scoring::final_score(&next.reference, &next.typed, next.duration_secs);
        next.phase = Phase::Finished;
    }
    next
}

fn duration_input(session: &Session, raw: &str) -> Session {
    // The duration field is disabled once a run has started
    if session.phase != Phase::Idle {
        return session.clone();
    }

    match parse_duration(raw) {
        Some(secs) => Session::new(session.reference.clone(), secs),
        None => session.clone(),
    }
}

fn reset(session: &Session, reference: Option<String>) -> Session {
    Session::new(
        reference.unwrap_or_else(|| session.reference.clone()),
        session.duration_secs,
    )
}
