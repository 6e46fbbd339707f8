use std::time::SystemTime;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::runtime::AppEvent;
use crate::session::{self, Phase, Session, SessionEvent, MAX_DURATION_SECS};
use crate::ui::Theme;

/// Step size for the duration arrows, and the smallest value they reach.
/// The engine itself accepts anything down to one second.
const DURATION_STEP_SECS: u64 = 15;
const MIN_UI_DURATION_SECS: u64 = 15;

/// What the caller has to do after an event was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    Noop,
    Redraw,
    /// Spawn a paragraph fetch, then redraw (the loading screen is up).
    Fetch,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub theme: Theme,
    /// A paragraph fetch is in flight; typing input is disabled until the
    /// text arrives.
    pub loading: bool,
}

impl App {
    pub fn new(session: Session, theme: Theme, loading: bool) -> Self {
        Self {
            session,
            theme,
            loading,
        }
    }

    /// Apply one event from the pump and report the required side effect.
    pub fn handle_event(&mut self, event: AppEvent, now: SystemTime) -> Effect {
        match event {
            AppEvent::Tick => self.apply(SessionEvent::Tick, now),
            AppEvent::Resize => Effect::Redraw,
            AppEvent::Text(reference) => {
                self.loading = false;
                self.apply(
                    SessionEvent::Reset {
                        reference: Some(reference),
                    },
                    now,
                );
                Effect::Redraw
            }
            AppEvent::Key(key) => self.handle_key(key, now),
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: SystemTime) -> Effect {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => Effect::Quit,
            KeyCode::Char('c') if ctrl => Effect::Quit,
            KeyCode::Char('n') if ctrl => self.request_new_text(),
            KeyCode::Char('r') if ctrl => self.apply(SessionEvent::Reset { reference: None }, now),
            KeyCode::Char('t') if ctrl => {
                self.theme = self.theme.toggled();
                Effect::Redraw
            }
            KeyCode::Up => self.adjust_duration(DURATION_STEP_SECS as i64, now),
            KeyCode::Down => self.adjust_duration(-(DURATION_STEP_SECS as i64), now),
            KeyCode::Backspace if !self.loading => self.apply(SessionEvent::Backspace, now),
            KeyCode::Char(c) if !ctrl && !self.loading => self.handle_char(c, now),
            _ => Effect::Noop,
        }
    }

    fn handle_char(&mut self, c: char, now: SystemTime) -> Effect {
        match self.session.phase {
            Phase::Idle | Phase::Running => self.apply(SessionEvent::Keystroke(c), now),
            // The finished screen is read-only apart from its two actions
            Phase::Finished => match c {
                'r' => self.apply(SessionEvent::Reset { reference: None }, now),
                'n' => self.request_new_text(),
                _ => Effect::Noop,
            },
        }
    }

    fn adjust_duration(&mut self, step: i64, now: SystemTime) -> Effect {
        let stepped = (self.session.duration_secs as i64 + step)
            .clamp(MIN_UI_DURATION_SECS as i64, MAX_DURATION_SECS as i64);
        self.apply(SessionEvent::DurationInput(stepped.to_string()), now)
    }

    fn request_new_text(&mut self) -> Effect {
        // At most one fetch worker at a time
        if self.loading {
            return Effect::Noop;
        }
        self.loading = true;
        Effect::Fetch
    }

    /// Route an event through the session's update function; redraw only
    /// when the transition actually changed state.
    fn apply(&mut self, event: SessionEvent, now: SystemTime) -> Effect {
        let next = session::update(&self.session, &event, now);
        if next == self.session {
            return Effect::Noop;
        }
        self.session = next;
        Effect::Redraw
    }
}
