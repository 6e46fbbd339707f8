use std::sync::mpsc;
use std::time::{Duration, SystemTime};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use typezy::app::{App, Effect};
use typezy::runtime::{AppEvent, EventPump};
use typezy::session::{Phase, Session};
use typezy::text_provider::{spawn_fetch, TextFetchError, TextProvider};
use typezy::ui::Theme;

// Headless integration without a TTY: drives the App with synthetic events
// across the module boundaries the real event loop uses.

fn key(c: char) -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

struct CannedProvider(&'static str);

impl TextProvider for CannedProvider {
    fn fetch_text(&self) -> Result<String, TextFetchError> {
        Ok(self.0.to_string())
    }
}

#[test]
fn headless_typing_flow_completes() {
    let mut app = App::new(Session::new("hi there".to_string(), 2), Theme::Dark, false);

    for c in "hi there".chars() {
        assert_eq!(app.handle_event(key(c), SystemTime::now()), Effect::Redraw);
    }
    assert_eq!(app.session.typed, "hi there");
    assert_eq!(app.session.phase, Phase::Running);

    app.handle_event(AppEvent::Tick, SystemTime::now());
    app.handle_event(AppEvent::Tick, SystemTime::now());

    assert!(app.session.has_finished());
    // 8 correct chars over the full 2s: (8/5)/(2/60)
    assert_eq!(app.session.score.wpm, 48.0);
    assert_eq!(app.session.score.accuracy, 100.0);
}

#[test]
fn headless_timed_session_rejects_input_after_expiry() {
    let mut app = App::new(
        Session::new("hello world".to_string(), 3),
        Theme::Light,
        false,
    );
    app.handle_event(key('h'), SystemTime::now());

    for _ in 0..3 {
        app.handle_event(AppEvent::Tick, SystemTime::now());
    }
    assert!(app.session.has_finished());
    assert_eq!(app.session.remaining_secs, 0);

    let frozen = app.session.clone();
    app.handle_event(key('x'), SystemTime::now());
    assert_eq!(app.session, frozen);
}

#[test]
fn headless_fetch_flow_resets_into_a_fresh_session() {
    let mut app = App::new(Session::new(String::new(), 90), Theme::Light, true);

    // typing is disabled while the paragraph loads
    app.handle_event(key('x'), SystemTime::now());
    assert_eq!(app.session.typed, "");

    let (tx, rx) = mpsc::channel();
    spawn_fetch(CannedProvider("fresh text"), tx);
    let event = rx.recv().unwrap();

    assert_eq!(app.handle_event(event, SystemTime::now()), Effect::Redraw);
    assert!(!app.loading);
    assert_eq!(app.session.reference, "fresh text");
    assert_eq!(app.session.remaining_secs, 90);
    assert_eq!(app.session.phase, Phase::Idle);
}

#[test]
fn headless_event_pump_drives_a_timed_session() {
    let pump = EventPump::with_tick_interval(Duration::from_millis(10));
    let mut app = App::new(Session::new("hello".to_string(), 1), Theme::Dark, false);

    pump.sender().send(key('h')).unwrap();

    for _ in 0..200 {
        let event = pump.recv().unwrap();
        app.handle_event(event, SystemTime::now());
        if app.session.has_finished() {
            break;
        }
    }

    assert!(app.session.has_finished(), "countdown should expire");
    assert!(app.session.score.wpm > 0.0);
}

#[test]
fn headless_restart_after_results() {
    let mut app = App::new(Session::new("ab".to_string(), 1), Theme::Light, false);
    app.handle_event(key('a'), SystemTime::now());
    app.handle_event(AppEvent::Tick, SystemTime::now());
    assert!(app.session.has_finished());

    // 'r' on the results screen retries with the same paragraph
    app.handle_event(key('r'), SystemTime::now());
    assert_eq!(app.session.phase, Phase::Idle);
    assert_eq!(app.session.reference, "ab");

    // 'n' requests a fresh one
    app.handle_event(key('a'), SystemTime::now());
    app.handle_event(AppEvent::Tick, SystemTime::now());
    assert!(app.session.has_finished());
    assert_eq!(app.handle_event(key('n'), SystemTime::now()), Effect::Fetch);
    assert!(app.loading);
}
