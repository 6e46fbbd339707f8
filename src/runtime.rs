use std::sync::mpsc::{self, Receiver, RecvError, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Countdown cadence. One tick per second.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Unified event type consumed by the app loop
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
    Text(String),
}

/// The single channel every producer feeds: the crossterm input reader,
/// the ticker, and the text-fetch worker. The consuming loop applies one
/// event at a time, so all state updates are serialized.
pub struct EventPump {
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
}

impl EventPump {
    /// Pump with only the tick thread running; other events are pushed
    /// through [`EventPump::sender`]. Also the test entry point.
    pub fn with_tick_interval(interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        let tick_tx = tx.clone();
        thread::spawn(move || loop {
            thread::sleep(interval);
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        });

        Self { tx, rx }
    }

    /// Production pump: the ticker plus the terminal input thread.
    pub fn new(interval: Duration) -> Self {
        let pump = Self::with_tick_interval(interval);

        let input_tx = pump.tx.clone();
        thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => Some(AppEvent::Key(key)),
                Ok(CtEvent::Resize(_, _)) => Some(AppEvent::Resize),
                Ok(_) => None,
                Err(_) => break,
            };

            if let Some(evt) = evt {
                if input_tx.send(evt).is_err() {
                    break;
                }
            }
        });

        pump
    }

    /// A handle for out-of-loop producers, e.g. the fetch worker.
    pub fn sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }

    pub fn recv(&self) -> Result<AppEvent, RecvError> {
        self.rx.recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_emits_ticks() {
        let pump = EventPump::with_tick_interval(Duration::from_millis(1));

        match pump.recv().unwrap() {
            AppEvent::Tick => {}
            other => panic!("expected Tick, got {:?}", other),
        }
    }

    #[test]
    fn sender_feeds_the_same_channel() {
        let pump = EventPump::with_tick_interval(Duration::from_secs(3600));
        pump.sender()
            .send(AppEvent::Text("fetched".to_string()))
            .unwrap();

        match pump.recv().unwrap() {
            AppEvent::Text(text) => assert_eq!(text, "fetched"),
            other => panic!("expected Text, got {:?}", other),
        }
    }

    #[test]
    fn events_are_cloneable() {
        let evt = AppEvent::Text("abc".to_string());
        match (evt.clone(), evt) {
            (AppEvent::Text(a), AppEvent::Text(b)) => assert_eq!(a, b),
            _ => panic!("clone should preserve the variant"),
        }
    }
}
