use std::collections::VecDeque;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, MouseEvent};

pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Tick,
    Resize(u16, u16),
}

/// Anything that can feed the application loop.
pub trait EventSource {
    /// Block until the next event. `None` once the source is exhausted.
    fn next_event(&mut self) -> anyhow::Result<Option<AppEvent>>;
}

/// Terminal input read on a background thread. A `Tick` is sent whenever no
/// input arrives within the tick rate.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    _tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let _tx = tx.clone();

        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    let app_event = match event::read() {
                        Ok(Event::Key(key)) => AppEvent::Key(key),
                        Ok(Event::Mouse(mouse)) => AppEvent::Mouse(mouse),
                        Ok(Event::Resize(w, h)) => AppEvent::Resize(w, h),
                        Ok(_) => continue,
                        Err(e) => {
                            log::error!("terminal read failed: {e}");
                            return;
                        }
                    };
                    if tx.send(app_event).is_err() {
                        return;
                    }
                } else if tx.send(AppEvent::Tick).is_err() {
                    return;
                }
            }
        });

        Self { rx, _tx }
    }
}

impl EventSource for EventHandler {
    fn next_event(&mut self) -> anyhow::Result<Option<AppEvent>> {
        Ok(Some(self.rx.recv()?))
    }
}

/// A fixed list of events, for driving the loop without a terminal.
#[derive(Default)]
pub struct ScriptedEvents {
    events: VecDeque<AppEvent>,
}

impl ScriptedEvents {
    pub fn new(events: impl IntoIterator<Item = AppEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self) -> anyhow::Result<Option<AppEvent>> {
        Ok(self.events.pop_front())
    }
}
