//! Event handling for keyboard, mouse, and terminal events

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEventKind};
use tokio::sync::mpsc;

/// Application events
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Terminal key press
    Key(KeyEvent),
    /// Mouse wheel up
    ScrollUp,
    /// Mouse wheel down
    ScrollDown,
    /// Terminal resize
    Resize(u16, u16),
    /// Tick for redraws
    Tick,
    /// Bracketed paste
    Paste(String),
}

/// Event handler that polls for terminal events
#[derive(Debug)]
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

/// Consecutive poll failures before the event thread gives up
const MAX_POLL_FAILURES: u32 = 50;

impl EventHandler {
    /// Create a new event handler with the given tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        // crossterm polling blocks, so it gets its own thread
        std::thread::spawn(move || pump(&tx, tick_rate, event::poll, event::read));

        Self { rx }
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

/// Forward terminal events until the receiver goes away or polling keeps
/// failing. A failed poll waits out the tick before retrying.
fn pump(
    tx: &mpsc::UnboundedSender<AppEvent>,
    tick_rate: Duration,
    mut poll: impl FnMut(Duration) -> io::Result<bool>,
    mut read: impl FnMut() -> io::Result<Event>,
) {
    let mut failures = 0;

    loop {
        let event = match poll(tick_rate) {
            Ok(true) => {
                failures = 0;
                match read() {
                    Ok(event) => translate(event),
                    Err(e) => {
                        tracing::warn!("Failed to read terminal event: {}", e);
                        None
                    }
                }
            }
            Ok(false) => {
                failures = 0;
                Some(AppEvent::Tick)
            }
            Err(e) => {
                failures += 1;
                if failures >= MAX_POLL_FAILURES {
                    tracing::error!(failures, "Terminal polling keeps failing, stopping: {}", e);
                    return;
                }
                if failures == 1 {
                    tracing::warn!("Failed to poll terminal events: {}", e);
                }
                std::thread::sleep(tick_rate);
                None
            }
        };

        if let Some(event) = event {
            if tx.send(event).is_err() {
                return;
            }
        }
    }
}

fn translate(event: Event) -> Option<AppEvent> {
    match event {
        // Release/repeat events arrive on some platforms; only act on presses
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => Some(AppEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(AppEvent::ScrollDown),
            _ => None,
        },
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Paste(text) => Some(AppEvent::Paste(text)),
        _ => None,
    }
}
