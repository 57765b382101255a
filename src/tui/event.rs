//! Event handling for keyboard, mouse, and terminal events

use std::time::Duration;

use arboard::Clipboard;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};
use tokio::sync::mpsc;

/// Application events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Terminal key press
    Key(KeyEvent),
    /// Left mouse button pressed, one per physical click
    Click { row: u16, col: u16 },
    /// Terminal resize
    Resize(u16, u16),
    /// Tick for notice expiry and redraws
    Tick,
    /// Bracketed paste
    Paste(String),
}

impl AppEvent {
    /// Map a raw crossterm event; `None` for events the app ignores.
    pub fn from_terminal(event: Event) -> Option<Self> {
        match event {
            // Only presses; release/repeat reports would double up on some terminals
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(AppEvent::Click {
                    row: mouse.row,
                    col: mouse.column,
                }),
                _ => None,
            },
            Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            Event::Paste(text) => Some(AppEvent::Paste(text)),
            _ => None,
        }
    }
}

/// Event handler that polls for terminal events
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        // Spawn terminal event polling thread
        std::thread::spawn(move || loop {
            let next = if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    Ok(raw) => AppEvent::from_terminal(raw),
                    Err(e) => {
                        tracing::warn!("Failed to read terminal event: {}", e);
                        None
                    }
                }
            } else {
                // Send tick on timeout
                Some(AppEvent::Tick)
            };

            if let Some(event) = next {
                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

/// Clipboard manager for paste into text inputs
pub struct ClipboardManager {
    clipboard: Option<Clipboard>,
}

impl ClipboardManager {
    pub fn new() -> Self {
        Self {
            clipboard: Clipboard::new().ok(),
        }
    }

    /// Paste text from clipboard
    pub fn paste(&mut self) -> Option<String> {
        self.clipboard.as_mut()?.get_text().ok()
    }
}

impl Default for ClipboardManager {
    fn default() -> Self {
        Self::new()
    }
}
