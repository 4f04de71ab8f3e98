//! Activation events flowing from the bus objects to the application.
//!
//! The bus side holds an [`EventSender`]; the application owns the
//! [`TrayHandle`] and awaits events on it.

use tokio::sync::mpsc;

use crate::menu::ids;

/// Events emitted when the user activates a menu row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayEvent {
    /// User clicked "Open Dashboard".
    OpenDashboard,
    /// User clicked "Quit".
    QuitRequested,
}

impl TrayEvent {
    /// Maps an activated menu identifier to its event.
    ///
    /// Only the dashboard and quit rows act; every other row, including all
    /// battery rows, maps to `None`.
    pub fn for_item(id: i32) -> Option<Self> {
        match id {
            ids::OPEN_DASHBOARD => Some(TrayEvent::OpenDashboard),
            ids::QUIT => Some(TrayEvent::QuitRequested),
            _ => None,
        }
    }
}

/// Sending half, cloned into the bus objects.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<TrayEvent>,
}

impl EventSender {
    /// Dispatches the activation of `id`. Returns the event sent, if any.
    pub fn activate(&self, id: i32) -> Option<TrayEvent> {
        let event = TrayEvent::for_item(id)?;
        if self.tx.send(event).is_err() {
            tracing::warn!(id, "tray event dropped, receiver closed");
        }
        Some(event)
    }
}

/// Receiving half, owned by the application loop.
pub struct TrayHandle {
    event_rx: mpsc::UnboundedReceiver<TrayEvent>,
}

impl TrayHandle {
    /// Creates a connected handle and sender.
    pub fn new() -> (Self, EventSender) {
        let (tx, event_rx) = mpsc::unbounded_channel();
        (Self { event_rx }, EventSender { tx })
    }

    /// Waits for the next event. `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<TrayEvent> {
        self.event_rx.recv().await
    }
}
