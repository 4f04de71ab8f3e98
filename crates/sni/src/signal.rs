//! Layout-signal pump.
//!
//! The reconciler runs outside the async bus machinery, so it hands
//! revisions to a channel; [`signal_pump`] turns each one into a
//! `LayoutUpdated` signal on the menu object.

use linkhub_menu::LayoutNotifier;
use linkhub_protocol::constants::MENU_PATH;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::error;
use zbus::Connection;
use zbus::object_server::SignalEmitter;

use crate::dbusmenu::DbusMenu;

/// [`LayoutNotifier`] feeding the signal pump.
#[derive(Debug, Clone)]
pub struct LayoutSignal {
    tx: mpsc::UnboundedSender<u32>,
}

impl LayoutSignal {
    /// Creates the notifier and the receiver to pass to [`signal_pump`].
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<u32>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl LayoutNotifier for LayoutSignal {
    fn layout_updated(&self, revision: u32) {
        if self.tx.send(revision).is_err() {
            tracing::debug!(revision, "signal pump gone, layout update dropped");
        }
    }
}

/// Emits `LayoutUpdated(revision, 0)` for every revision received.
pub async fn signal_pump(
    conn: Connection,
    mut revisions: mpsc::UnboundedReceiver<u32>,
    cancel: CancellationToken,
) {
    let emitter = match SignalEmitter::new(&conn, MENU_PATH) {
        Ok(emitter) => emitter,
        Err(e) => {
            error!("invalid menu path for signals: {e}");
            return;
        }
    };

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            revision = revisions.recv() => {
                match revision {
                    Some(revision) => {
                        if let Err(e) = DbusMenu::layout_updated(&emitter, revision, 0).await {
                            error!(revision, "failed to emit menu update: {e}");
                        }
                    }
                    None => break,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use futures_util::StreamExt;
    use linkhub_menu::{MenuStore, TrayHandle};
    use linkhub_protocol::constants::MENU_INTERFACE;
    use zbus::MessageStream;
    use zbus::message::{Message, Type};

    use super::*;
    use crate::bus::peer_pair;

    async fn next_signal(stream: &mut MessageStream) -> Message {
        let wait = async {
            while let Some(msg) = stream.next().await {
                let msg = msg.unwrap();
                if msg.message_type() == Type::Signal {
                    return msg;
                }
            }
            panic!("connection closed before a signal arrived");
        };
        tokio::time::timeout(Duration::from_secs(5), wait)
            .await
            .expect("signal should arrive")
    }

    #[tokio::test]
    async fn pump_emits_layout_updated_on_menu() {
        let (_handle, events) = TrayHandle::new();
        let (server, client) = peer_pair(Arc::new(MenuStore::new()), events).await;
        let mut stream = MessageStream::from(&client);

        let (signal, revisions) = LayoutSignal::channel();
        let cancel = CancellationToken::new();
        let pump = tokio::spawn(signal_pump(server.clone(), revisions, cancel.clone()));

        signal.layout_updated(42);
        let msg = next_signal(&mut stream).await;

        let header = msg.header();
        assert_eq!(header.path().unwrap().as_str(), MENU_PATH);
        assert_eq!(header.interface().unwrap().as_str(), MENU_INTERFACE);
        assert_eq!(header.member().unwrap().as_str(), "LayoutUpdated");
        let (revision, parent): (u32, i32) = msg.body().deserialize().unwrap();
        assert_eq!((revision, parent), (42, 0));

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(2), pump)
            .await
            .expect("should stop")
            .expect("no panic");
    }

    #[tokio::test]
    async fn pump_stops_when_notifier_drops() {
        let (_handle, events) = TrayHandle::new();
        let (server, _client) = peer_pair(Arc::new(MenuStore::new()), events).await;
        let (signal, revisions) = LayoutSignal::channel();
        drop(signal);

        tokio::time::timeout(
            Duration::from_secs(2),
            signal_pump(server, revisions, CancellationToken::new()),
        )
        .await
        .expect("should stop");
    }

    #[test]
    fn notifier_forwards_revisions() {
        let (signal, mut rx) = LayoutSignal::channel();
        signal.layout_updated(7);
        signal.layout_updated(9);

        assert_eq!(rx.try_recv().unwrap(), 7);
        assert_eq!(rx.try_recv().unwrap(), 9);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn notifier_survives_closed_pump() {
        let (signal, rx) = LayoutSignal::channel();
        drop(rx);
        signal.layout_updated(1);
    }
}
