//! Session-bus bring-up.

use std::sync::Arc;

use linkhub_menu::{EventSender, MenuStore};
use linkhub_protocol::constants::{ITEM_PATH, MENU_PATH, SERVICE_NAME};
use zbus::Connection;
use zbus::connection::Builder;
use zbus::fdo::{RequestNameFlags, RequestNameReply};

use crate::dbusmenu::DbusMenu;
use crate::item::{ItemConfig, StatusNotifierItem};

/// Errors from bringing up the bus objects.
#[derive(Debug, thiserror::Error)]
pub enum SniError {
    #[error("bus name {0} is already owned")]
    NameTaken(&'static str),

    #[error("D-Bus error: {0}")]
    Bus(#[from] zbus::Error),
}

/// Connects to the session bus, exports both objects, and takes sole
/// ownership of the tray's well-known name.
///
/// The store should already hold the static skeleton: the objects are
/// reachable as soon as this returns.
pub async fn serve(
    store: Arc<MenuStore>,
    events: EventSender,
    config: ItemConfig,
) -> Result<Connection, SniError> {
    let conn = export(Builder::session()?, store, events, config)?
        .build()
        .await?;

    // No queueing and no replacement: a running owner makes this fatal.
    let reply = conn
        .request_name_with_flags(SERVICE_NAME, RequestNameFlags::DoNotQueue.into())
        .await;
    name_outcome(reply)?;

    tracing::info!(service = SERVICE_NAME, "bus objects exported");
    Ok(conn)
}

/// Adds the item and menu objects to `builder`.
fn export<'a>(
    builder: Builder<'a>,
    store: Arc<MenuStore>,
    events: EventSender,
    config: ItemConfig,
) -> zbus::Result<Builder<'a>> {
    builder
        .serve_at(ITEM_PATH, StatusNotifierItem::new(config))?
        .serve_at(MENU_PATH, DbusMenu::new(store, events))
}

fn name_outcome(reply: zbus::Result<RequestNameReply>) -> Result<(), SniError> {
    match reply {
        Ok(RequestNameReply::PrimaryOwner | RequestNameReply::AlreadyOwner) => Ok(()),
        Ok(RequestNameReply::Exists | RequestNameReply::InQueue) | Err(zbus::Error::NameTaken) => {
            Err(SniError::NameTaken(SERVICE_NAME))
        }
        Err(e) => Err(SniError::Bus(e)),
    }
}

/// Serves both objects on one end of a socket pair and returns
/// `(server, client)` connections.
#[cfg(test)]
pub(crate) async fn peer_pair(
    store: Arc<MenuStore>,
    events: EventSender,
) -> (Connection, Connection) {
    let (a, b) = tokio::net::UnixStream::pair().unwrap();
    let server = export(
        Builder::unix_stream(a)
            .server(zbus::Guid::generate())
            .unwrap()
            .p2p(),
        store,
        events,
        ItemConfig::default(),
    )
    .unwrap();
    let client = Builder::unix_stream(b).p2p();

    tokio::try_join!(server.build(), client.build()).unwrap()
}
