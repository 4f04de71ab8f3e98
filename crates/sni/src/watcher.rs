//! Announcement to the desktop's StatusNotifierWatcher.

use linkhub_protocol::constants::{WATCHER_PATH, WATCHER_SERVICE};
use zbus::{Connection, proxy};

#[proxy(
    interface = "org.kde.StatusNotifierWatcher",
    default_service = "org.kde.StatusNotifierWatcher",
    default_path = "/StatusNotifierWatcher"
)]
trait StatusNotifierWatcher {
    fn register_status_notifier_item(&self, service: &str) -> zbus::Result<()>;
}

/// Registers `service` with the watcher so the shell picks up the icon.
pub async fn register_with_watcher(conn: &Connection, service: &str) -> zbus::Result<()> {
    let watcher = StatusNotifierWatcherProxy::builder(conn)
        .destination(WATCHER_SERVICE)?
        .path(WATCHER_PATH)?
        .build()
        .await?;
    watcher.register_status_notifier_item(service).await
}
