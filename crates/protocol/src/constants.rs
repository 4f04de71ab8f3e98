use std::time::Duration;

/// Well-known bus name owned by the tray. Ownership must be exclusive.
pub const SERVICE_NAME: &str = "org.openlinkhub.OpenLinkHub";

/// Object path of the status notifier item.
pub const ITEM_PATH: &str = "/StatusNotifierItem";

/// Object path of the dbusmenu object.
pub const MENU_PATH: &str = "/Menu";

pub const ITEM_INTERFACE: &str = "org.kde.StatusNotifierItem";
pub const MENU_INTERFACE: &str = "com.canonical.dbusmenu";

/// Desktop-side registry that tray items announce themselves to.
pub const WATCHER_SERVICE: &str = "org.kde.StatusNotifierWatcher";
pub const WATCHER_PATH: &str = "/StatusNotifierWatcher";

/// dbusmenu protocol version advertised by the menu object.
pub const DBUSMENU_VERSION: u32 = 3;

/// Backend endpoint serving the tray snapshot.
pub const SYSTRAY_ENDPOINT: &str = "/api/systray";

pub const DEFAULT_BACKEND_IP: &str = "127.0.0.1";
pub const DEFAULT_BACKEND_PORT: u16 = 27003;

/// Timeout for a single backend poll.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Interval between backend polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(60);
