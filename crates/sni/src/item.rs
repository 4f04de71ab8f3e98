//! The `org.kde.StatusNotifierItem` object.

use linkhub_protocol::constants::MENU_PATH;
use zbus::interface;
use zbus::zvariant::{ObjectPath, OwnedObjectPath};

/// Tooltip as `(icon name, pixmaps, title, description)`.
pub type ToolTip = (String, Vec<(i32, i32, Vec<u8>)>, String, String);

/// Static properties of the tray icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemConfig {
    pub id: String,
    pub title: String,
    pub category: String,
    pub status: String,
    pub icon_name: String,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            id: "openlinkhub".into(),
            title: "OpenLinkHub".into(),
            category: "ApplicationStatus".into(),
            status: "Active".into(),
            icon_name: "system-run".into(),
        }
    }
}

/// Tray icon object. All properties are read-only; the icon is menu-only,
/// so activation requests are accepted and ignored.
#[derive(Debug, Clone, Default)]
pub struct StatusNotifierItem {
    config: ItemConfig,
}

impl StatusNotifierItem {
    pub fn new(config: ItemConfig) -> Self {
        Self { config }
    }
}

#[interface(name = "org.kde.StatusNotifierItem")]
impl StatusNotifierItem {
    fn activate(&self, _x: i32, _y: i32) {}

    fn context_menu(&self, _x: i32, _y: i32) {}

    fn secondary_activate(&self, _x: i32, _y: i32) {}

    fn scroll(&self, _delta: i32, _orientation: &str) {}

    #[zbus(property)]
    fn category(&self) -> String {
        self.config.category.clone()
    }

    #[zbus(property)]
    fn id(&self) -> String {
        self.config.id.clone()
    }

    #[zbus(property)]
    fn title(&self) -> String {
        self.config.title.clone()
    }

    #[zbus(property)]
    fn status(&self) -> String {
        self.config.status.clone()
    }

    #[zbus(property)]
    fn icon_name(&self) -> String {
        self.config.icon_name.clone()
    }

    #[zbus(property)]
    fn tool_tip(&self) -> ToolTip {
        (
            self.config.icon_name.clone(),
            Vec::new(),
            self.config.title.clone(),
            self.config.title.clone(),
        )
    }

    #[zbus(property)]
    fn menu(&self) -> OwnedObjectPath {
        ObjectPath::from_static_str_unchecked(MENU_PATH).into()
    }

    #[zbus(property)]
    fn item_is_menu(&self) -> bool {
        true
    }
}
