//! Menu rows and the static skeleton.

use crate::store::MenuStore;

/// Well-known menu identifiers.
pub mod ids {
    /// Root of the layout. Never stored; the tree hangs below it.
    pub const ROOT: i32 = 0;
    /// Disabled "Battery Status" caption.
    pub const BATTERY_HEADER: i32 = 1;
    /// Separator closing the header block. Battery rows are inserted after it.
    pub const HEADER_ANCHOR: i32 = 2;
    pub const FOOTER_SEPARATOR: i32 = 100;
    pub const OPEN_DASHBOARD: i32 = 101;
    pub const QUIT_SEPARATOR: i32 = 102;
    pub const QUIT: i32 = 103;
    /// First identifier of the dynamic partition.
    pub const DYNAMIC_START: i32 = 1000;

    /// Returns `true` if `id` belongs to the reconciler-owned partition.
    pub fn is_dynamic(id: i32) -> bool {
        id >= DYNAMIC_START
    }
}

/// Row kind as understood by dbusmenu hosts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ItemKind {
    #[default]
    Standard,
    Separator,
}

impl ItemKind {
    /// Value of the `type` property.
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Standard => "standard",
            ItemKind::Separator => "separator",
        }
    }
}

/// A typed property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropValue {
    Str(String),
    Bool(bool),
}

/// Properties of one menu row.
///
/// Unset optional fields are omitted from the property mapping so hosts
/// fall back to their own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemProps {
    pub label: Option<String>,
    pub icon_name: Option<String>,
    pub kind: ItemKind,
    pub enabled: Option<bool>,
}

impl ItemProps {
    /// A standard row with the given label.
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// A separator row.
    pub fn separator() -> Self {
        Self {
            kind: ItemKind::Separator,
            ..Self::default()
        }
    }

    pub fn with_icon(mut self, icon_name: impl Into<String>) -> Self {
        self.icon_name = Some(icon_name.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = Some(false);
        self
    }

    /// Materializes the property mapping, keyed by dbusmenu property name.
    pub fn properties(&self) -> Vec<(&'static str, PropValue)> {
        let mut props = vec![("type", PropValue::Str(self.kind.as_str().to_string()))];
        if let Some(label) = &self.label {
            props.push(("label", PropValue::Str(label.clone())));
        }
        if let Some(icon) = &self.icon_name {
            props.push(("icon-name", PropValue::Str(icon.clone())));
        }
        if let Some(enabled) = self.enabled {
            props.push(("enabled", PropValue::Bool(enabled)));
        }
        props
    }
}

/// One visible row: an identifier plus its properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: i32,
    pub props: ItemProps,
}

impl MenuItem {
    pub fn new(id: i32, props: ItemProps) -> Self {
        Self { id, props }
    }
}

/// The permanent rows, in display order.
pub fn static_items() -> Vec<MenuItem> {
    vec![
        MenuItem::new(
            ids::BATTERY_HEADER,
            ItemProps::labeled("Battery Status")
                .with_icon("battery-good")
                .disabled(),
        ),
        MenuItem::new(ids::HEADER_ANCHOR, ItemProps::separator()),
        MenuItem::new(ids::FOOTER_SEPARATOR, ItemProps::separator()),
        MenuItem::new(
            ids::OPEN_DASHBOARD,
            ItemProps::labeled("Open Dashboard").with_icon("applications-internet"),
        ),
        MenuItem::new(ids::QUIT_SEPARATOR, ItemProps::separator()),
        MenuItem::new(
            ids::QUIT,
            ItemProps::labeled("Quit").with_icon("application-exit"),
        ),
    ]
}

/// Inserts the static skeleton into `store` and returns the resulting revision.
pub fn populate_static(store: &MenuStore) -> u32 {
    let mut revision = store.revision();
    for item in static_items() {
        revision = store.insert_static(item.id, item.props);
    }
    revision
}
