//! Menu synchronization engine for the OpenLinkHub tray.
//!
//! The dropdown menu is one flat, ordered list of rows owned by a
//! [`MenuStore`]. Identifiers below [`ids::DYNAMIC_START`] form the static
//! skeleton built once at startup; identifiers at or above it belong to the
//! [`Reconciler`], which replaces them wholesale from every backend snapshot.
//!
//! Every mutation bumps a revision counter. Readers take a [`MenuSnapshot`],
//! which pairs the tree with the revision it was read at.
//!
//! The shell talks back through [`TrayEvent`]s:
//! - activating "Open Dashboard" yields [`TrayEvent::OpenDashboard`]
//! - activating "Quit" yields [`TrayEvent::QuitRequested`]

mod menu;
mod reconcile;
mod store;
mod tray;

pub use menu::{ItemKind, ItemProps, MenuItem, PropValue, ids, populate_static, static_items};
pub use reconcile::{LayoutNotifier, Reconciler, battery_entries, battery_label, icon_for};
pub use store::{MenuSnapshot, MenuStore};
pub use tray::{EventSender, TrayEvent, TrayHandle};
