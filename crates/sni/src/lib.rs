//! Session-bus surface of the OpenLinkHub tray.
//!
//! Two objects are exported:
//! - [`StatusNotifierItem`] at `/StatusNotifierItem`, the tray icon itself
//! - [`DbusMenu`] at `/Menu`, the dropdown content backed by a
//!   [`MenuStore`](linkhub_menu::MenuStore)
//!
//! Property access and introspection for both come from the declared
//! interface members. Menu changes reach the shell as `LayoutUpdated`
//! signals through the [`signal`] pump.

mod bus;
mod dbusmenu;
mod item;
pub mod signal;
mod watcher;

pub use bus::{SniError, serve};
pub use dbusmenu::{DbusMenu, LayoutItem};
pub use item::{ItemConfig, StatusNotifierItem, ToolTip};
pub use signal::LayoutSignal;
pub use watcher::register_with_watcher;
