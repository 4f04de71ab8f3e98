//! Shared types for the OpenLinkHub tray.
//!
//! - [`types`]: the JSON payload served by the backend at `/api/systray`.
//! - [`constants`]: bus names, object paths, and backend defaults.

pub mod constants;
pub mod types;

// Re-export primary types for convenience.
pub use types::{BatteryDetails, DeviceType, SystrayData, SystrayResponse};
