//! Folds backend snapshots into the dynamic menu partition.

use std::fmt::Display;
use std::sync::Arc;

use linkhub_protocol::{BatteryDetails, DeviceType, SystrayData, SystrayResponse};

use crate::menu::{ItemProps, MenuItem, ids};
use crate::store::MenuStore;

/// Receives one notification per completed menu change.
pub trait LayoutNotifier: Send + Sync {
    fn layout_updated(&self, revision: u32);
}

impl<T: LayoutNotifier + ?Sized> LayoutNotifier for Arc<T> {
    fn layout_updated(&self, revision: u32) {
        (**self).layout_updated(revision);
    }
}

/// Icon for a device classifier.
pub fn icon_for(device_type: DeviceType) -> &'static str {
    match device_type {
        DeviceType::Keyboard => "input-keyboard",
        DeviceType::Mouse => "input-mouse",
        DeviceType::Headset => "audio-headset",
        DeviceType::Other(_) => "battery-good",
    }
}

/// Row label for a device, e.g. `[80 %] M65 RGB ULTRA`.
pub fn battery_label(details: &BatteryDetails) -> String {
    format!("[{} %] {}", details.level, details.device)
}

/// Computes the dynamic rows implied by `data`.
///
/// Devices are sorted by display name, then by backend key, and numbered
/// from [`ids::DYNAMIC_START`].
pub fn battery_entries(data: &SystrayData) -> Vec<MenuItem> {
    let mut devices: Vec<(&String, &BatteryDetails)> = data.battery.iter().collect();
    devices.sort_by(|(ka, a), (kb, b)| a.device.cmp(&b.device).then_with(|| ka.cmp(kb)));

    devices
        .into_iter()
        .zip(ids::DYNAMIC_START..)
        .map(|((_, details), id)| {
            MenuItem::new(
                id,
                ItemProps::labeled(battery_label(details)).with_icon(icon_for(details.device_type)),
            )
        })
        .collect()
}

/// Applies backend snapshots to a [`MenuStore`].
pub struct Reconciler<N> {
    store: Arc<MenuStore>,
    notifier: N,
}

impl<N: LayoutNotifier> Reconciler<N> {
    pub fn new(store: Arc<MenuStore>, notifier: N) -> Self {
        Self { store, notifier }
    }

    /// Replaces the dynamic rows with those implied by `data` and sends a
    /// single layout notification.
    ///
    /// Readers see either the previous rows or the new ones, never an empty
    /// region in between. Returns the new revision.
    pub fn apply(&self, data: &SystrayData) -> u32 {
        let entries = battery_entries(data);
        let count = entries.len();
        let revision = self.store.replace_dynamic(ids::HEADER_ANCHOR, entries);
        self.notifier.layout_updated(revision);
        tracing::debug!(revision, devices = count, "menu reconciled");
        revision
    }

    /// Applies the outcome of one poll.
    ///
    /// A failed poll leaves the menu untouched and is only logged. Returns
    /// the new revision when the menu changed.
    pub fn apply_poll<E: Display>(&self, result: Result<SystrayResponse, E>) -> Option<u32> {
        match result {
            Ok(response) => Some(self.apply(&response.data)),
            Err(e) => {
                tracing::warn!("failed to load data from backend: {e}");
                None
            }
        }
    }

    pub fn store(&self) -> &Arc<MenuStore> {
        &self.store
    }
}
