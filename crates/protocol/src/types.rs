use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Envelope returned by `GET /api/systray`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystrayResponse {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub status: i32,
    #[serde(default)]
    pub data: SystrayData,
}

/// Status snapshot carried by [`SystrayResponse`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystrayData {
    #[serde(default)]
    pub cpu_temp: String,
    #[serde(default)]
    pub gpu_temp: String,
    /// Battery-powered devices keyed by the backend's device serial.
    ///
    /// The backend emits `null` when no device reports a battery.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub battery: HashMap<String, BatteryDetails>,
}

/// Battery state of one device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatteryDetails {
    #[serde(default)]
    pub device: String,
    #[serde(default)]
    pub level: i32,
    #[serde(default)]
    pub device_type: DeviceType,
}

/// Device classifier reported by the backend.
///
/// Unknown codes are preserved so they survive a re-serialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum DeviceType {
    #[default]
    Keyboard,
    Mouse,
    Headset,
    Other(i32),
}

impl From<i32> for DeviceType {
    fn from(code: i32) -> Self {
        match code {
            0 => DeviceType::Keyboard,
            1 => DeviceType::Mouse,
            2 => DeviceType::Headset,
            other => DeviceType::Other(other),
        }
    }
}

impl From<DeviceType> for i32 {
    fn from(t: DeviceType) -> Self {
        match t {
            DeviceType::Keyboard => 0,
            DeviceType::Mouse => 1,
            DeviceType::Headset => 2,
            DeviceType::Other(code) => code,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<HashMap<String, BatteryDetails>, D::Error>
where
    D: Deserializer<'de>,
{
    let map: Option<HashMap<String, BatteryDetails>> = Option::deserialize(deserializer)?;
    Ok(map.unwrap_or_default())
}
