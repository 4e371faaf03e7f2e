// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Platform configuration types.

use serde::{Deserialize, Serialize};

use crate::accessory::CoveringConfig;
use crate::error::{ParseError, Result};

/// Platform identifier used in the host configuration file.
pub const DEFAULT_PLATFORM_NAME: &str = "WindowCoveringPlatform";

/// A device to expose as an accessory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceEntry {
    /// Identifier the accessory UUID is derived from.
    pub unique_id: String,
    /// Name shown in the Home app.
    pub display_name: String,
}

impl DeviceEntry {
    /// Creates a device entry.
    #[must_use]
    pub fn new(unique_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            unique_id: unique_id.into(),
            display_name: display_name.into(),
        }
    }

    /// The devices exposed when the configuration lists none.
    #[must_use]
    pub fn examples() -> Vec<Self> {
        vec![Self::new("ABCD", "Bedroom"), Self::new("EFGH", "Kitchen")]
    }
}

/// Platform block of the host configuration.
///
/// # Examples
///
/// ```
/// use blinds_lib::platform::PlatformConfig;
///
/// let config = PlatformConfig::from_json(
///     r#"{
///         "platform": "WindowCoveringPlatform",
///         "name": "Blinds",
///         "devices": [{ "uniqueId": "LR-1", "displayName": "Living Room" }],
///         "covering": { "movementDelayMs": 1500 }
///     }"#,
/// )?;
///
/// assert_eq!(config.devices.len(), 1);
/// assert_eq!(config.devices[0].display_name, "Living Room");
/// # Ok::<(), blinds_lib::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformConfig {
    /// Platform identifier.
    #[serde(default = "default_platform")]
    pub platform: String,
    /// Name used in log output.
    #[serde(default = "default_platform")]
    pub name: String,
    /// Devices to expose.
    #[serde(default = "DeviceEntry::examples")]
    pub devices: Vec<DeviceEntry>,
    /// Behaviour shared by every covering on this platform.
    #[serde(default)]
    pub covering: CoveringConfig,
}

fn default_platform() -> String {
    DEFAULT_PLATFORM_NAME.to_string()
}

impl PlatformConfig {
    /// Parses the platform block from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Json`] if the JSON is malformed or a field has
    /// the wrong type.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ParseError::Json(e).into())
    }

    /// Replaces the device list.
    #[must_use]
    pub fn with_devices(mut self, devices: Vec<DeviceEntry>) -> Self {
        self.devices = devices;
        self
    }

    /// Replaces the covering behaviour.
    #[must_use]
    pub fn with_covering(mut self, covering: CoveringConfig) -> Self {
        self.covering = covering;
        self
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            platform: default_platform(),
            name: default_platform(),
            devices: DeviceEntry::examples(),
            covering: CoveringConfig::default(),
        }
    }
}
