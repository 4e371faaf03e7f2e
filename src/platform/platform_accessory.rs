// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessories registered by the platform.

use serde::{Deserialize, Serialize};

use crate::accessory::{CoveringConfig, WindowCovering, bind_window_covering};
use crate::event::{AccessoryId, EventBus};
use crate::hap::{AccessoryInformation, CharacteristicRegistry};

use super::DeviceEntry;

/// Data the platform attaches to an accessory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessoryContext {
    /// The configured device this accessory represents.
    pub device: DeviceEntry,
}

/// An accessory as kept in the host's cache between restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedAccessory {
    /// Accessory identifier.
    pub id: AccessoryId,
    /// Name the accessory was registered with.
    pub display_name: String,
    /// Platform context.
    pub context: AccessoryContext,
}

/// A window covering accessory with its host-facing handler table.
pub struct PlatformAccessory {
    id: AccessoryId,
    context: AccessoryContext,
    information: AccessoryInformation,
    covering: WindowCovering,
    registry: CharacteristicRegistry,
}

impl PlatformAccessory {
    pub(crate) fn new(
        id: AccessoryId,
        context: AccessoryContext,
        config: CoveringConfig,
        events: EventBus,
    ) -> Self {
        let name = context.device.display_name.clone();
        let information = AccessoryInformation::new(name.clone());
        let covering = WindowCovering::spawn_with_events(name, config, id, events);

        let mut registry = CharacteristicRegistry::new();
        information.register(&mut registry);
        bind_window_covering(&mut registry, &covering);

        Self {
            id,
            context,
            information,
            covering,
            registry,
        }
    }

    /// Returns the accessory identifier.
    #[must_use]
    pub fn id(&self) -> AccessoryId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.context.device.display_name
    }

    /// Returns the platform context.
    #[must_use]
    pub fn context(&self) -> &AccessoryContext {
        &self.context
    }

    /// Returns the accessory information service contents.
    #[must_use]
    pub fn information(&self) -> &AccessoryInformation {
        &self.information
    }

    /// Returns the window covering handle.
    #[must_use]
    pub fn covering(&self) -> &WindowCovering {
        &self.covering
    }

    /// Returns the handler table the host dispatches requests through.
    #[must_use]
    pub fn registry(&self) -> &CharacteristicRegistry {
        &self.registry
    }

    /// Returns the entry the host should keep in its cache.
    #[must_use]
    pub fn to_cached(&self) -> CachedAccessory {
        CachedAccessory {
            id: self.id,
            display_name: self.display_name().to_string(),
            context: self.context.clone(),
        }
    }
}

impl std::fmt::Debug for PlatformAccessory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformAccessory")
            .field("id", &self.id)
            .field("context", &self.context)
            .field("covering", &self.covering)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cached_accessory_serde() {
        let cached = CachedAccessory {
            id: AccessoryId::from_unique_id("ABCD"),
            display_name: "Bedroom".to_string(),
            context: AccessoryContext {
                device: DeviceEntry::new("ABCD", "Bedroom"),
            },
        };

        let json = serde_json::to_value(&cached).unwrap();
        assert_eq!(json["displayName"], "Bedroom");
        assert_eq!(json["context"]["device"]["uniqueId"], "ABCD");

        let back: CachedAccessory = serde_json::from_value(json).unwrap();
        assert_eq!(back, cached);
    }

    #[tokio::test(start_paused = true)]
    async fn new_accessory_registers_both_services() {
        use crate::hap::{CharacteristicType, CharacteristicValue, ServiceType};

        let id = AccessoryId::from_unique_id("ABCD");
        let accessory = PlatformAccessory::new(
            id,
            AccessoryContext {
                device: DeviceEntry::new("ABCD", "Bedroom"),
            },
            CoveringConfig::default(),
            EventBus::new(),
        );

        assert_eq!(accessory.display_name(), "Bedroom");
        assert_eq!(accessory.to_cached().id, id);
        assert_eq!(
            accessory
                .registry()
                .get(ServiceType::AccessoryInformation, CharacteristicType::Manufacturer)
                .unwrap(),
            CharacteristicValue::from("Dari Gomez")
        );
        assert_eq!(
            accessory
                .registry()
                .get(ServiceType::WindowCovering, CharacteristicType::Name)
                .unwrap(),
            CharacteristicValue::from("Bedroom")
        );
        assert_eq!(
            accessory.registry().characteristics(ServiceType::WindowCovering).len(),
            4
        );
    }
}
