// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dynamic platform that registers one window covering per configured device.

use std::collections::{HashMap, HashSet};

use tokio::sync::broadcast;

use crate::error::{Error, Result};
use crate::event::{AccessoryEvent, AccessoryId, EventBus};

use super::{AccessoryContext, CachedAccessory, PlatformAccessory, PlatformConfig};

/// Platform coordinating the accessories of one configuration block.
///
/// The host first hands back every accessory it restored from its cache
/// through [`configure_accessory`](Self::configure_accessory), then calls
/// [`discover_devices`](Self::discover_devices) once it has finished
/// launching.
///
/// # Examples
///
/// ```no_run
/// use blinds_lib::platform::{Platform, PlatformConfig};
///
/// #[tokio::main]
/// async fn main() -> blinds_lib::Result<()> {
///     let config = PlatformConfig::from_json(r#"{ "name": "Blinds" }"#)?;
///     let mut platform = Platform::new(config);
///
///     let mut events = platform.subscribe();
///     tokio::spawn(async move {
///         while let Ok(event) = events.recv().await {
///             println!("Event: {event:?}");
///         }
///     });
///
///     for id in platform.discover_devices() {
///         if let Some(accessory) = platform.accessory(id) {
///             println!("{} is at {}", accessory.display_name(), accessory.covering().current_position());
///         }
///     }
///     Ok(())
/// }
/// ```
pub struct Platform {
    config: PlatformConfig,
    cached: HashMap<AccessoryId, CachedAccessory>,
    accessories: HashMap<AccessoryId, PlatformAccessory>,
    events: EventBus,
}

impl Platform {
    /// Creates a platform for the given configuration.
    #[must_use]
    pub fn new(config: PlatformConfig) -> Self {
        tracing::debug!(platform = %config.name, "Finished initializing platform");
        Self {
            config,
            cached: HashMap::new(),
            accessories: HashMap::new(),
            events: EventBus::new(),
        }
    }

    /// Returns the platform configuration.
    #[must_use]
    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    /// Records an accessory the host restored from its cache.
    ///
    /// Cached accessories are matched against the configured devices by
    /// [`discover_devices`](Self::discover_devices). Entries for accessories
    /// that are already running are ignored.
    pub fn configure_accessory(&mut self, cached: CachedAccessory) {
        if self.accessories.contains_key(&cached.id) {
            tracing::debug!(
                platform = %self.config.name,
                accessory = %cached.display_name,
                "Accessory already running, ignoring cache entry"
            );
            return;
        }
        tracing::info!(
            platform = %self.config.name,
            accessory = %cached.display_name,
            "Loading accessory from cache"
        );
        self.cached.insert(cached.id, cached);
    }

    /// Registers an accessory for every configured device.
    ///
    /// Devices whose accessory is in the cache are restored, others are
    /// registered as new. Cached accessories that no longer match a
    /// configured device are unregistered, as are previously discovered
    /// accessories dropped from the configuration. Devices with an empty or
    /// repeated unique id are skipped.
    ///
    /// Returns the identifiers of the active accessories in configuration
    /// order. Calling this again is a no-op for accessories that are
    /// already running.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn discover_devices(&mut self) -> Vec<AccessoryId> {
        let mut active = Vec::with_capacity(self.config.devices.len());
        let mut seen = HashSet::new();

        for device in &self.config.devices {
            if device.unique_id.is_empty() {
                tracing::warn!(
                    platform = %self.config.name,
                    display_name = %device.display_name,
                    "Skipping device without a unique id"
                );
                continue;
            }

            let id = AccessoryId::from_unique_id(&device.unique_id);
            if !seen.insert(id) {
                tracing::warn!(
                    platform = %self.config.name,
                    unique_id = %device.unique_id,
                    "Skipping duplicate device"
                );
                continue;
            }
            active.push(id);

            let cached = self.cached.remove(&id);
            if self.accessories.contains_key(&id) {
                continue;
            }

            let context = AccessoryContext {
                device: device.clone(),
            };
            let event = if let Some(cached) = cached {
                tracing::info!(
                    platform = %self.config.name,
                    accessory = %cached.display_name,
                    "Restoring existing accessory from cache"
                );
                AccessoryEvent::Restored {
                    accessory_id: id,
                    display_name: device.display_name.clone(),
                }
            } else {
                tracing::info!(
                    platform = %self.config.name,
                    accessory = %device.display_name,
                    "Adding new accessory"
                );
                AccessoryEvent::Registered {
                    accessory_id: id,
                    display_name: device.display_name.clone(),
                }
            };

            let accessory =
                PlatformAccessory::new(id, context, self.config.covering, self.events.clone());
            self.accessories.insert(id, accessory);
            self.events.publish(event);
        }

        let dropped: Vec<AccessoryId> = self
            .accessories
            .keys()
            .filter(|id| !seen.contains(*id))
            .copied()
            .collect();
        for id in dropped {
            if let Some(accessory) = self.accessories.remove(&id) {
                accessory.covering().shutdown();
                self.unregister(id, accessory.display_name());
            }
        }

        let stale: Vec<CachedAccessory> = self.cached.drain().map(|(_, cached)| cached).collect();
        for cached in stale {
            self.unregister(cached.id, &cached.display_name);
        }

        active
    }

    fn unregister(&self, id: AccessoryId, display_name: &str) {
        tracing::info!(
            platform = %self.config.name,
            accessory = %display_name,
            "Removing existing accessory from cache"
        );
        self.events.publish(AccessoryEvent::Unregistered { accessory_id: id });
    }

    /// Unregisters a single accessory and stops its covering.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AccessoryNotFound`] if no accessory has this ID.
    pub fn remove_accessory(&mut self, id: AccessoryId) -> Result<()> {
        let accessory = self
            .accessories
            .remove(&id)
            .ok_or(Error::AccessoryNotFound)?;
        accessory.covering().shutdown();
        self.unregister(id, accessory.display_name());
        Ok(())
    }

    /// Returns the accessory with the given ID.
    #[must_use]
    pub fn accessory(&self, id: AccessoryId) -> Option<&PlatformAccessory> {
        self.accessories.get(&id)
    }

    /// Returns all active accessories.
    pub fn accessories(&self) -> impl Iterator<Item = &PlatformAccessory> {
        self.accessories.values()
    }

    /// Returns the number of active accessories.
    #[must_use]
    pub fn accessory_count(&self) -> usize {
        self.accessories.len()
    }

    /// Returns the entries the host should persist in its cache.
    #[must_use]
    pub fn cached_accessories(&self) -> Vec<CachedAccessory> {
        self.accessories.values().map(PlatformAccessory::to_cached).collect()
    }

    /// Subscribes to lifecycle and state events of all accessories.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AccessoryEvent> {
        self.events.subscribe()
    }

    /// Stops every covering and drops all accessories.
    pub fn shutdown(&mut self) {
        for accessory in self.accessories.values() {
            accessory.covering().shutdown();
        }
        self.accessories.clear();
        tracing::debug!(platform = %self.config.name, "Platform shut down");
    }
}

impl std::fmt::Debug for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Platform")
            .field("name", &self.config.name)
            .field("cached", &self.cached.len())
            .field("accessories", &self.accessories.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::DeviceEntry;

    fn cached(unique_id: &str, name: &str) -> CachedAccessory {
        CachedAccessory {
            id: AccessoryId::from_unique_id(unique_id),
            display_name: name.to_string(),
            context: AccessoryContext {
                device: DeviceEntry::new(unique_id, name),
            },
        }
    }

    #[tokio::test(start_paused = true)]
    async fn skips_empty_and_duplicate_ids() {
        let config = PlatformConfig::default().with_devices(vec![
            DeviceEntry::new("", "Nameless"),
            DeviceEntry::new("ABCD", "Bedroom"),
            DeviceEntry::new("ABCD", "Bedroom again"),
        ]);
        let mut platform = Platform::new(config);

        let ids = platform.discover_devices();
        assert_eq!(ids, vec![AccessoryId::from_unique_id("ABCD")]);
        assert_eq!(platform.accessory_count(), 1);
        assert_eq!(platform.accessory(ids[0]).unwrap().display_name(), "Bedroom");
    }

    #[tokio::test(start_paused = true)]
    async fn rediscovery_keeps_running_accessories() {
        let mut platform = Platform::new(PlatformConfig::default());
        let first = platform.discover_devices();

        let mut events = platform.subscribe();
        let second = platform.discover_devices();

        assert_eq!(first, second);
        assert!(events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn remove_accessory() {
        let mut platform = Platform::new(PlatformConfig::default());
        let ids = platform.discover_devices();
        let mut events = platform.subscribe();

        platform.remove_accessory(ids[0]).unwrap();
        assert!(platform.accessory(ids[0]).is_none());
        assert_eq!(
            events.try_recv().unwrap(),
            AccessoryEvent::Unregistered {
                accessory_id: ids[0]
            }
        );

        let err = platform.remove_accessory(ids[0]).unwrap_err();
        assert!(matches!(err, Error::AccessoryNotFound));
    }

    #[tokio::test(start_paused = true)]
    async fn cached_accessories_round_trip_through_host() {
        let mut platform = Platform::new(PlatformConfig::default());
        platform.discover_devices();
        let mut persisted = platform.cached_accessories();
        persisted.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        platform.shutdown();

        assert_eq!(persisted, vec![cached("ABCD", "Bedroom"), cached("EFGH", "Kitchen")]);

        let mut restarted = Platform::new(PlatformConfig::default());
        let mut events = restarted.subscribe();
        for entry in persisted {
            restarted.configure_accessory(entry);
        }
        restarted.discover_devices();

        for _ in 0..2 {
            assert!(matches!(
                events.try_recv().unwrap(),
                AccessoryEvent::Restored { .. }
            ));
        }
    }
}
