// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Platform registration for multiple window coverings.
//!
//! A [`Platform`] reads the device list from its [`PlatformConfig`] and
//! creates one [`PlatformAccessory`] per device. Accessory identifiers are
//! derived from each device's unique id, so a device keeps its identity
//! across restarts and is restored rather than registered again.
//!
//! Lifecycle and state events of every accessory are published on a shared
//! broadcast channel, see [`Platform::subscribe`].

mod accessory_platform;
mod config;
mod platform_accessory;

pub use accessory_platform::Platform;
pub use config::{DEFAULT_PLATFORM_NAME, DeviceEntry, PlatformConfig};
pub use platform_accessory::{AccessoryContext, CachedAccessory, PlatformAccessory};
