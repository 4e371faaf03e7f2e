// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HomeKit accessory host boundary.
//!
//! The host owns the HAP protocol, pairing and discovery. What it needs from
//! an accessory is a table of characteristic handlers, which is what
//! [`CharacteristicRegistry`] provides, plus the status codes a handler may
//! answer with.

mod characteristic;
mod information;
mod registry;
mod status;

pub use characteristic::{CharacteristicType, CharacteristicValue, Perms, ServiceType};
pub use information::{
    AccessoryInformation, DEFAULT_MANUFACTURER, DEFAULT_MODEL, DEFAULT_SERIAL_NUMBER,
};
pub use registry::{CharacteristicRegistry, SetFuture};
pub use status::HapStatus;
