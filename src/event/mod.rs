// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for accessory lifecycle and state changes.
//!
//! The [`EventBus`] uses tokio's broadcast channel so any number of
//! subscribers can follow what the platform is doing.
//!
//! # Examples
//!
//! ```
//! use blinds_lib::event::{AccessoryEvent, AccessoryId, EventBus};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(AccessoryEvent::Unregistered {
//!     accessory_id: AccessoryId::from_unique_id("ABCD"),
//! });
//! ```

mod accessory_event;
mod accessory_id;
mod event_bus;

pub use accessory_event::AccessoryEvent;
pub use accessory_id::AccessoryId;
pub use event_bus::EventBus;
