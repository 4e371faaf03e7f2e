// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Blinds Lib - simulated window covering accessories for a HomeKit bridge.
//!
//! Each accessory exposes the three characteristics of a window covering
//! service:
//!
//! - **`CurrentPosition`**: where the covering is (0 closed, 100 open)
//! - **`PositionState`**: whether it is opening, closing or stopped
//! - **`TargetPosition`**: where it was last asked to go
//!
//! Setting a target starts a simulated move. The covering reports a
//! direction right away and settles on the target once the movement delay
//! (one second by default) has elapsed. No motor is driven.
//!
//! # Quick Start
//!
//! ## Single Covering
//!
//! ```no_run
//! use blinds_lib::{CoveringConfig, Position, WindowCovering};
//!
//! #[tokio::main]
//! async fn main() -> blinds_lib::Result<()> {
//!     let covering = WindowCovering::spawn("Bedroom", CoveringConfig::default());
//!
//!     covering.set_target_position(Position::new(30)?).await?;
//!     println!("Moving: {}", covering.position_state());
//!
//!     tokio::time::sleep(std::time::Duration::from_secs(1)).await;
//!     println!("Now at {}", covering.current_position());
//!     Ok(())
//! }
//! ```
//!
//! ## Platform With Host Handlers
//!
//! ```no_run
//! use blinds_lib::hap::{CharacteristicType, CharacteristicValue, ServiceType};
//! use blinds_lib::platform::{Platform, PlatformConfig};
//!
//! #[tokio::main]
//! async fn main() -> blinds_lib::Result<()> {
//!     let mut platform = Platform::new(PlatformConfig::default());
//!
//!     for id in platform.discover_devices() {
//!         let Some(accessory) = platform.accessory(id) else { continue };
//!         accessory
//!             .registry()
//!             .set(
//!                 ServiceType::WindowCovering,
//!                 CharacteristicType::TargetPosition,
//!                 CharacteristicValue::Int(80),
//!             )
//!             .await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Event Subscriptions
//!
//! ```no_run
//! use blinds_lib::subscription::Subscribable;
//! use blinds_lib::{CoveringConfig, WindowCovering};
//!
//! #[tokio::main]
//! async fn main() {
//!     let covering = WindowCovering::spawn("Kitchen", CoveringConfig::default());
//!
//!     covering.on_position_state_changed(|state| {
//!         println!("Position state: {state}");
//!     });
//!     covering.on_current_position_changed(|position| {
//!         println!("Current position: {position}");
//!     });
//! }
//! ```
//!
//! # Logging
//!
//! The library emits [`tracing`] events and never installs a subscriber.

pub mod accessory;
pub mod error;
pub mod event;
pub mod hap;
pub mod platform;
pub mod state;
pub mod subscription;
pub mod types;

pub use accessory::{CoveringConfig, DirectionRule, MotionPolicy, WindowCovering};
pub use error::{Error, ParseError, Result, ValueError};
pub use event::{AccessoryEvent, AccessoryId, EventBus};
pub use hap::HapStatus;
pub use state::{AccessoryState, StateChange};
pub use types::{Position, PositionState};
