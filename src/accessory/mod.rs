// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Window covering accessory.
//!
//! A [`WindowCovering`] simulates blinds: a target request sets the target
//! and a motion direction right away, and a timer settles the covering on
//! the target after the movement delay.
//!
//! # State Machine
//!
//! ```text
//!            set_target_position
//!   Stopped ---------------------> Increasing | Decreasing
//!      ^                                  |
//!      +------- movement delay elapsed ---+
//! ```
//!
//! # Overlapping Moves
//!
//! With the default [`MotionPolicy::Independent`], a second request before
//! the first move completes leaves both timers armed. The first one to fire
//! settles on the *latest* target, so the covering briefly reports
//! `Stopped` at the new target before the second timer fires again.
//! [`MotionPolicy::Supersede`] cancels the earlier timer instead.

mod binding;
mod config;
mod window_covering;

pub use binding::bind_window_covering;
pub use config::{CoveringConfig, DEFAULT_MOVEMENT_DELAY, DirectionRule, MotionPolicy};
pub use window_covering::WindowCovering;
