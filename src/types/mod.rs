// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for window covering control.
//!
//! Each type ensures values are within their valid ranges at construction
//! time.
//!
//! # Types
//!
//! - [`Position`] - Covering position (0-100%)
//! - [`PositionState`] - Motion direction (Decreasing/Increasing/Stopped)

mod position;
mod position_state;

pub use position::Position;
pub use position_state::PositionState;
