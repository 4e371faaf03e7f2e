// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory state management types.
//!
//! The [`AccessoryState`] struct holds the three window covering fields,
//! while [`StateChange`] represents individual changes that can be applied.
//!
//! # Examples
//!
//! ```
//! use blinds_lib::state::{AccessoryState, StateChange};
//! use blinds_lib::types::{Position, PositionState};
//!
//! let mut state = AccessoryState::new();
//! state.apply(&StateChange::move_started(Position::CLOSED, PositionState::Decreasing));
//! state.apply(&StateChange::move_finished(Position::CLOSED));
//!
//! assert_eq!(state.current_position(), Position::CLOSED);
//! assert!(state.is_settled());
//! ```

mod accessory_state;
mod state_change;

pub use accessory_state::AccessoryState;
pub use state_change::StateChange;
