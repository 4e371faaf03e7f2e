// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory state tracking.

use serde::{Deserialize, Serialize};

use crate::types::{Position, PositionState};

use super::StateChange;

/// Tracked state of a window covering accessory.
///
/// `current_position` is the last settled position. While the covering is
/// moving it keeps the pre-move value until the move completes.
///
/// # Examples
///
/// ```
/// use blinds_lib::state::AccessoryState;
/// use blinds_lib::types::{Position, PositionState};
///
/// let state = AccessoryState::new();
/// assert_eq!(state.current_position(), Position::OPEN);
/// assert_eq!(state.position_state(), PositionState::Stopped);
/// assert_eq!(state.target_position(), Position::OPEN);
/// assert!(state.is_settled());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryState {
    current_position: Position,
    position_state: PositionState,
    target_position: Position,
}

impl AccessoryState {
    /// Creates the initial state: fully open and stopped.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_position: Position::OPEN,
            position_state: PositionState::Stopped,
            target_position: Position::OPEN,
        }
    }

    /// Gets the settled position.
    #[must_use]
    pub fn current_position(&self) -> Position {
        self.current_position
    }

    /// Gets the motion direction.
    #[must_use]
    pub fn position_state(&self) -> PositionState {
        self.position_state
    }

    /// Gets the requested destination.
    #[must_use]
    pub fn target_position(&self) -> Position {
        self.target_position
    }

    /// Returns `true` if stopped at the target.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.position_state == PositionState::Stopped
            && self.current_position == self.target_position
    }

    /// Applies a state change.
    ///
    /// Returns `true` if the state was actually modified.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        match change {
            StateChange::CurrentPosition(position) => {
                replace(&mut self.current_position, *position)
            }
            StateChange::PositionState(state) => replace(&mut self.position_state, *state),
            StateChange::TargetPosition(position) => {
                replace(&mut self.target_position, *position)
            }
            StateChange::Batch(changes) => {
                // No short-circuit: every nested change must be applied.
                changes
                    .iter()
                    .fold(false, |changed, c| self.apply(c) || changed)
            }
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

impl Default for AccessoryState {
    fn default() -> Self {
        Self::new()
    }
}
