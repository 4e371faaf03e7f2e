// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! State changes are the building blocks for updating an
//! [`AccessoryState`](super::AccessoryState). A target request produces a
//! batch of target and direction changes; a finished move produces a batch
//! of direction and current position changes.
//!
//! # Examples
//!
//! ```
//! use blinds_lib::state::{AccessoryState, StateChange};
//! use blinds_lib::types::{Position, PositionState};
//!
//! let mut state = AccessoryState::new();
//!
//! let change = StateChange::move_started(Position::new(30).unwrap(), PositionState::Decreasing);
//! assert!(state.apply(&change));
//!
//! // Applying the same change again is a no-op
//! assert!(!state.apply(&change));
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{Position, PositionState};

/// Represents a change in accessory state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateChange {
    /// The settled position changed.
    CurrentPosition(Position),

    /// The motion direction changed.
    PositionState(PositionState),

    /// The requested destination changed.
    TargetPosition(Position),

    /// Multiple changes at once.
    Batch(Vec<StateChange>),
}

impl StateChange {
    /// Creates the change produced by a new target request.
    #[must_use]
    pub fn move_started(target: Position, direction: PositionState) -> Self {
        Self::Batch(vec![
            Self::TargetPosition(target),
            Self::PositionState(direction),
        ])
    }

    /// Creates the change produced when a simulated move completes.
    #[must_use]
    pub fn move_finished(position: Position) -> Self {
        Self::Batch(vec![
            Self::PositionState(PositionState::Stopped),
            Self::CurrentPosition(position),
        ])
    }

    /// Returns `true` if this is a batch of changes.
    #[must_use]
    pub fn is_batch(&self) -> bool {
        matches!(self, Self::Batch(_))
    }

    /// Returns the number of individual changes.
    ///
    /// For batch changes, returns the total count of nested changes.
    #[must_use]
    pub fn change_count(&self) -> usize {
        match self {
            Self::Batch(changes) => changes.iter().map(Self::change_count).sum(),
            _ => 1,
        }
    }

    /// Flattens nested batches into their individual changes.
    #[must_use]
    pub fn leaves(&self) -> Vec<&StateChange> {
        match self {
            Self::Batch(changes) => changes.iter().flat_map(Self::leaves).collect(),
            other => vec![other],
        }
    }
}
