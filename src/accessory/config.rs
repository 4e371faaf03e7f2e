// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Window covering behaviour configuration.

use std::cmp::Ordering;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::{Position, PositionState};

/// Default simulated travel time of a move.
pub const DEFAULT_MOVEMENT_DELAY: Duration = Duration::from_millis(1000);

/// How a new target request interacts with a move still in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MotionPolicy {
    /// Every request arms its own completion timer and none is cancelled.
    ///
    /// Each completion settles on the target that is live when it fires, so
    /// an earlier timer can report `Stopped` at the newer target before the
    /// newer move's own timer has elapsed.
    #[default]
    Independent,

    /// A request cancels the pending completion and its own completion
    /// settles on the target captured when it was scheduled.
    Supersede,
}

/// How the motion direction of a new move is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DirectionRule {
    /// `Increasing` above 50%, `Decreasing` otherwise, whatever the
    /// current position.
    #[default]
    Midpoint,

    /// Compare the target to the current position. A target equal to the
    /// current position leaves the covering `Stopped`.
    RelativeToCurrent,
}

impl DirectionRule {
    /// Returns the direction of a move from `current` to `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use blinds_lib::accessory::DirectionRule;
    /// use blinds_lib::types::{Position, PositionState};
    ///
    /// let current = Position::new(80).unwrap();
    /// let target = Position::new(60).unwrap();
    ///
    /// assert_eq!(DirectionRule::Midpoint.direction(current, target), PositionState::Increasing);
    /// assert_eq!(
    ///     DirectionRule::RelativeToCurrent.direction(current, target),
    ///     PositionState::Decreasing
    /// );
    /// ```
    #[must_use]
    pub fn direction(&self, current: Position, target: Position) -> PositionState {
        match self {
            Self::Midpoint => {
                if target > Position::MIDPOINT {
                    PositionState::Increasing
                } else {
                    PositionState::Decreasing
                }
            }
            Self::RelativeToCurrent => match target.cmp(&current) {
                Ordering::Greater => PositionState::Increasing,
                Ordering::Less => PositionState::Decreasing,
                Ordering::Equal => PositionState::Stopped,
            },
        }
    }
}

/// Configuration of a simulated window covering.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use blinds_lib::accessory::{CoveringConfig, MotionPolicy};
///
/// let config = CoveringConfig::default()
///     .with_movement_delay(Duration::from_millis(250))
///     .with_motion(MotionPolicy::Supersede);
/// assert_eq!(config.movement_delay, Duration::from_millis(250));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoveringConfig {
    /// Time between a target request and the covering reporting `Stopped`.
    #[serde(rename = "movementDelayMs", with = "duration_ms")]
    pub movement_delay: Duration,
    /// Handling of overlapping moves.
    pub motion: MotionPolicy,
    /// Direction heuristic.
    pub direction: DirectionRule,
}

impl CoveringConfig {
    /// Sets the simulated travel time.
    #[must_use]
    pub fn with_movement_delay(mut self, delay: Duration) -> Self {
        self.movement_delay = delay;
        self
    }

    /// Sets the overlapping move policy.
    #[must_use]
    pub fn with_motion(mut self, motion: MotionPolicy) -> Self {
        self.motion = motion;
        self
    }

    /// Sets the direction heuristic.
    #[must_use]
    pub fn with_direction(mut self, direction: DirectionRule) -> Self {
        self.direction = direction;
        self
    }
}

impl Default for CoveringConfig {
    fn default() -> Self {
        Self {
            movement_delay: DEFAULT_MOVEMENT_DELAY,
            motion: MotionPolicy::default(),
            direction: DirectionRule::default(),
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(delay: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(delay.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
