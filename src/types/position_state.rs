// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Motion direction of a window covering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Current motion direction of a window covering.
///
/// The numeric codes match the HomeKit `PositionState` characteristic.
///
/// # Examples
///
/// ```
/// use blinds_lib::types::PositionState;
///
/// assert_eq!(PositionState::Decreasing.as_num(), 0);
/// assert_eq!(PositionState::Increasing.as_num(), 1);
/// assert_eq!(PositionState::Stopped.as_num(), 2);
///
/// let parsed: PositionState = "stopped".parse().unwrap();
/// assert_eq!(parsed, PositionState::Stopped);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionState {
    /// Moving towards closed.
    Decreasing,
    /// Moving towards open.
    Increasing,
    /// Not moving.
    #[default]
    Stopped,
}

impl PositionState {
    /// Returns the upper-case name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Decreasing => "DECREASING",
            Self::Increasing => "INCREASING",
            Self::Stopped => "STOPPED",
        }
    }

    /// Returns the HomeKit numeric value.
    #[must_use]
    pub const fn as_num(&self) -> u8 {
        match self {
            Self::Decreasing => 0,
            Self::Increasing => 1,
            Self::Stopped => 2,
        }
    }

    /// Returns `true` while the covering is moving.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        !matches!(self, Self::Stopped)
    }
}

impl fmt::Display for PositionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<u8> for PositionState {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Decreasing),
            1 => Ok(Self::Increasing),
            2 => Ok(Self::Stopped),
            other => Err(ValueError::OutOfRange {
                min: 0,
                max: 2,
                actual: i64::from(other),
            }),
        }
    }
}

impl FromStr for PositionState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DECREASING" | "0" => Ok(Self::Decreasing),
            "INCREASING" | "1" => Ok(Self::Increasing),
            "STOPPED" | "2" => Ok(Self::Stopped),
            _ => Err(ValueError::InvalidPositionState(s.to_string())),
        }
    }
}
