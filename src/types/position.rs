// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Position type for window coverings.
//!
//! This module provides a type-safe representation of a covering position,
//! ensuring values are always within the valid range of 0-100%.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Position of a window covering as a percentage (0-100).
///
/// HomeKit uses 0 for fully closed and 100 for fully open.
///
/// # Examples
///
/// ```
/// use blinds_lib::types::Position;
///
/// let pos = Position::new(30).unwrap();
/// assert_eq!(pos.value(), 30);
///
/// assert_eq!(Position::CLOSED.value(), 0);
/// assert_eq!(Position::OPEN.value(), 100);
///
/// // Invalid values return error
/// assert!(Position::new(101).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Position(u8);

impl Position {
    /// Fully closed (0%).
    pub const CLOSED: Self = Self(0);

    /// Fully open (100%).
    pub const OPEN: Self = Self(100);

    /// Midpoint used by the fixed direction heuristic (50%).
    pub const MIDPOINT: Self = Self(50);

    /// Creates a new position.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: i64::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates a position, clamping to the valid range.
    ///
    /// ```
    /// use blinds_lib::types::Position;
    ///
    /// assert_eq!(Position::clamped(150).value(), 100);
    /// ```
    #[must_use]
    pub const fn clamped(value: u8) -> Self {
        if value > 100 { Self(100) } else { Self(value) }
    }

    /// Returns the percentage value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns `true` if fully closed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if fully open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.0 == 100
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::OPEN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for Position {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for Position {
    type Error = ValueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: value,
            })
            .and_then(Self::new)
    }
}

impl From<Position> for u8 {
    fn from(position: Position) -> Self {
        position.0
    }
}
