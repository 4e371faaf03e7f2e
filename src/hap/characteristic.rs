// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Services, characteristics and characteristic values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Position, PositionState};

/// Service types exposed by this library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    /// Manufacturer, model, serial number and name.
    AccessoryInformation,
    /// Blinds, shades and other window coverings.
    WindowCovering,
}

/// Characteristic types used by the services above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacteristicType {
    /// Manufacturer name.
    Manufacturer,
    /// Model name.
    Model,
    /// Serial number.
    SerialNumber,
    /// Display name.
    Name,
    /// Settled position (0-100).
    CurrentPosition,
    /// Motion direction (0-2).
    PositionState,
    /// Requested position (0-100).
    TargetPosition,
}

/// Access permissions of a characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Perms {
    /// Paired controllers may read the value.
    pub read: bool,
    /// Paired controllers may write the value.
    pub write: bool,
}

impl CharacteristicType {
    /// Returns the permissions defined for this characteristic.
    #[must_use]
    pub const fn perms(&self) -> Perms {
        match self {
            Self::TargetPosition => Perms {
                read: true,
                write: true,
            },
            _ => Perms {
                read: true,
                write: false,
            },
        }
    }
}

impl fmt::Display for CharacteristicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A characteristic value as exchanged with the host.
///
/// # Examples
///
/// ```
/// use blinds_lib::hap::CharacteristicValue;
/// use blinds_lib::types::PositionState;
///
/// let value = CharacteristicValue::from(PositionState::Stopped);
/// assert_eq!(value.as_int(), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CharacteristicValue {
    /// Integer, used for positions and enumerations.
    Int(i64),
    /// String, used for information characteristics.
    String(String),
}

impl CharacteristicValue {
    /// Returns the integer value, if this is an integer.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::String(_) => None,
        }
    }

    /// Returns the string value, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            Self::Int(_) => None,
        }
    }
}

impl From<Position> for CharacteristicValue {
    fn from(position: Position) -> Self {
        Self::Int(i64::from(position.value()))
    }
}

impl From<PositionState> for CharacteristicValue {
    fn from(state: PositionState) -> Self {
        Self::Int(i64::from(state.as_num()))
    }
}

impl From<i64> for CharacteristicValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for CharacteristicValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for CharacteristicValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl fmt::Display for CharacteristicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value}"),
        }
    }
}
