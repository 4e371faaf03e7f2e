// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the blinds library.
//!
//! Value validation, configuration parsing and accessory host failures each
//! get their own enum; [`Error`] wraps them all.

use thiserror::Error;

use crate::hap::HapStatus;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while parsing configuration.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The accessory host rejected or failed a characteristic request.
    #[error("HAP status {code}: {0}", code = .0.code())]
    Hap(#[from] HapStatus),

    /// The accessory task has shut down.
    #[error("accessory is closed")]
    AccessoryClosed,

    /// Accessory was not found on the platform.
    #[error("accessory not found")]
    AccessoryNotFound,
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
        /// The actual value that was provided.
        actual: i64,
    },

    /// An invalid position state was provided.
    #[error("invalid position state: {0}")]
    InvalidPositionState(String),
}

/// Errors related to parsing configuration.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 0,
            max: 100,
            actual: 150,
        };
        assert_eq!(err.to_string(), "value 150 is out of range [0, 100]");
    }

    #[test]
    fn error_from_value_error() {
        let value_err = ValueError::InvalidPositionState("UP".to_string());
        let err: Error = value_err.into();
        assert!(matches!(err, Error::Value(ValueError::InvalidPositionState(_))));
    }

    #[test]
    fn hap_error_display_includes_code() {
        let err: Error = HapStatus::ServiceCommunicationFailure.into();
        assert_eq!(
            err.to_string(),
            "HAP status -70402: service communication failure"
        );
    }

    #[test]
    fn parse_error_from_json() {
        let json_err = serde_json::from_str::<u8>("nope").unwrap_err();
        let err: Error = ParseError::from(json_err).into();
        assert!(matches!(err, Error::Parse(ParseError::Json(_))));
    }
}
