// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HAP status codes returned to the accessory host.

use thiserror::Error;

/// Status codes a characteristic handler can answer with.
///
/// Returning [`HapStatus::ServiceCommunicationFailure`] from a GET handler
/// makes the Home app show the accessory as "Not Responding".
///
/// # Examples
///
/// ```
/// use blinds_lib::hap::HapStatus;
///
/// assert_eq!(HapStatus::ServiceCommunicationFailure.code(), -70402);
/// assert_eq!(HapStatus::from_code(-70410), Some(HapStatus::InvalidValueInRequest));
/// ```
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HapStatus {
    /// The request succeeded.
    #[error("success")]
    Success,
    /// The controller lacks admin privileges.
    #[error("insufficient privileges")]
    InsufficientPrivileges,
    /// The accessory could not be reached.
    #[error("service communication failure")]
    ServiceCommunicationFailure,
    /// The resource is busy, try again.
    #[error("resource busy")]
    ResourceBusy,
    /// Write to a read-only characteristic.
    #[error("read-only characteristic")]
    ReadOnlyCharacteristic,
    /// Read from a write-only characteristic.
    #[error("write-only characteristic")]
    WriteOnlyCharacteristic,
    /// Notifications are not supported for this characteristic.
    #[error("notification not supported")]
    NotificationNotSupported,
    /// Out of resources to process the request.
    #[error("out of resource")]
    OutOfResource,
    /// The operation timed out.
    #[error("operation timed out")]
    OperationTimedOut,
    /// No such service or characteristic.
    #[error("resource does not exist")]
    ResourceDoesNotExist,
    /// The value in the request is invalid.
    #[error("invalid value in request")]
    InvalidValueInRequest,
    /// Insufficient authorization.
    #[error("insufficient authorization")]
    InsufficientAuthorization,
    /// Operation not allowed in the current state.
    #[error("not allowed in current state")]
    NotAllowedInCurrentState,
}

impl HapStatus {
    const ALL: [Self; 13] = [
        Self::Success,
        Self::InsufficientPrivileges,
        Self::ServiceCommunicationFailure,
        Self::ResourceBusy,
        Self::ReadOnlyCharacteristic,
        Self::WriteOnlyCharacteristic,
        Self::NotificationNotSupported,
        Self::OutOfResource,
        Self::OperationTimedOut,
        Self::ResourceDoesNotExist,
        Self::InvalidValueInRequest,
        Self::InsufficientAuthorization,
        Self::NotAllowedInCurrentState,
    ];

    /// Returns the numeric HAP status code.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::Success => 0,
            Self::InsufficientPrivileges => -70401,
            Self::ServiceCommunicationFailure => -70402,
            Self::ResourceBusy => -70403,
            Self::ReadOnlyCharacteristic => -70404,
            Self::WriteOnlyCharacteristic => -70405,
            Self::NotificationNotSupported => -70406,
            Self::OutOfResource => -70407,
            Self::OperationTimedOut => -70408,
            Self::ResourceDoesNotExist => -70409,
            Self::InvalidValueInRequest => -70410,
            Self::InsufficientAuthorization => -70411,
            Self::NotAllowedInCurrentState => -70412,
        }
    }

    /// Looks up a status by its numeric code.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_unique_and_round_trip() {
        for status in HapStatus::ALL {
            assert_eq!(HapStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(HapStatus::from_code(-1), None);
    }

    #[test]
    fn display() {
        assert_eq!(
            HapStatus::ReadOnlyCharacteristic.to_string(),
            "read-only characteristic"
        );
    }
}
