// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory information service.

use serde::{Deserialize, Serialize};

use super::{CharacteristicRegistry, CharacteristicType, ServiceType};

/// Default manufacturer reported to the host.
pub const DEFAULT_MANUFACTURER: &str = "Dari Gomez";

/// Default model reported to the host.
pub const DEFAULT_MODEL: &str = "V1";

/// Default serial number reported to the host.
pub const DEFAULT_SERIAL_NUMBER: &str = "HOMEMADE";

/// Contents of the accessory information service.
///
/// # Examples
///
/// ```
/// use blinds_lib::hap::AccessoryInformation;
///
/// let info = AccessoryInformation::new("Bedroom");
/// assert_eq!(info.manufacturer, "Dari Gomez");
/// assert_eq!(info.name, "Bedroom");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryInformation {
    /// Manufacturer name.
    pub manufacturer: String,
    /// Model name.
    pub model: String,
    /// Serial number.
    pub serial_number: String,
    /// Display name.
    pub name: String,
}

impl AccessoryInformation {
    /// Creates the information block with default vendor fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            manufacturer: DEFAULT_MANUFACTURER.to_string(),
            model: DEFAULT_MODEL.to_string(),
            serial_number: DEFAULT_SERIAL_NUMBER.to_string(),
            name: name.into(),
        }
    }

    /// Registers the information characteristics as static values.
    pub fn register(&self, registry: &mut CharacteristicRegistry) {
        let service = ServiceType::AccessoryInformation;
        registry
            .set_static(
                service,
                CharacteristicType::Manufacturer,
                self.manufacturer.as_str(),
            )
            .set_static(service, CharacteristicType::Model, self.model.as_str())
            .set_static(
                service,
                CharacteristicType::SerialNumber,
                self.serial_number.as_str(),
            )
            .set_static(service, CharacteristicType::Name, self.name.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hap::CharacteristicValue;

    #[test]
    fn register_exposes_all_fields() {
        let mut registry = CharacteristicRegistry::new();
        AccessoryInformation::new("Kitchen").register(&mut registry);

        let read = |c| {
            registry
                .get(ServiceType::AccessoryInformation, c)
                .unwrap()
        };
        assert_eq!(read(CharacteristicType::Manufacturer), CharacteristicValue::from("Dari Gomez"));
        assert_eq!(read(CharacteristicType::Model), CharacteristicValue::from("V1"));
        assert_eq!(read(CharacteristicType::SerialNumber), CharacteristicValue::from("HOMEMADE"));
        assert_eq!(read(CharacteristicType::Name), CharacteristicValue::from("Kitchen"));
    }
}
