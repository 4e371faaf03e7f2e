// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory identifier type.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an accessory.
///
/// Accessories created from configuration derive their identifier from the
/// device's unique id, so the same device maps to the same accessory across
/// restarts and the host can match it against its cache.
///
/// # Examples
///
/// ```
/// use blinds_lib::event::AccessoryId;
///
/// let a = AccessoryId::from_unique_id("ABCD");
/// let b = AccessoryId::from_unique_id("ABCD");
/// assert_eq!(a, b);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessoryId(Uuid);

impl AccessoryId {
    /// Creates a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derives a stable identifier from a device unique id.
    #[must_use]
    pub fn from_unique_id(unique_id: &str) -> Self {
        Self(Uuid::new_v5(&Uuid::NAMESPACE_URL, unique_id.as_bytes()))
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AccessoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AccessoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = &self.0.to_string()[..8];
        write!(f, "AccessoryId({short}...)")
    }
}

impl fmt::Display for AccessoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for AccessoryId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_unique_ids() {
        assert_ne!(AccessoryId::new(), AccessoryId::new());
    }

    #[test]
    fn derived_ids_are_stable_and_distinct() {
        assert_eq!(
            AccessoryId::from_unique_id("ABCD"),
            AccessoryId::from_unique_id("ABCD")
        );
        assert_ne!(
            AccessoryId::from_unique_id("ABCD"),
            AccessoryId::from_unique_id("EFGH")
        );
        assert_eq!(
            AccessoryId::from_unique_id("ABCD").as_uuid().get_version_num(),
            5
        );
    }

    #[test]
    fn debug_format() {
        let debug = format!("{:?}", AccessoryId::new());
        assert!(debug.starts_with("AccessoryId("));
        assert!(debug.ends_with("...)"));
    }
}
