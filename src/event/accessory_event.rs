// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory event types.

use crate::state::{AccessoryState, StateChange};

use super::AccessoryId;

/// Events emitted by the platform.
///
/// # Examples
///
/// ```
/// use blinds_lib::event::{AccessoryEvent, AccessoryId};
///
/// let accessory_id = AccessoryId::from_unique_id("ABCD");
/// let event = AccessoryEvent::Registered {
///     accessory_id,
///     display_name: "Bedroom".to_string(),
/// };
/// assert!(event.is_lifecycle());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessoryEvent {
    /// A new accessory was registered with the host.
    Registered {
        /// The ID of the accessory.
        accessory_id: AccessoryId,
        /// Name shown in the Home app.
        display_name: String,
    },

    /// An accessory was restored from the host's cache.
    Restored {
        /// The ID of the accessory.
        accessory_id: AccessoryId,
        /// Name shown in the Home app.
        display_name: String,
    },

    /// A cached accessory was removed because it is no longer configured.
    Unregistered {
        /// The ID of the accessory.
        accessory_id: AccessoryId,
    },

    /// Accessory state changed.
    StateChanged {
        /// The ID of the accessory.
        accessory_id: AccessoryId,
        /// The specific change that occurred.
        change: StateChange,
        /// The complete new state.
        new_state: AccessoryState,
    },
}

impl AccessoryEvent {
    /// Returns the accessory ID associated with this event.
    #[must_use]
    pub fn accessory_id(&self) -> AccessoryId {
        match self {
            Self::Registered { accessory_id, .. }
            | Self::Restored { accessory_id, .. }
            | Self::Unregistered { accessory_id }
            | Self::StateChanged { accessory_id, .. } => *accessory_id,
        }
    }

    /// Returns `true` for registration, restore and removal events.
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        !self.is_state_change()
    }

    /// Returns `true` if this is a state change event.
    #[must_use]
    pub fn is_state_change(&self) -> bool {
        matches!(self, Self::StateChanged { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    #[test]
    fn accessory_id_accessor() {
        let accessory_id = AccessoryId::new();
        let events = [
            AccessoryEvent::Unregistered { accessory_id },
            AccessoryEvent::StateChanged {
                accessory_id,
                change: StateChange::TargetPosition(Position::CLOSED),
                new_state: AccessoryState::new(),
            },
        ];
        for event in events {
            assert_eq!(event.accessory_id(), accessory_id);
        }
    }

    #[test]
    fn classification() {
        let accessory_id = AccessoryId::new();
        assert!(AccessoryEvent::Unregistered { accessory_id }.is_lifecycle());

        let changed = AccessoryEvent::StateChanged {
            accessory_id,
            change: StateChange::TargetPosition(Position::CLOSED),
            new_state: AccessoryState::new(),
        };
        assert!(changed.is_state_change());
        assert!(!changed.is_lifecycle());
    }
}
