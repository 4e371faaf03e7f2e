// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registration of a window covering's characteristics with the host.

use crate::hap::{
    CharacteristicRegistry, CharacteristicType, CharacteristicValue, HapStatus, ServiceType,
};
use crate::types::Position;

use super::WindowCovering;

/// Registers the window covering service handlers.
///
/// - `Name`: static display name
/// - `CurrentPosition`: GET
/// - `PositionState`: GET
/// - `TargetPosition`: GET and SET
///
/// SET requests carrying anything but an integer in 0-100 are answered
/// with [`HapStatus::InvalidValueInRequest`]. While the covering is marked
/// unresponsive every request fails with
/// [`HapStatus::ServiceCommunicationFailure`].
///
/// # Examples
///
/// ```no_run
/// use blinds_lib::accessory::{CoveringConfig, WindowCovering, bind_window_covering};
/// use blinds_lib::hap::{CharacteristicRegistry, CharacteristicType, CharacteristicValue, ServiceType};
///
/// # async fn example() -> Result<(), blinds_lib::hap::HapStatus> {
/// let covering = WindowCovering::spawn("Bedroom", CoveringConfig::default());
/// let mut registry = CharacteristicRegistry::new();
/// bind_window_covering(&mut registry, &covering);
///
/// registry
///     .set(
///         ServiceType::WindowCovering,
///         CharacteristicType::TargetPosition,
///         CharacteristicValue::Int(30),
///     )
///     .await?;
/// # Ok(())
/// # }
/// ```
pub fn bind_window_covering(registry: &mut CharacteristicRegistry, covering: &WindowCovering) {
    let service = ServiceType::WindowCovering;

    registry.set_static(service, CharacteristicType::Name, covering.name());

    let handle = covering.clone();
    registry.on_get(service, CharacteristicType::CurrentPosition, move || {
        handle.check_responsive()?;
        Ok(handle.current_position().into())
    });

    let handle = covering.clone();
    registry.on_get(service, CharacteristicType::PositionState, move || {
        handle.check_responsive()?;
        Ok(handle.position_state().into())
    });

    let handle = covering.clone();
    registry.on_get(service, CharacteristicType::TargetPosition, move || {
        handle.check_responsive()?;
        Ok(handle.target_position().into())
    });

    let handle = covering.clone();
    registry.on_set(service, CharacteristicType::TargetPosition, move |value| {
        let handle = handle.clone();
        async move {
            handle.check_responsive()?;
            let target = parse_position(&value).ok_or_else(|| {
                tracing::warn!(accessory = %handle.name(), %value, "Rejected TargetPosition value");
                HapStatus::InvalidValueInRequest
            })?;
            handle.set_target_position(target).await.map_err(|e| {
                tracing::warn!(accessory = %handle.name(), error = %e, "Failed to set TargetPosition");
                HapStatus::ServiceCommunicationFailure
            })
        }
    });
}

fn parse_position(value: &CharacteristicValue) -> Option<Position> {
    value.as_int().and_then(|v| Position::try_from(v).ok())
}
