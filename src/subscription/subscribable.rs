// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscribable trait for accessories that push state updates.

use crate::state::StateChange;
use crate::subscription::SubscriptionId;
use crate::types::{Position, PositionState};

/// Trait for types that support state change subscriptions.
///
/// Callbacks run on the accessory task right after a change has been
/// applied, so they must not block.
///
/// # Examples
///
/// ```no_run
/// use blinds_lib::accessory::{CoveringConfig, WindowCovering};
/// use blinds_lib::subscription::Subscribable;
///
/// # async fn example() {
/// let covering = WindowCovering::spawn("Bedroom", CoveringConfig::default());
///
/// let sub_id = covering.on_position_state_changed(|state| {
///     println!("Blind is now {state}");
/// });
///
/// covering.unsubscribe(sub_id);
/// # }
/// ```
pub trait Subscribable {
    /// Subscribes to settled position changes.
    fn on_current_position_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Position) + Send + Sync + 'static;

    /// Subscribes to motion direction changes.
    fn on_position_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(PositionState) + Send + Sync + 'static;

    /// Subscribes to target position changes.
    fn on_target_position_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Position) + Send + Sync + 'static;

    /// Subscribes to all state changes.
    fn on_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StateChange) + Send + Sync + 'static;

    /// Unsubscribes a callback by its subscription ID.
    ///
    /// Returns `true` if the subscription was found and removed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}
