// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for accessory state subscriptions.
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`CallbackRegistry`] - Registry for storing and dispatching callbacks

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::state::StateChange;
use crate::types::{Position, PositionState};

/// Unique identifier for a subscription.
///
/// IDs are unique within an accessory's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Creates a new subscription ID with the given value.
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type PositionCallback = Arc<dyn Fn(Position) + Send + Sync>;

type PositionStateCallback = Arc<dyn Fn(PositionState) + Send + Sync>;

type StateChangedCallback = Arc<dyn Fn(&StateChange) + Send + Sync>;

/// Registry for managing accessory subscription callbacks.
///
/// Uses `parking_lot::RwLock` for interior mutability so it can be shared
/// between the accessory task and its handles. Callbacks are wrapped in
/// `Arc` so they can be cloned cheaply.
pub struct CallbackRegistry {
    next_id: AtomicU64,
    current_position_callbacks: RwLock<HashMap<SubscriptionId, PositionCallback>>,
    position_state_callbacks: RwLock<HashMap<SubscriptionId, PositionStateCallback>>,
    target_position_callbacks: RwLock<HashMap<SubscriptionId, PositionCallback>>,
    /// Generic callbacks (receive every change, batches included).
    state_changed_callbacks: RwLock<HashMap<SubscriptionId, StateChangedCallback>>,
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            current_position_callbacks: RwLock::new(HashMap::new()),
            position_state_callbacks: RwLock::new(HashMap::new()),
            target_position_callbacks: RwLock::new(HashMap::new()),
            state_changed_callbacks: RwLock::new(HashMap::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    // =========================================================================
    // Registration methods
    // =========================================================================

    /// Registers a callback for settled position changes.
    pub fn on_current_position_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Position) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.current_position_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for motion direction changes.
    pub fn on_position_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(PositionState) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.position_state_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for target position changes.
    pub fn on_target_position_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Position) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.target_position_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for all state changes.
    pub fn on_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StateChange) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.state_changed_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    // =========================================================================
    // Unsubscription
    // =========================================================================

    /// Unregisters a callback by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.current_position_callbacks.write().remove(&id).is_some()
            || self.position_state_callbacks.write().remove(&id).is_some()
            || self.target_position_callbacks.write().remove(&id).is_some()
            || self.state_changed_callbacks.write().remove(&id).is_some()
    }

    /// Clears all callbacks.
    pub fn clear(&self) {
        self.current_position_callbacks.write().clear();
        self.position_state_callbacks.write().clear();
        self.target_position_callbacks.write().clear();
        self.state_changed_callbacks.write().clear();
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Dispatches a state change to relevant callbacks.
    ///
    /// Generic callbacks receive the change once, batches included. Typed
    /// callbacks receive each individual change of a batch.
    pub fn dispatch(&self, change: &StateChange) {
        {
            let callbacks = self.state_changed_callbacks.read();
            for callback in callbacks.values() {
                callback(change);
            }
        }
        self.dispatch_typed(change);
    }

    fn dispatch_typed(&self, change: &StateChange) {
        match change {
            StateChange::CurrentPosition(position) => {
                let callbacks = self.current_position_callbacks.read();
                for callback in callbacks.values() {
                    callback(*position);
                }
            }
            StateChange::PositionState(state) => {
                let callbacks = self.position_state_callbacks.read();
                for callback in callbacks.values() {
                    callback(*state);
                }
            }
            StateChange::TargetPosition(position) => {
                let callbacks = self.target_position_callbacks.read();
                for callback in callbacks.values() {
                    callback(*position);
                }
            }
            StateChange::Batch(changes) => {
                for nested in changes {
                    self.dispatch_typed(nested);
                }
            }
        }
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Returns the total number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.current_position_callbacks.read().len()
            + self.position_state_callbacks.read().len()
            + self.target_position_callbacks.read().len()
            + self.state_changed_callbacks.read().len()
    }

    /// Returns `true` if there are no registered callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn subscription_id_display() {
        let id = SubscriptionId::new(42);
        assert_eq!(id.to_string(), "Sub(42)");
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = CallbackRegistry::new();
        assert!(registry.is_empty());
    }

    #[test]
    fn registry_position_state_callback() {
        let registry = CallbackRegistry::new();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let id = registry.on_position_state_changed(move |_state| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(registry.callback_count(), 1);

        registry.dispatch(&StateChange::PositionState(PositionState::Increasing));
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        assert!(registry.unsubscribe(id));
        assert!(registry.is_empty());

        registry.dispatch(&StateChange::PositionState(PositionState::Stopped));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn registry_target_callback_receives_value() {
        let registry = CallbackRegistry::new();
        let received = Arc::new(RwLock::new(None::<Position>));
        let received_clone = received.clone();

        registry.on_target_position_changed(move |position| {
            *received_clone.write() = Some(position);
        });

        let target = Position::new(30).unwrap();
        registry.dispatch(&StateChange::move_started(target, PositionState::Decreasing));

        assert_eq!(*received.read(), Some(target));
    }

    #[test]
    fn registry_batch_dispatch() {
        let registry = CallbackRegistry::new();
        let generic = Arc::new(AtomicU32::new(0));
        let typed = Arc::new(AtomicU32::new(0));

        let generic_clone = generic.clone();
        registry.on_state_changed(move |_| {
            generic_clone.fetch_add(1, Ordering::SeqCst);
        });
        let typed_clone = typed.clone();
        registry.on_current_position_changed(move |_| {
            typed_clone.fetch_add(1, Ordering::SeqCst);
        });
        let typed_clone = typed.clone();
        registry.on_position_state_changed(move |_| {
            typed_clone.fetch_add(1, Ordering::SeqCst);
        });

        registry.dispatch(&StateChange::move_finished(Position::CLOSED));

        // Generic callback sees the batch once, typed callbacks see each part
        assert_eq!(generic.load(Ordering::SeqCst), 1);
        assert_eq!(typed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unsubscribe_unknown_returns_false() {
        let registry = CallbackRegistry::new();
        assert!(!registry.unsubscribe(SubscriptionId::new(999)));
    }

    #[test]
    fn clear_removes_everything() {
        let registry = CallbackRegistry::new();
        registry.on_state_changed(|_| {});
        registry.on_target_position_changed(|_| {});
        assert_eq!(registry.callback_count(), 2);

        registry.clear();
        assert!(registry.is_empty());
    }
}
