// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Simulated window covering.
//!
//! The state is owned by one tokio task. Target requests and timer
//! completions reach it as messages; every new state is published on a
//! watch channel, which is what the getters read.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::{AbortHandle, JoinSet};

use crate::error::{Error, Result};
use crate::event::{AccessoryEvent, AccessoryId, EventBus};
use crate::hap::HapStatus;
use crate::state::{AccessoryState, StateChange};
use crate::subscription::{CallbackRegistry, Subscribable, SubscriptionId};
use crate::types::{Position, PositionState};

use super::config::{CoveringConfig, MotionPolicy};

enum Command {
    SetTarget {
        target: Position,
        applied: oneshot::Sender<()>,
    },
    MoveFinished {
        generation: u64,
        target: Position,
    },
    Shutdown,
}

struct Shared {
    name: String,
    commands: mpsc::UnboundedSender<Command>,
    state_rx: watch::Receiver<AccessoryState>,
    callbacks: Arc<CallbackRegistry>,
    responsive: AtomicBool,
}

/// Handle to a simulated window covering.
///
/// Handles are cheap to clone. The accessory task stops when the last
/// handle is dropped or [`shutdown`](Self::shutdown) is called.
///
/// # Examples
///
/// ```no_run
/// use blinds_lib::accessory::{CoveringConfig, WindowCovering};
/// use blinds_lib::types::{Position, PositionState};
///
/// #[tokio::main]
/// async fn main() -> blinds_lib::Result<()> {
///     let covering = WindowCovering::spawn("Bedroom", CoveringConfig::default());
///
///     covering.set_target_position(Position::new(30)?).await?;
///     assert_eq!(covering.position_state(), PositionState::Decreasing);
///     assert_eq!(covering.current_position(), Position::OPEN);
///
///     tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
///     assert_eq!(covering.current_position(), Position::new(30)?);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct WindowCovering {
    shared: Arc<Shared>,
}

impl WindowCovering {
    /// Starts a window covering in its initial state (open, stopped).
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    #[must_use]
    pub fn spawn(name: impl Into<String>, config: CoveringConfig) -> Self {
        Self::start(name.into(), config, None)
    }

    /// Starts a window covering that also reports its changes on an
    /// event bus.
    #[must_use]
    pub(crate) fn spawn_with_events(
        name: String,
        config: CoveringConfig,
        accessory_id: AccessoryId,
        events: EventBus,
    ) -> Self {
        Self::start(name, config, Some((accessory_id, events)))
    }

    fn start(
        name: String,
        config: CoveringConfig,
        events: Option<(AccessoryId, EventBus)>,
    ) -> Self {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let state = AccessoryState::new();
        let (state_tx, state_rx) = watch::channel(state);
        let callbacks = Arc::new(CallbackRegistry::new());

        let task = CoveringTask {
            name: name.clone(),
            config,
            state,
            state_tx,
            commands: command_rx,
            completions: commands.downgrade(),
            callbacks: Arc::clone(&callbacks),
            events,
            generation: 0,
            timers: JoinSet::new(),
            pending: None,
        };
        tokio::spawn(task.run());

        tracing::debug!(accessory = %name, ?config, "Window covering started");

        Self {
            shared: Arc::new(Shared {
                name,
                commands,
                state_rx,
                callbacks,
                responsive: AtomicBool::new(true),
            }),
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Returns the last settled position.
    #[must_use]
    pub fn current_position(&self) -> Position {
        let value = self.shared.state_rx.borrow().current_position();
        tracing::debug!(accessory = %self.shared.name, %value, "Get Characteristic CurrentPosition");
        value
    }

    /// Returns the motion direction.
    #[must_use]
    pub fn position_state(&self) -> PositionState {
        let value = self.shared.state_rx.borrow().position_state();
        tracing::debug!(accessory = %self.shared.name, %value, "Get Characteristic PositionState");
        value
    }

    /// Returns the requested destination.
    #[must_use]
    pub fn target_position(&self) -> Position {
        let value = self.shared.state_rx.borrow().target_position();
        tracing::debug!(accessory = %self.shared.name, %value, "Get Characteristic TargetPosition");
        value
    }

    /// Returns a snapshot of the whole state.
    #[must_use]
    pub fn state(&self) -> AccessoryState {
        *self.shared.state_rx.borrow()
    }

    /// Returns a receiver notified on every state change.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<AccessoryState> {
        self.shared.state_rx.clone()
    }

    /// Requests a move to `target`.
    ///
    /// Returns once the target and direction are applied; the move itself
    /// completes after the configured movement delay.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AccessoryClosed`] if the accessory has shut down.
    pub async fn set_target_position(&self, target: Position) -> Result<()> {
        let (applied, done) = oneshot::channel();
        self.shared
            .commands
            .send(Command::SetTarget { target, applied })
            .map_err(|_| Error::AccessoryClosed)?;
        done.await.map_err(|_| Error::AccessoryClosed)
    }

    /// Marks the accessory as responding or not.
    ///
    /// While not responding, host requests are answered with
    /// [`HapStatus::ServiceCommunicationFailure`].
    pub fn set_responsive(&self, responsive: bool) {
        self.shared.responsive.store(responsive, Ordering::Relaxed);
        if !responsive {
            tracing::warn!(accessory = %self.shared.name, "Accessory marked as not responding");
        }
    }

    /// Returns `true` unless marked as not responding.
    #[must_use]
    pub fn is_responsive(&self) -> bool {
        self.shared.responsive.load(Ordering::Relaxed)
    }

    /// Returns the status a host request should fail with, if any.
    ///
    /// # Errors
    ///
    /// Returns [`HapStatus::ServiceCommunicationFailure`] while the
    /// accessory is marked as not responding.
    pub fn check_responsive(&self) -> std::result::Result<(), HapStatus> {
        if self.is_responsive() {
            Ok(())
        } else {
            Err(HapStatus::ServiceCommunicationFailure)
        }
    }

    /// Stops the accessory task. Pending moves never complete.
    pub fn shutdown(&self) {
        // Already stopped is fine
        let _ = self.shared.commands.send(Command::Shutdown);
    }

    /// Returns `true` once the accessory task has stopped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.shared.commands.is_closed()
    }
}

impl Subscribable for WindowCovering {
    fn on_current_position_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Position) + Send + Sync + 'static,
    {
        self.shared.callbacks.on_current_position_changed(callback)
    }

    fn on_position_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(PositionState) + Send + Sync + 'static,
    {
        self.shared.callbacks.on_position_state_changed(callback)
    }

    fn on_target_position_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Position) + Send + Sync + 'static,
    {
        self.shared.callbacks.on_target_position_changed(callback)
    }

    fn on_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StateChange) + Send + Sync + 'static,
    {
        self.shared.callbacks.on_state_changed(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.callbacks.unsubscribe(id)
    }
}

impl std::fmt::Debug for WindowCovering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowCovering")
            .field("name", &self.shared.name)
            .field("state", &*self.shared.state_rx.borrow())
            .field("responsive", &self.is_responsive())
            .finish_non_exhaustive()
    }
}

/// The task owning an accessory's state.
struct CoveringTask {
    name: String,
    config: CoveringConfig,
    state: AccessoryState,
    state_tx: watch::Sender<AccessoryState>,
    commands: mpsc::UnboundedReceiver<Command>,
    /// Weak so that pending timers do not keep the task alive.
    completions: mpsc::WeakUnboundedSender<Command>,
    callbacks: Arc<CallbackRegistry>,
    events: Option<(AccessoryId, EventBus)>,
    /// Bumped on every target request.
    generation: u64,
    timers: JoinSet<()>,
    /// Most recent completion timer, aborted under `Supersede`.
    pending: Option<AbortHandle>,
}

impl CoveringTask {
    async fn run(mut self) {
        while let Some(command) = self.commands.recv().await {
            // Reap finished timers
            while self.timers.try_join_next().is_some() {}

            match command {
                Command::SetTarget { target, applied } => {
                    self.start_move(target);
                    let _ = applied.send(());
                }
                Command::MoveFinished { generation, target } => {
                    self.finish_move(generation, target);
                }
                Command::Shutdown => break,
            }
        }

        self.timers.abort_all();
        tracing::debug!(accessory = %self.name, "Window covering stopped");
    }

    fn start_move(&mut self, target: Position) {
        let direction = self
            .config
            .direction
            .direction(self.state.current_position(), target);
        self.generation += 1;

        self.apply(StateChange::move_started(target, direction));
        tracing::debug!(
            accessory = %self.name,
            %target,
            %direction,
            "Set Characteristic TargetPosition"
        );

        if self.config.motion == MotionPolicy::Supersede
            && let Some(previous) = self.pending.take()
        {
            previous.abort();
        }

        if direction == PositionState::Stopped {
            // Already at the target, nothing to simulate
            return;
        }

        let completions = self.completions.clone();
        let delay = self.config.movement_delay;
        let generation = self.generation;
        let handle = self.timers.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(completions) = completions.upgrade() {
                let _ = completions.send(Command::MoveFinished { generation, target });
            }
        });
        self.pending = Some(handle);
    }

    fn finish_move(&mut self, generation: u64, scheduled_target: Position) {
        let settled = match self.config.motion {
            // Settles on whatever the target is now, not what it was when
            // this timer was armed.
            MotionPolicy::Independent => self.state.target_position(),
            MotionPolicy::Supersede => {
                if generation != self.generation {
                    tracing::trace!(accessory = %self.name, generation, "Ignoring superseded move");
                    return;
                }
                scheduled_target
            }
        };

        self.apply(StateChange::move_finished(settled));
        tracing::debug!(accessory = %self.name, position = %settled, "Blind finished moving.");
    }

    /// Applies a change and notifies watchers, subscribers and the event bus
    /// with the parts that actually changed anything.
    fn apply(&mut self, change: StateChange) {
        let mut applied: Vec<StateChange> = change
            .leaves()
            .into_iter()
            .filter(|leaf| self.state.apply(leaf))
            .cloned()
            .collect();

        let change = match applied.len() {
            0 => return,
            1 => applied.remove(0),
            _ => StateChange::Batch(applied),
        };

        self.state_tx.send_replace(self.state);
        self.callbacks.dispatch(&change);

        if let Some((accessory_id, events)) = &self.events {
            events.publish(AccessoryEvent::StateChanged {
                accessory_id: *accessory_id,
                change,
                new_state: self.state,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::accessory::DirectionRule;

    fn pos(value: u8) -> Position {
        Position::new(value).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn initial_state() {
        let covering = WindowCovering::spawn("Test", CoveringConfig::default());
        assert_eq!(covering.state(), AccessoryState::new());
        assert_eq!(covering.name(), "Test");
        assert!(covering.is_responsive());
    }

    #[tokio::test(start_paused = true)]
    async fn getters_do_not_mutate() {
        let covering = WindowCovering::spawn("Test", CoveringConfig::default());
        covering.set_target_position(pos(30)).await.unwrap();

        let before = covering.state();
        for _ in 0..3 {
            let _ = covering.current_position();
            let _ = covering.position_state();
            let _ = covering.target_position();
        }
        assert_eq!(covering.state(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn relative_direction_equal_target_stays_stopped() {
        let config = CoveringConfig::default()
            .with_direction(DirectionRule::RelativeToCurrent);
        let covering = WindowCovering::spawn("Test", config);

        covering.set_target_position(Position::OPEN).await.unwrap();
        assert_eq!(covering.position_state(), PositionState::Stopped);
        assert!(covering.state().is_settled());
    }

    #[tokio::test(start_paused = true)]
    async fn unresponsive_check() {
        let covering = WindowCovering::spawn("Test", CoveringConfig::default());
        covering.set_responsive(false);
        assert_eq!(
            covering.check_responsive(),
            Err(HapStatus::ServiceCommunicationFailure)
        );
        covering.set_responsive(true);
        assert!(covering.check_responsive().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_closes_accessory() {
        let covering = WindowCovering::spawn("Test", CoveringConfig::default());
        covering.set_target_position(pos(10)).await.unwrap();
        covering.shutdown();

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(covering.is_closed());
        assert!(matches!(
            covering.set_target_position(pos(20)).await,
            Err(Error::AccessoryClosed)
        ));

        // The pending move never completes
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(covering.current_position(), Position::OPEN);
    }

    #[tokio::test(start_paused = true)]
    async fn redundant_completion_is_not_dispatched() {
        let covering = WindowCovering::spawn("Test", CoveringConfig::default());
        let stops = Arc::new(std::sync::atomic::AtomicU32::new(0));
        let stops_clone = stops.clone();
        covering.on_position_state_changed(move |state| {
            if state == PositionState::Stopped {
                stops_clone.fetch_add(1, Ordering::SeqCst);
            }
        });

        covering.set_target_position(pos(20)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        covering.set_target_position(pos(90)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;

        // Second completion finds the state already settled
        assert_eq!(stops.load(Ordering::SeqCst), 1);
    }
}
