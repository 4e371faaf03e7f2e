// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for platform discovery and the shared event bus.

use std::time::Duration;

use blinds_lib::hap::{CharacteristicType, CharacteristicValue, ServiceType};
use blinds_lib::platform::{
    AccessoryContext, CachedAccessory, DeviceEntry, Platform, PlatformConfig,
};
use blinds_lib::{AccessoryEvent, AccessoryId, PositionState};
use tokio::sync::broadcast;

fn cached(unique_id: &str, name: &str) -> CachedAccessory {
    CachedAccessory {
        id: AccessoryId::from_unique_id(unique_id),
        display_name: name.to_string(),
        context: AccessoryContext {
            device: DeviceEntry::new(unique_id, name),
        },
    }
}

fn drain(events: &mut broadcast::Receiver<AccessoryEvent>) -> Vec<AccessoryEvent> {
    let mut received = Vec::new();
    while let Ok(event) = events.try_recv() {
        received.push(event);
    }
    received
}

#[tokio::test(start_paused = true)]
async fn registers_default_devices() {
    let mut platform = Platform::new(PlatformConfig::default());
    let mut events = platform.subscribe();

    let ids = platform.discover_devices();

    assert_eq!(
        ids,
        vec![
            AccessoryId::from_unique_id("ABCD"),
            AccessoryId::from_unique_id("EFGH"),
        ]
    );
    assert_eq!(platform.accessory_count(), 2);
    assert_eq!(
        drain(&mut events),
        vec![
            AccessoryEvent::Registered {
                accessory_id: ids[0],
                display_name: "Bedroom".to_string(),
            },
            AccessoryEvent::Registered {
                accessory_id: ids[1],
                display_name: "Kitchen".to_string(),
            },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn restores_cached_and_unregisters_stale() {
    let config = PlatformConfig::default().with_devices(vec![
        DeviceEntry::new("ABCD", "Bedroom"),
        DeviceEntry::new("IJKL", "Office"),
    ]);
    let mut platform = Platform::new(config);
    platform.configure_accessory(cached("ABCD", "Bedroom"));
    platform.configure_accessory(cached("EFGH", "Kitchen"));
    let mut events = platform.subscribe();

    let ids = platform.discover_devices();

    assert_eq!(ids.len(), 2);
    assert!(platform.accessory(AccessoryId::from_unique_id("EFGH")).is_none());
    assert_eq!(
        drain(&mut events),
        vec![
            AccessoryEvent::Restored {
                accessory_id: AccessoryId::from_unique_id("ABCD"),
                display_name: "Bedroom".to_string(),
            },
            AccessoryEvent::Registered {
                accessory_id: AccessoryId::from_unique_id("IJKL"),
                display_name: "Office".to_string(),
            },
            AccessoryEvent::Unregistered {
                accessory_id: AccessoryId::from_unique_id("EFGH"),
            },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn restored_accessory_takes_configured_name() {
    let config = PlatformConfig::default().with_devices(vec![DeviceEntry::new("ABCD", "Nursery")]);
    let mut platform = Platform::new(config);
    platform.configure_accessory(cached("ABCD", "Bedroom"));

    let ids = platform.discover_devices();
    let accessory = platform.accessory(ids[0]).unwrap();

    assert_eq!(accessory.display_name(), "Nursery");
    assert_eq!(accessory.information().name, "Nursery");
    assert_eq!(accessory.covering().name(), "Nursery");
}

#[tokio::test(start_paused = true)]
async fn rediscovery_with_cache_entries_keeps_running_accessories() {
    let mut platform = Platform::new(PlatformConfig::default());
    let ids = platform.discover_devices();
    let mut events = platform.subscribe();

    for entry in platform.cached_accessories() {
        platform.configure_accessory(entry);
    }
    let again = platform.discover_devices();

    assert_eq!(again, ids);
    assert_eq!(platform.accessory_count(), 2);
    assert!(drain(&mut events).is_empty());
}

#[tokio::test(start_paused = true)]
async fn cache_entry_for_running_accessory_is_not_reported_stale() {
    let config = PlatformConfig::default().with_devices(vec![DeviceEntry::new("ABCD", "Bedroom")]);
    let mut platform = Platform::new(config);
    let ids = platform.discover_devices();
    let mut events = platform.subscribe();

    platform.configure_accessory(cached("ABCD", "Bedroom"));
    platform.discover_devices();

    assert!(platform.accessory(ids[0]).unwrap().covering().is_responsive());
    assert!(!platform.accessory(ids[0]).unwrap().covering().is_closed());
    assert!(drain(&mut events).is_empty());
}

#[tokio::test(start_paused = true)]
async fn identifiers_are_stable_across_restarts() {
    let mut first = Platform::new(PlatformConfig::default());
    let first_ids = first.discover_devices();
    first.shutdown();

    let mut second = Platform::new(PlatformConfig::default());
    let second_ids = second.discover_devices();

    assert_eq!(first_ids, second_ids);
}

#[tokio::test(start_paused = true)]
async fn state_changes_reach_the_event_bus() {
    let config = PlatformConfig::default().with_devices(vec![DeviceEntry::new("ABCD", "Bedroom")]);
    let mut platform = Platform::new(config);
    let ids = platform.discover_devices();
    let mut events = platform.subscribe();

    let accessory = platform.accessory(ids[0]).unwrap();
    accessory
        .registry()
        .set(
            ServiceType::WindowCovering,
            CharacteristicType::TargetPosition,
            CharacteristicValue::Int(80),
        )
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(1001)).await;

    let received = drain(&mut events);
    assert_eq!(received.len(), 2);
    assert!(received.iter().all(|e| e.is_state_change() && e.accessory_id() == ids[0]));

    match &received[0] {
        AccessoryEvent::StateChanged { change, new_state, .. } => {
            assert_eq!(change.change_count(), 2);
            assert_eq!(new_state.position_state(), PositionState::Increasing);
        }
        other => panic!("unexpected event {other:?}"),
    }
    match &received[1] {
        AccessoryEvent::StateChanged { change, new_state, .. } => {
            assert!(change.is_batch());
            assert_eq!(new_state.current_position().value(), 80);
            assert!(new_state.is_settled());
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_coverings() {
    let mut platform = Platform::new(PlatformConfig::default());
    let ids = platform.discover_devices();
    let covering = platform.accessory(ids[0]).unwrap().covering().clone();

    platform.shutdown();
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert_eq!(platform.accessory_count(), 0);
    assert!(covering.is_closed());
    assert!(matches!(
        covering.set_target_position(blinds_lib::Position::CLOSED).await,
        Err(blinds_lib::Error::AccessoryClosed)
    ));
}
