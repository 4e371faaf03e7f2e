// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Characteristic handler registration table.
//!
//! The host resolves every GET or SET request through this table using the
//! (service, characteristic) pair it received over the wire.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::{CharacteristicType, CharacteristicValue, HapStatus, ServiceType};

/// Boxed future returned by SET handlers.
pub type SetFuture = Pin<Box<dyn Future<Output = Result<(), HapStatus>> + Send>>;

type GetHandler = Arc<dyn Fn() -> Result<CharacteristicValue, HapStatus> + Send + Sync>;

type SetHandler = Arc<dyn Fn(CharacteristicValue) -> SetFuture + Send + Sync>;

#[derive(Default)]
struct Handlers {
    get: Option<GetHandler>,
    set: Option<SetHandler>,
}

/// Registration table mapping (service, characteristic) to handlers.
///
/// # Examples
///
/// ```
/// use blinds_lib::hap::{
///     CharacteristicRegistry, CharacteristicType, CharacteristicValue, HapStatus, ServiceType,
/// };
///
/// # async fn example() {
/// let mut registry = CharacteristicRegistry::new();
/// registry
///     .on_get(ServiceType::WindowCovering, CharacteristicType::CurrentPosition, || {
///         Ok(CharacteristicValue::Int(100))
///     });
///
/// let value = registry
///     .get(ServiceType::WindowCovering, CharacteristicType::CurrentPosition)
///     .unwrap();
/// assert_eq!(value, CharacteristicValue::Int(100));
///
/// let denied = registry
///     .set(
///         ServiceType::WindowCovering,
///         CharacteristicType::CurrentPosition,
///         CharacteristicValue::Int(5),
///     )
///     .await;
/// assert_eq!(denied, Err(HapStatus::ReadOnlyCharacteristic));
/// # }
/// ```
#[derive(Default)]
pub struct CharacteristicRegistry {
    handlers: HashMap<(ServiceType, CharacteristicType), Handlers>,
}

impl CharacteristicRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the GET handler for a characteristic, replacing any
    /// previous one.
    pub fn on_get<F>(
        &mut self,
        service: ServiceType,
        characteristic: CharacteristicType,
        handler: F,
    ) -> &mut Self
    where
        F: Fn() -> Result<CharacteristicValue, HapStatus> + Send + Sync + 'static,
    {
        self.handlers
            .entry((service, characteristic))
            .or_default()
            .get = Some(Arc::new(handler));
        self
    }

    /// Registers the SET handler for a characteristic, replacing any
    /// previous one.
    pub fn on_set<F, Fut>(
        &mut self,
        service: ServiceType,
        characteristic: CharacteristicType,
        handler: F,
    ) -> &mut Self
    where
        F: Fn(CharacteristicValue) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HapStatus>> + Send + 'static,
    {
        let handler: SetHandler = Arc::new(move |value| -> SetFuture { Box::pin(handler(value)) });
        self.handlers
            .entry((service, characteristic))
            .or_default()
            .set = Some(handler);
        self
    }

    /// Registers a characteristic whose value never changes.
    pub fn set_static(
        &mut self,
        service: ServiceType,
        characteristic: CharacteristicType,
        value: impl Into<CharacteristicValue>,
    ) -> &mut Self {
        let value = value.into();
        self.on_get(service, characteristic, move || Ok(value.clone()))
    }

    /// Answers a GET request from the host.
    ///
    /// # Errors
    ///
    /// Returns `ResourceDoesNotExist` for unknown characteristics,
    /// `WriteOnlyCharacteristic` if the characteristic is not readable or
    /// only a SET handler is registered, or whatever status the handler
    /// itself returns.
    pub fn get(
        &self,
        service: ServiceType,
        characteristic: CharacteristicType,
    ) -> Result<CharacteristicValue, HapStatus> {
        let handlers = self
            .handlers
            .get(&(service, characteristic))
            .ok_or(HapStatus::ResourceDoesNotExist)?;
        if !characteristic.perms().read {
            return Err(HapStatus::WriteOnlyCharacteristic);
        }
        let get = handlers
            .get
            .as_ref()
            .ok_or(HapStatus::WriteOnlyCharacteristic)?;
        get()
    }

    /// Answers a SET request from the host.
    ///
    /// # Errors
    ///
    /// Returns `ResourceDoesNotExist` for unknown characteristics,
    /// `ReadOnlyCharacteristic` if the characteristic is not writable or no
    /// SET handler is registered, or whatever status the handler itself
    /// returns.
    pub async fn set(
        &self,
        service: ServiceType,
        characteristic: CharacteristicType,
        value: CharacteristicValue,
    ) -> Result<(), HapStatus> {
        let handlers = self
            .handlers
            .get(&(service, characteristic))
            .ok_or(HapStatus::ResourceDoesNotExist)?;
        if !characteristic.perms().write {
            return Err(HapStatus::ReadOnlyCharacteristic);
        }
        let set = handlers
            .set
            .clone()
            .ok_or(HapStatus::ReadOnlyCharacteristic)?;
        set(value).await
    }

    /// Returns `true` if any handler is registered for the pair.
    #[must_use]
    pub fn contains(&self, service: ServiceType, characteristic: CharacteristicType) -> bool {
        self.handlers.contains_key(&(service, characteristic))
    }

    /// Returns the characteristics registered on a service.
    #[must_use]
    pub fn characteristics(&self, service: ServiceType) -> Vec<CharacteristicType> {
        self.handlers
            .keys()
            .filter(|(s, _)| *s == service)
            .map(|(_, c)| *c)
            .collect()
    }

    /// Returns the number of registered characteristics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for CharacteristicRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharacteristicRegistry")
            .field("characteristics", &self.handlers.len())
            .finish()
    }
}
