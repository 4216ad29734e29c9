// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Static driver registry: kind tag → device constructor

use super::{Device, DriverError, HueLight, NetworkSwitch, SwitchModel};
use crate::traced::TracedDevice;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Builds a device from its name and address
pub type DeviceFactory =
    Arc<dyn Fn(&str, &str) -> Result<Box<dyn Device>, DriverError> + Send + Sync>;

/// Maps configuration kind tags to driver constructors.
///
/// Resolved once while building the device manifest; a kind with no entry
/// cannot be managed.
#[derive(Clone, Default)]
pub struct DriverRegistry {
    factories: BTreeMap<String, DeviceFactory>,
}

impl DriverRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every driver shipped in this crate
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for model in [SwitchModel::Feibit, SwitchModel::Wemo, SwitchModel::SamsungTv] {
            registry.register(model.tag(), move |name, address| {
                Ok(Box::new(NetworkSwitch::new(model, name, address)?) as Box<dyn Device>)
            });
        }
        registry.register(HueLight::KIND, |name, address| {
            Ok(Box::new(HueLight::new(name, address)?) as Box<dyn Device>)
        });
        registry
    }

    /// Add or replace the constructor for `kind`
    pub fn register<F>(&mut self, kind: &str, factory: F)
    where
        F: Fn(&str, &str) -> Result<Box<dyn Device>, DriverError> + Send + Sync + 'static,
    {
        self.factories.insert(kind.to_string(), Arc::new(factory));
    }

    pub fn supports(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Construct a traced device of the given kind
    pub fn create(
        &self,
        kind: &str,
        name: &str,
        address: &str,
    ) -> Result<Box<dyn Device>, DriverError> {
        let factory = self
            .factories
            .get(kind)
            .ok_or_else(|| DriverError::UnknownKind(kind.to_string()))?;
        let device = factory(name, address)?;
        Ok(Box::new(TracedDevice::new(device)))
    }
}

impl std::fmt::Debug for DriverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.factories.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_knows_shipped_kinds() {
        let registry = DriverRegistry::builtin();
        assert_eq!(
            registry.kinds().collect::<Vec<_>>(),
            vec!["Feibit", "Hue", "SamsungTV", "Wemo"]
        );
        assert!(!registry.supports("mobile"));
    }

    #[test]
    fn create_builds_device_of_kind() {
        let registry = DriverRegistry::builtin();
        let device = registry.create("Wemo", "chargers", "192.168.1.243").unwrap();
        assert_eq!(device.name(), "chargers");
        assert_eq!(device.kind(), "Wemo");
        assert!(!device.state());
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let registry = DriverRegistry::builtin();
        let err = registry.create("mobile", "phone", "192.168.1.230").err();
        assert_eq!(err, Some(DriverError::UnknownKind("mobile".to_string())));
    }

    #[test]
    fn factory_address_errors_surface() {
        let registry = DriverRegistry::builtin();
        let err = registry.create("Hue", "lamp", "192.168.1.9").err();
        assert!(matches!(err, Some(DriverError::BadAddress { .. })));
    }

    #[test]
    fn custom_kinds_can_be_registered() {
        let mut registry = DriverRegistry::new();
        registry.register("Relay", |name, address| {
            Ok(Box::new(NetworkSwitch::new(SwitchModel::Wemo, name, address)?) as Box<dyn Device>)
        });
        assert!(registry.supports("Relay"));
        assert!(registry.create("Relay", "pump", "10.0.0.5").is_ok());
    }
}
