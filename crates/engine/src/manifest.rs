// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Device manifest: the registry that owns every managed device

use crate::error::{ActionError, ManifestError};
use homer_adapters::{Device, DriverRegistry};
use homer_config::HomerConfig;
use homer_core::DeviceStates;
use std::collections::BTreeMap;

/// Owns the managed devices and knows every catalogued address.
///
/// Devices are only mutated from the control thread, through actions.
#[derive(Default)]
pub struct Manifest {
    devices: BTreeMap<String, Box<dyn Device>>,
    addresses: BTreeMap<String, String>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build drivers for every managed device in `config`.
    ///
    /// Fails if a managed device is missing from the catalog, names a kind
    /// with no driver, or has an address its driver rejects.
    pub fn build(config: &HomerConfig, drivers: &DriverRegistry) -> Result<Self, ManifestError> {
        let mut manifest = Self::new();
        for (name, def) in &config.catalog {
            manifest.addresses.insert(name.clone(), def.address.clone());
        }

        for name in &config.devices.managed {
            let def = config
                .device(name)
                .ok_or_else(|| ManifestError::MisconfiguredDevice {
                    device: name.clone(),
                    reason: "not in the device catalog".to_string(),
                })?;
            let device = drivers
                .create(&def.kind, name, &def.address)
                .map_err(|e| ManifestError::from_driver(name, e))?;
            tracing::debug!(device = %name, kind = %def.kind, "managing device");
            manifest.devices.insert(name.clone(), device);
        }

        Ok(manifest)
    }

    /// Add a managed device directly
    pub fn insert(&mut self, address: &str, device: Box<dyn Device>) {
        let name = device.name().to_string();
        self.addresses.insert(name.clone(), address.to_string());
        self.devices.insert(name, device);
    }

    /// Record the address of a device that is monitored but not managed
    pub fn insert_address(&mut self, name: &str, address: &str) {
        self.addresses.insert(name.to_string(), address.to_string());
    }

    pub fn instance(&self, name: &str) -> Result<&dyn Device, ManifestError> {
        self.devices
            .get(name)
            .map(|d| d.as_ref())
            .ok_or_else(|| ManifestError::NotManaged(name.to_string()))
    }

    pub fn instance_mut(&mut self, name: &str) -> Result<&mut (dyn Device + 'static), ManifestError> {
        self.devices
            .get_mut(name)
            .map(|d| d.as_mut())
            .ok_or_else(|| ManifestError::NotManaged(name.to_string()))
    }

    /// Address of any catalogued device, managed or not
    pub fn address(&self, name: &str) -> Option<&str> {
        self.addresses.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.devices.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Last commanded state of every managed device
    pub fn states(&self) -> DeviceStates {
        self.devices
            .iter()
            .map(|(name, device)| (name.clone(), device.state()))
            .collect()
    }

    /// Turn `name` on unless it already is. Returns whether a command was sent.
    pub fn ensure_on(&mut self, name: &str) -> Result<bool, ActionError> {
        let device = self.instance_mut(name)?;
        if device.state() {
            tracing::debug!(device = %name, "already on");
            return Ok(false);
        }
        device.turn_on()?;
        Ok(true)
    }

    /// Turn `name` off unless it already is. Returns whether a command was sent.
    pub fn ensure_off(&mut self, name: &str) -> Result<bool, ActionError> {
        let device = self.instance_mut(name)?;
        if !device.state() {
            tracing::debug!(device = %name, "already off");
            return Ok(false);
        }
        device.turn_off()?;
        Ok(true)
    }
}

impl std::fmt::Debug for Manifest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manifest")
            .field("devices", &self.states())
            .field("addresses", &self.addresses)
            .finish()
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
