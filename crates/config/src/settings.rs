// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration schema

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ConfigError;

/// Top-level configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HomerConfig {
    pub general: GeneralConfig,
    pub devices: DevicesConfig,
    /// Device catalog, keyed by device name
    #[serde(default, rename = "device")]
    pub catalog: BTreeMap<String, DeviceDef>,
    /// Batch actions, keyed by action id
    #[serde(default, rename = "action")]
    pub actions: BTreeMap<String, ActionDef>,
}

/// `[general]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Rules file, relative to the configuration file
    pub rules: PathBuf,
    /// How often monitored devices are probed
    #[serde(default = "default_poll_period", with = "humantime_serde")]
    pub poll_period: Duration,
    /// Pause between control cycles
    #[serde(default = "default_cycle_interval", with = "humantime_serde")]
    pub cycle_interval: Duration,
    /// Upper bound on a single presence probe
    #[serde(default = "default_probe_timeout", with = "humantime_serde")]
    pub probe_timeout: Duration,
    /// Poll on a dedicated thread instead of inside the control loop
    #[serde(default)]
    pub background_poll: bool,
}

fn default_poll_period() -> Duration {
    Duration::from_secs(15)
}

fn default_cycle_interval() -> Duration {
    Duration::from_secs(5)
}

fn default_probe_timeout() -> Duration {
    Duration::from_secs(1)
}

/// `[devices]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DevicesConfig {
    /// Devices whose presence is polled
    #[serde(default)]
    pub monitored: Vec<String>,
    /// Devices the system may switch
    #[serde(default)]
    pub managed: Vec<String>,
    #[serde(default)]
    pub rooms: Vec<String>,
}

/// A `[device.<name>]` catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceDef {
    pub address: String,
    #[serde(default)]
    pub room: Option<String>,
    /// Driver kind tag, e.g. "Feibit" or "Hue"
    pub kind: String,
}

/// An `[action.<id>]` batch of device commands
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionDef {
    #[serde(default)]
    pub turn_on: Vec<String>,
    #[serde(default)]
    pub turn_off: Vec<String>,
}

impl HomerConfig {
    /// Catalog entry for `name`
    pub fn device(&self, name: &str) -> Option<&DeviceDef> {
        self.catalog.get(name)
    }

    /// Address of a catalogued device
    pub fn address(&self, name: &str) -> Option<&str> {
        self.catalog.get(name).map(|d| d.address.as_str())
    }

    /// Rules file path, resolved against the directory of `config_path`
    pub fn rules_path(&self, config_path: &Path) -> PathBuf {
        if self.general.rules.is_absolute() {
            return self.general.rules.clone();
        }
        config_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(&self.general.rules)
    }

    /// Check cross-references the schema alone cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        let general = &self.general;
        for (field, value) in [
            ("general.poll_period", general.poll_period),
            ("general.cycle_interval", general.cycle_interval),
            ("general.probe_timeout", general.probe_timeout),
        ] {
            if value.is_zero() {
                return Err(invalid(format!("{} must be positive", field)));
            }
        }

        check_list("devices.monitored", &self.devices.monitored, |name| {
            self.catalog.contains_key(name)
        })?;
        check_list("devices.managed", &self.devices.managed, |name| {
            self.catalog.contains_key(name)
        })?;

        if !self.devices.rooms.is_empty() {
            for (name, device) in &self.catalog {
                if let Some(room) = &device.room {
                    if !self.devices.rooms.contains(room) {
                        return Err(invalid(format!(
                            "device.{}.room: {:?} is not listed in devices.rooms",
                            name, room
                        )));
                    }
                }
            }
        }

        for (id, action) in &self.actions {
            let is_managed = |name: &str| self.devices.managed.iter().any(|m| m == name);
            check_list(&format!("action.{}.turn_on", id), &action.turn_on, is_managed)?;
            check_list(&format!("action.{}.turn_off", id), &action.turn_off, is_managed)?;
        }

        Ok(())
    }
}

/// Every entry must be known and appear once
fn check_list(
    field: &str,
    names: &[String],
    known: impl Fn(&str) -> bool,
) -> Result<(), ConfigError> {
    let mut seen = BTreeSet::new();
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(invalid(format!("{}: {:?} listed twice", field, name)));
        }
        if !known(name) {
            return Err(invalid(format!("{}: unknown device {:?}", field, name)));
        }
    }
    Ok(())
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
