// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshots consumed by rule evaluation

use std::collections::BTreeMap;
use std::fmt;

/// Presence of monitored devices at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollCall(BTreeMap<String, bool>);

impl RollCall {
    pub fn new() -> Self {
        Self::default()
    }

    /// True only if `name` was polled and found. Unpolled names are absent.
    pub fn is_present(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    /// The polled value for `name`, if it has been polled at all
    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.get(name).copied()
    }

    pub fn present(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, present)| **present)
            .map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(name, present)| (name.as_str(), *present))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, bool)> for RollCall {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(&'a str, bool)> for RollCall {
    fn from_iter<I: IntoIterator<Item = (&'a str, bool)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, present)| (name.to_string(), present))
                .collect(),
        )
    }
}

impl fmt::Display for RollCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, present)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", name, present)?;
        }
        f.write_str("}")
    }
}

/// Last commanded on/off state of each managed device
pub type DeviceStates = BTreeMap<String, bool>;

/// Everything a rule may look at during one control cycle
#[derive(Debug, Clone, Copy)]
pub struct Facts<'a> {
    pub roll_call: &'a RollCall,
    pub devices: &'a DeviceStates,
}

impl<'a> Facts<'a> {
    pub fn new(roll_call: &'a RollCall, devices: &'a DeviceStates) -> Self {
        Self { roll_call, devices }
    }

    /// Commanded state of a managed device; `None` if it is not managed
    pub fn device_on(&self, name: &str) -> Option<bool> {
        self.devices.get(name).copied()
    }
}

/// Name of an action in the action registry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(pub String);

impl ActionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ActionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[cfg(test)]
#[path = "roll_call_tests.rs"]
mod tests;
