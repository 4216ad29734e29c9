// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake device for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Device, DeviceError};
use std::sync::{Arc, Mutex};

/// Recorded hardware command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCall {
    TurnOn,
    TurnOff,
}

#[derive(Default)]
struct FakeDeviceState {
    on: bool,
    calls: Vec<DeviceCall>,
    failing: Option<String>,
}

/// Fake device recording every hardware command.
///
/// Clones share state, so a test can keep a handle after the device has been
/// moved into a manifest.
#[derive(Clone)]
pub struct FakeDevice {
    name: String,
    state: Arc<Mutex<FakeDeviceState>>,
}

impl FakeDevice {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            state: Arc::new(Mutex::new(FakeDeviceState::default())),
        }
    }

    /// Start in the given state without recording a command
    pub fn with_state(self, on: bool) -> Self {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).on = on;
        self
    }

    /// Make every later command fail
    pub fn set_failing(&self, reason: &str) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).failing = Some(reason.to_string());
    }

    /// Get all recorded commands
    pub fn calls(&self) -> Vec<DeviceCall> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    /// Number of recorded `turn_on` commands
    pub fn turn_on_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| **c == DeviceCall::TurnOn)
            .count()
    }

    /// Number of recorded `turn_off` commands
    pub fn turn_off_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| **c == DeviceCall::TurnOff)
            .count()
    }

    fn command(&self, call: DeviceCall) -> Result<(), DeviceError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(call);
        if let Some(reason) = &state.failing {
            return Err(DeviceError::CommandFailed {
                device: self.name.clone(),
                reason: reason.clone(),
            });
        }
        state.on = call == DeviceCall::TurnOn;
        Ok(())
    }
}

impl Device for FakeDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        "Fake"
    }

    fn turn_on(&mut self) -> Result<(), DeviceError> {
        self.command(DeviceCall::TurnOn)
    }

    fn turn_off(&mut self) -> Result<(), DeviceError> {
        self.command(DeviceCall::TurnOff)
    }

    fn state(&self) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).on
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
