// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Managed device drivers

mod hue;
mod registry;
mod switch;

pub use hue::HueLight;
pub use registry::{DeviceFactory, DriverRegistry};
pub use switch::{NetworkSwitch, SwitchModel};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{DeviceCall, FakeDevice};

use thiserror::Error;

/// Errors from commanding a device
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("{device}: command failed: {reason}")]
    CommandFailed { device: String, reason: String },
}

/// Errors creating a driver for a device
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DriverError {
    #[error("no driver for device kind {0:?}")]
    UnknownKind(String),
    #[error("{kind} cannot use address {address:?}: {reason}")]
    BadAddress {
        kind: String,
        address: String,
        reason: String,
    },
}

/// A device that can be switched on and off.
///
/// `state` reports the last commanded value, not a fresh reading.
pub trait Device: Send {
    fn name(&self) -> &str;

    /// Driver kind tag, as used in configuration
    fn kind(&self) -> &str;

    fn turn_on(&mut self) -> Result<(), DeviceError>;

    fn turn_off(&mut self) -> Result<(), DeviceError>;

    fn state(&self) -> bool;
}
