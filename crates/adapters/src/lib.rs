// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: presence probes and device drivers

pub mod device;
pub mod probe;
pub mod traced;

pub use device::{
    Device, DeviceError, DeviceFactory, DriverError, DriverRegistry, HueLight, NetworkSwitch,
    SwitchModel,
};
pub use probe::{PingProbe, PresenceProbe, ProbeError, SimulatedProbe};
pub use traced::{TracedDevice, TracedProbe};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use device::{DeviceCall, FakeDevice};
#[cfg(any(test, feature = "test-support"))]
pub use probe::{FakeProbe, ProbeCall};
