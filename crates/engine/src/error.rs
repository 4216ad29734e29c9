// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the control engine

use homer_adapters::{DeviceError, DriverError};
use homer_core::ScheduleError;
use thiserror::Error;

/// Errors building or querying the device manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("{device} requires a {kind} driver in order to be managed")]
    MissingDeviceClass { device: String, kind: String },
    #[error("{device} is misconfigured: {reason}")]
    MisconfiguredDevice { device: String, reason: String },
    #[error("{0} is not a managed device")]
    NotManaged(String),
}

impl ManifestError {
    /// Map a driver construction failure for `device` onto the manifest taxonomy
    pub(crate) fn from_driver(device: &str, error: DriverError) -> Self {
        match error {
            DriverError::UnknownKind(kind) => ManifestError::MissingDeviceClass {
                device: device.to_string(),
                kind,
            },
            other => ManifestError::MisconfiguredDevice {
                device: device.to_string(),
                reason: other.to_string(),
            },
        }
    }
}

/// Errors from running an action
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    #[error(transparent)]
    Device(#[from] DeviceError),
    #[error("{failed} of {total} device commands failed: {first}")]
    Batch {
        failed: usize,
        total: usize,
        first: Box<ActionError>,
    },
}

/// Errors assembling the control loop
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    #[error("invalid poll schedule: {0}")]
    Schedule(#[from] ScheduleError),
    #[error("monitored device {0} has no address")]
    NoAddress(String),
    #[error("failed to start poller thread: {0}")]
    Spawn(#[source] std::io::Error),
}
