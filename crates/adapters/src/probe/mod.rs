// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Presence probes: is a device reachable right now?

mod ping;
mod simulated;

pub use ping::PingProbe;
pub use simulated::SimulatedProbe;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeProbe, ProbeCall};

use std::sync::Arc;
use thiserror::Error;

/// Errors from presence probes
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("invalid address: {0:?}")]
    InvalidAddress(String),
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{address} unreachable: {reason}")]
    Unreachable { address: String, reason: String },
}

/// Checks whether a device answers at an address.
///
/// `Ok(false)` means the device is simply not there. `Err` means the check
/// itself could not be carried out; callers treat that as not present.
pub trait PresenceProbe: Send + Sync + 'static {
    fn probe(&self, address: &str) -> Result<bool, ProbeError>;
}

impl<P: PresenceProbe + ?Sized> PresenceProbe for Arc<P> {
    fn probe(&self, address: &str) -> Result<bool, ProbeError> {
        (**self).probe(address)
    }
}

impl<P: PresenceProbe + ?Sized> PresenceProbe for Box<P> {
    fn probe(&self, address: &str) -> Result<bool, ProbeError> {
        (**self).probe(address)
    }
}
