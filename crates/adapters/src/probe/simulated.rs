// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Random presence for running without network access

use super::{PresenceProbe, ProbeError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Reports a device present on roughly one probe in four
#[derive(Debug)]
pub struct SimulatedProbe {
    rng: Mutex<StdRng>,
}

impl SimulatedProbe {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic sequence for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for SimulatedProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl PresenceProbe for SimulatedProbe {
    fn probe(&self, _address: &str) -> Result<bool, ProbeError> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        Ok(rng.gen_range(0..4) == 3)
    }
}
