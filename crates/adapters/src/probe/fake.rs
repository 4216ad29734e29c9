// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake presence probe for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{PresenceProbe, ProbeError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Recorded probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeCall {
    pub address: String,
}

#[derive(Debug, Clone)]
enum Answer {
    Present(bool),
    Fail(String),
}

/// Calls kept by [`FakeProbe::calls`]; later probes are only counted
pub const MAX_RECORDED_CALLS: usize = 1024;

#[derive(Default)]
struct FakeProbeState {
    answers: HashMap<String, Answer>,
    calls: Vec<ProbeCall>,
    call_count: usize,
}

/// Fake probe with scripted answers per address. Unknown addresses are absent.
#[derive(Clone, Default)]
pub struct FakeProbe {
    state: Arc<Mutex<FakeProbeState>>,
}

impl FakeProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `present` for `address` from now on
    pub fn set_present(&self, address: &str, present: bool) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .answers
            .insert(address.to_string(), Answer::Present(present));
    }

    /// Fail every probe of `address` with an unreachable error
    pub fn set_failing(&self, address: &str, reason: &str) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .answers
            .insert(address.to_string(), Answer::Fail(reason.to_string()));
    }

    /// Total probes made, including ones past the recording cap
    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).call_count
    }

    /// Get the first [`MAX_RECORDED_CALLS`] recorded probes
    pub fn calls(&self) -> Vec<ProbeCall> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }
}

impl PresenceProbe for FakeProbe {
    fn probe(&self, address: &str) -> Result<bool, ProbeError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.call_count += 1;
        if state.calls.len() < MAX_RECORDED_CALLS {
            state.calls.push(ProbeCall {
                address: address.to_string(),
            });
        }
        match state.answers.get(address) {
            Some(Answer::Present(present)) => Ok(*present),
            Some(Answer::Fail(reason)) => Err(ProbeError::Unreachable {
                address: address.to_string(),
                reason: reason.clone(),
            }),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
