// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cooperative cancellation shared between the control loop and pollers

use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

#[derive(Default)]
struct Flag {
    cancelled: Mutex<bool>,
    signal: Condvar,
}

/// A cloneable cancellation token.
///
/// Every loop checks `is_cancelled` at the top of each iteration and sleeps
/// through `wait_timeout`, which wakes immediately on `cancel`.
#[derive(Clone, Default)]
pub struct Cancellation {
    flag: Arc<Flag>,
}

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation and wake every waiter
    pub fn cancel(&self) {
        let mut cancelled = self
            .flag
            .cancelled
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        *cancelled = true;
        self.flag.signal.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self
            .flag
            .cancelled
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    /// Block for up to `timeout`. Returns true if cancelled.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let cancelled = self
            .flag
            .cancelled
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let (cancelled, _) = self
            .flag
            .signal
            .wait_timeout_while(cancelled, timeout, |cancelled| !*cancelled)
            .unwrap_or_else(|e| e.into_inner());
        *cancelled
    }
}

impl std::fmt::Debug for Cancellation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cancellation")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

#[cfg(test)]
#[path = "cancel_tests.rs"]
mod tests;
