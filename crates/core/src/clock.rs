// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling

use crate::cancel::Cancellation;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A clock that provides the current time and a cancellable pause
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> Instant;

    /// Pause for up to `duration`, returning early once `cancel` fires.
    ///
    /// Returns true if the pause ended because of cancellation.
    fn pause(&self, duration: Duration, cancel: &Cancellation) -> bool;
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn pause(&self, duration: Duration, cancel: &Cancellation) -> bool {
        cancel.wait_timeout(duration)
    }
}

#[derive(Debug)]
struct FakeTime {
    current: Instant,
    pauses: Vec<Duration>,
}

/// Fake clock for testing with controllable time
///
/// `pause` never blocks: it advances the clock by the requested duration and
/// records it, so loops driven by a fake clock run at full speed.
#[derive(Clone)]
pub struct FakeClock {
    time: Arc<Mutex<FakeTime>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            time: Arc::new(Mutex::new(FakeTime {
                current: Instant::now(),
                pauses: Vec::new(),
            })),
        }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut time = self.time.lock().unwrap_or_else(|e| e.into_inner());
        time.current += duration;
    }

    /// Set the clock to a specific instant
    pub fn set(&self, instant: Instant) {
        let mut time = self.time.lock().unwrap_or_else(|e| e.into_inner());
        time.current = instant;
    }

    /// Every pause requested so far, in order
    pub fn pauses(&self) -> Vec<Duration> {
        self.time
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pauses
            .clone()
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.time.lock().unwrap_or_else(|e| e.into_inner()).current
    }

    fn pause(&self, duration: Duration, cancel: &Cancellation) -> bool {
        {
            let mut time = self.time.lock().unwrap_or_else(|e| e.into_inner());
            time.current += duration;
            time.pauses.push(duration);
        }
        cancel.is_cancelled()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
