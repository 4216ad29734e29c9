// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Drift-correcting periodic tasks
//!
//! A [`PeriodicTask`] measures every deadline from its start time rather than
//! from its previous firing, so execution jitter never accumulates. When a
//! check arrives late and several periods have elapsed, the task fires once and
//! the skipped periods are only counted.

use crate::cancel::Cancellation;
use crate::clock::Clock;
use std::convert::Infallible;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Boxed zero-argument action run when a task is due
pub type TaskAction<E> = Box<dyn FnMut() -> Result<(), E> + Send>;

/// Errors constructing a periodic task
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("period must be positive")]
    ZeroPeriod,
}

/// A task fired at a fixed period, measured from its start time
pub struct PeriodicTask<E = Infallible> {
    name: Option<String>,
    period: Duration,
    start: Instant,
    last_fire: Option<Instant>,
    fire_count: u64,
    action: TaskAction<E>,
}

impl<E> PeriodicTask<E> {
    /// Create a task whose first deadline is one `period` after `now`
    pub fn new<F>(period: Duration, now: Instant, action: F) -> Result<Self, ScheduleError>
    where
        F: FnMut() -> Result<(), E> + Send + 'static,
    {
        if period.is_zero() {
            return Err(ScheduleError::ZeroPeriod);
        }
        Ok(Self {
            name: None,
            period,
            start: now,
            last_fire: None,
            fire_count: 0,
            action: Box::new(action),
        })
    }

    /// Attach a name used in diagnostics
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Fire the action if a new period has elapsed since the last firing.
    ///
    /// Returns the time remaining in the current period. Errors from the
    /// action are returned as-is; the firing still counts.
    pub fn check(&mut self, now: Instant) -> Result<Duration, E> {
        let elapsed = now.saturating_duration_since(self.start).as_nanos();
        let period = self.period.as_nanos();

        let elapsed_periods = u64::try_from(elapsed / period).unwrap_or(u64::MAX);
        let into_period = u64::try_from(elapsed % period).unwrap_or(u64::MAX);
        let remaining = self.period.saturating_sub(Duration::from_nanos(into_period));

        if elapsed_periods > self.fire_count {
            let skipped = elapsed_periods - self.fire_count - 1;
            self.fire_count = elapsed_periods;
            self.last_fire = Some(now);
            if let Some(name) = &self.name {
                tracing::debug!(task = %name, fire_count = self.fire_count, skipped, "doing {}", name);
            }
            (self.action)()?;
        }

        Ok(remaining)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn start_time(&self) -> Instant {
        self.start
    }

    /// Number of periods accounted for, including skipped ones
    pub fn fire_count(&self) -> u64 {
        self.fire_count
    }

    pub fn last_fire_time(&self) -> Option<Instant> {
        self.last_fire
    }
}

impl PeriodicTask<Infallible> {
    /// Create a task from an action that cannot fail
    pub fn from_fn<F>(period: Duration, now: Instant, mut action: F) -> Result<Self, ScheduleError>
    where
        F: FnMut() + Send + 'static,
    {
        Self::new(period, now, move || {
            action();
            Ok(())
        })
    }

    /// `check` for tasks whose action cannot fail
    pub fn tick(&mut self, now: Instant) -> Duration {
        self.check(now).unwrap_or_else(|never| match never {})
    }
}

impl<E> std::fmt::Debug for PeriodicTask<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeriodicTask")
            .field("name", &self.name)
            .field("period", &self.period)
            .field("fire_count", &self.fire_count)
            .field("last_fire", &self.last_fire)
            .finish_non_exhaustive()
    }
}

/// Several periodic tasks sharing one thread
pub struct Schedule<E = Infallible> {
    tasks: Vec<PeriodicTask<E>>,
}

impl<E> Default for Schedule<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Schedule<E> {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn add(&mut self, task: PeriodicTask<E>) {
        self.tasks.push(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[PeriodicTask<E>] {
        &self.tasks
    }

    /// Check every task and return how long until the soonest one is due.
    ///
    /// Returns `None` when the schedule is empty.
    pub fn check(&mut self, now: Instant) -> Result<Option<Duration>, E> {
        let mut soonest: Option<Duration> = None;
        for task in &mut self.tasks {
            let remaining = task.check(now)?;
            soonest = Some(soonest.map_or(remaining, |s| s.min(remaining)));
        }
        Ok(soonest)
    }

    /// Drive the schedule on the current thread until cancelled.
    ///
    /// An empty schedule pauses for `idle` between checks.
    pub fn run<C: Clock>(
        &mut self,
        clock: &C,
        cancel: &Cancellation,
        idle: Duration,
    ) -> Result<(), E> {
        while !cancel.is_cancelled() {
            let wait = self.check(clock.now())?.unwrap_or(idle);
            if clock.pause(wait, cancel) {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "periodic_tests.rs"]
mod tests;
