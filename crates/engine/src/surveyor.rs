// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Presence polling
//!
//! The surveyor probes every monitored device on a fixed period and publishes
//! the results into a [`SharedState`], which the control loop reads as the
//! roll call. A probe that fails counts as "not present".

use crate::error::EngineError;
use homer_adapters::PresenceProbe;
use homer_config::HomerConfig;
use homer_core::{Cancellation, Clock, PeriodicTask, RollCall, ScheduleError, SharedState};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// A device whose presence is polled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitoredDevice {
    pub name: String,
    pub address: String,
}

impl MonitoredDevice {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// Everything one poll needs; shared with the periodic task's action
#[derive(Clone)]
struct Poll {
    devices: Arc<[MonitoredDevice]>,
    probe: Arc<dyn PresenceProbe>,
    state: Arc<SharedState<bool>>,
    polls: Arc<AtomicU64>,
}

impl Poll {
    fn run(&self) {
        for device in self.devices.iter() {
            tracing::debug!(device = %device.name, address = %device.address, "pinging {}", device.name);
            let found = match self.probe.probe(&device.address) {
                Ok(found) => found,
                Err(e) => {
                    tracing::debug!(device = %device.name, error = %e, "probe failed, treating as missing");
                    false
                }
            };
            self.state.set(&device.name, found);
            if found {
                tracing::info!(device = %device.name, "{} found", device.name);
            } else {
                tracing::info!(device = %device.name, "{} missing", device.name);
            }
        }
        self.polls.fetch_add(1, Ordering::Relaxed);
    }
}

/// Read-only view of the roll call, safe to hand to another thread
#[derive(Clone)]
pub struct RollCallReader {
    devices: Arc<[MonitoredDevice]>,
    state: Arc<SharedState<bool>>,
    polls: Arc<AtomicU64>,
}

impl RollCallReader {
    /// Current presence of every monitored device that has been polled
    pub fn roll_call(&self) -> RollCall {
        let snapshot = self.state.snapshot();
        self.devices
            .iter()
            .filter_map(|d| snapshot.get(&d.name).map(|found| (d.name.clone(), *found)))
            .collect()
    }

    /// Completed polls so far
    pub fn polls(&self) -> u64 {
        self.polls.load(Ordering::Relaxed)
    }
}

/// Periodically polls monitored devices
pub struct Surveyor {
    poll: Poll,
    task: PeriodicTask,
}

impl Surveyor {
    /// Create a surveyor whose first poll is due one `period` after `now`
    pub fn new(
        devices: Vec<MonitoredDevice>,
        probe: Arc<dyn PresenceProbe>,
        state: Arc<SharedState<bool>>,
        period: Duration,
        now: Instant,
    ) -> Result<Self, ScheduleError> {
        let poll = Poll {
            devices: devices.into(),
            probe,
            state,
            polls: Arc::new(AtomicU64::new(0)),
        };
        let action = poll.clone();
        let task = PeriodicTask::from_fn(period, now, move || action.run())?.named("poll_devices");
        Ok(Self { poll, task })
    }

    /// Monitor the devices listed in `config` with its poll period
    pub fn from_config(
        config: &HomerConfig,
        probe: Arc<dyn PresenceProbe>,
        now: Instant,
    ) -> Result<Self, EngineError> {
        let devices = config
            .devices
            .monitored
            .iter()
            .map(|name| {
                config
                    .address(name)
                    .map(|address| MonitoredDevice::new(name.clone(), address))
                    .ok_or_else(|| EngineError::NoAddress(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let state = Arc::new(SharedState::new());
        Ok(Self::new(
            devices,
            probe,
            state,
            config.general.poll_period,
            now,
        )?)
    }

    /// Probe every monitored device once, now
    pub fn poll_devices(&self) {
        self.poll.run();
    }

    /// Poll if a period has elapsed; returns time until the next poll is due
    pub fn check(&mut self, now: Instant) -> Duration {
        self.task.tick(now)
    }

    pub fn roll_call(&self) -> RollCall {
        self.reader().roll_call()
    }

    pub fn reader(&self) -> RollCallReader {
        RollCallReader {
            devices: self.poll.devices.clone(),
            state: self.poll.state.clone(),
            polls: self.poll.polls.clone(),
        }
    }

    pub fn monitored(&self) -> &[MonitoredDevice] {
        &self.poll.devices
    }

    /// Periods elapsed on the poll schedule
    pub fn fire_count(&self) -> u64 {
        self.task.fire_count()
    }

    pub fn period(&self) -> Duration {
        self.task.period()
    }

    /// Poll now, then on schedule until cancelled
    pub fn run<C: Clock>(&mut self, clock: &C, cancel: &Cancellation) {
        self.poll_devices();
        self.run_scheduled(clock, cancel);
    }

    fn run_scheduled<C: Clock>(&mut self, clock: &C, cancel: &Cancellation) {
        while !cancel.is_cancelled() {
            let wait = self.check(clock.now());
            if clock.pause(wait, cancel) {
                break;
            }
        }
        tracing::debug!(fire_count = self.fire_count(), "surveyor stopped");
    }

    /// Poll once on the calling thread, then keep polling on a new thread
    /// until `cancel` fires.
    ///
    /// The roll call is populated by the time this returns.
    pub fn spawn<C: Clock>(
        mut self,
        clock: C,
        cancel: Cancellation,
    ) -> Result<(RollCallReader, JoinHandle<()>), EngineError> {
        self.poll_devices();
        let reader = self.reader();
        let handle = std::thread::Builder::new()
            .name("surveyor".to_string())
            .spawn(move || self.run_scheduled(&clock, &cancel))
            .map_err(EngineError::Spawn)?;
        Ok((reader, handle))
    }

    /// True once at least one poll has completed
    pub fn has_polled(&self) -> bool {
        self.poll.polls.load(Ordering::Relaxed) > 0
    }
}

#[cfg(test)]
#[path = "surveyor_tests.rs"]
mod tests;
