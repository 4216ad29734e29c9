// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The control loop
//!
//! Each cycle moves through `Idle → Polling → Deciding → Acting → Idle`:
//! the surveyor gets a chance to poll, the judge turns the roll call and
//! device states into action ids, and the valet runs them against the
//! manifest. Devices are polled before the first decision, so rules never
//! see an unpolled roll call. The loop stops at the top of the next
//! iteration once the cancellation token fires.

use crate::actions::ActionRegistry;
use crate::error::EngineError;
use crate::judge::Judge;
use crate::manifest::Manifest;
use crate::surveyor::{RollCallReader, Surveyor};
use crate::valet::{DispatchReport, Valet};
use homer_adapters::{DriverRegistry, PresenceProbe};
use homer_config::{HomerConfig, RuleSet};
use homer_core::{ActionId, Cancellation, Clock, Facts, RollCall};
use std::fmt;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Where the loop is within a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Polling,
    Deciding,
    Acting,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Polling => "polling",
            Phase::Deciding => "deciding",
            Phase::Acting => "acting",
        };
        f.write_str(name)
    }
}

/// What one cycle saw and did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub roll_call: RollCall,
    pub rulings: Vec<ActionId>,
    pub dispatch: DispatchReport,
}

enum Polling {
    /// Polled from the control thread at the top of each cycle
    Inline(Surveyor),
    /// Polled on its own thread; the loop only reads results
    Background {
        reader: RollCallReader,
        handle: JoinHandle<()>,
    },
}

/// Drives poll → decide → act until cancelled
pub struct ControlLoop<C: Clock> {
    clock: C,
    polling: Polling,
    judge: Judge,
    valet: Valet,
    manifest: Manifest,
    interval: Duration,
    cycles: u64,
    phase: Phase,
}

impl<C: Clock> ControlLoop<C> {
    /// Loop that polls inline and pauses `interval` between cycles
    pub fn new(
        clock: C,
        surveyor: Surveyor,
        judge: Judge,
        valet: Valet,
        manifest: Manifest,
        interval: Duration,
    ) -> Self {
        Self {
            clock,
            polling: Polling::Inline(surveyor),
            judge,
            valet,
            manifest,
            interval,
            cycles: 0,
            phase: Phase::Idle,
        }
    }

    /// Assemble everything `config` describes.
    ///
    /// Fails on any manifest error. With `background_poll` the surveyor is
    /// started on its own thread, stopped by `cancel`.
    pub fn from_config(
        config: &HomerConfig,
        rules: RuleSet,
        drivers: &DriverRegistry,
        probe: Arc<dyn PresenceProbe>,
        clock: C,
        cancel: &Cancellation,
    ) -> Result<Self, EngineError> {
        let manifest = Manifest::build(config, drivers)?;
        let surveyor = Surveyor::from_config(config, probe, clock.now())?;
        let judge = Judge::from_rules(rules);
        let valet = Valet::new(ActionRegistry::from_defs(&config.actions));
        tracing::info!(
            monitored = surveyor.monitored().len(),
            managed = manifest.len(),
            rules = judge.len(),
            actions = valet.actions().len(),
            "control loop assembled"
        );

        let control = Self::new(
            clock,
            surveyor,
            judge,
            valet,
            manifest,
            config.general.cycle_interval,
        );
        if config.general.background_poll {
            control.into_background(cancel)
        } else {
            Ok(control)
        }
    }

    /// Move polling onto a dedicated thread
    pub fn into_background(self, cancel: &Cancellation) -> Result<Self, EngineError> {
        let Self {
            clock,
            polling,
            judge,
            valet,
            manifest,
            interval,
            cycles,
            phase,
        } = self;
        let polling = match polling {
            Polling::Inline(surveyor) => {
                let (reader, handle) = surveyor.spawn(clock.clone(), cancel.clone())?;
                tracing::debug!("surveyor moved to background thread");
                Polling::Background { reader, handle }
            }
            background => background,
        };
        Ok(Self {
            clock,
            polling,
            judge,
            valet,
            manifest,
            interval,
            cycles,
            phase,
        })
    }

    /// Poll every monitored device immediately, outside the schedule.
    ///
    /// No-op when polling runs in the background.
    pub fn poll_now(&mut self) {
        match &self.polling {
            Polling::Inline(surveyor) => surveyor.poll_devices(),
            Polling::Background { .. } => tracing::debug!("poll_now ignored, polling in background"),
        }
    }

    /// Run one full cycle
    pub fn cycle(&mut self) -> CycleReport {
        self.cycles += 1;
        let _span = tracing::info_span!("cycle", n = self.cycles).entered();

        self.enter(Phase::Polling);
        let roll_call = match &mut self.polling {
            Polling::Inline(surveyor) => {
                // Never decide on an empty roll call
                if !surveyor.has_polled() {
                    tracing::debug!("first cycle, polling ahead of schedule");
                    surveyor.poll_devices();
                }
                surveyor.check(self.clock.now());
                surveyor.roll_call()
            }
            Polling::Background { reader, .. } => reader.roll_call(),
        };
        tracing::info!("roll call: {}", roll_call);

        self.enter(Phase::Deciding);
        let states = self.manifest.states();
        let rulings = self.judge.decide(&Facts::new(&roll_call, &states));

        self.enter(Phase::Acting);
        let dispatch = self.valet.dispatch(&rulings, &mut self.manifest);

        self.enter(Phase::Idle);
        CycleReport {
            roll_call,
            rulings,
            dispatch,
        }
    }

    /// Cycle until `cancel` fires. An in-flight cycle always completes.
    pub fn run(&mut self, cancel: &Cancellation) {
        tracing::info!(interval = ?self.interval, "control loop running");
        while !cancel.is_cancelled() {
            self.cycle();
            if self.clock.pause(self.interval, cancel) {
                break;
            }
        }
        tracing::info!(cycles = self.cycles, "control loop stopped");
    }

    /// Run at most `n` cycles, pausing between them; returns cycles run
    pub fn run_cycles(&mut self, n: u64, cancel: &Cancellation) -> u64 {
        let mut done = 0;
        while done < n && !cancel.is_cancelled() {
            self.cycle();
            done += 1;
            if done < n && self.clock.pause(self.interval, cancel) {
                break;
            }
        }
        done
    }

    /// Cancel and wait for the background poller, if any
    pub fn shutdown(self, cancel: &Cancellation) {
        cancel.cancel();
        if let Polling::Background { handle, .. } = self.polling {
            if handle.join().is_err() {
                tracing::error!("surveyor thread panicked");
            }
        }
        tracing::debug!(cycles = self.cycles, "control loop shut down");
    }

    /// Latest roll call without running a cycle
    pub fn roll_call(&self) -> RollCall {
        match &self.polling {
            Polling::Inline(surveyor) => surveyor.roll_call(),
            Polling::Background { reader, .. } => reader.roll_call(),
        }
    }

    /// Elapsed poll periods, when polling inline
    pub fn poll_fire_count(&self) -> Option<u64> {
        match &self.polling {
            Polling::Inline(surveyor) => Some(surveyor.fire_count()),
            Polling::Background { .. } => None,
        }
    }

    /// Completed polls, inline or background
    pub fn polls(&self) -> u64 {
        match &self.polling {
            Polling::Inline(surveyor) => surveyor.reader().polls(),
            Polling::Background { reader, .. } => reader.polls(),
        }
    }

    pub fn is_background(&self) -> bool {
        matches!(self.polling, Polling::Background { .. })
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn manifest_mut(&mut self) -> &mut Manifest {
        &mut self.manifest
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn enter(&mut self, phase: Phase) {
        tracing::debug!(from = %self.phase, to = %phase, "phase");
        self.phase = phase;
    }
}

#[cfg(test)]
#[path = "control_tests.rs"]
mod tests;
