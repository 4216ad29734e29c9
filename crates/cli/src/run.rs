// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wiring: configuration → control loop

use crate::Cli;
use anyhow::{Context, Result};
use homer_adapters::{DriverRegistry, PingProbe, PresenceProbe, SimulatedProbe, TracedProbe};
use homer_config::{load_config, load_rules, locate_config};
use homer_core::{Cancellation, SystemClock};
use homer_engine::ControlLoop;
use std::sync::Arc;

pub fn run(cli: &Cli) -> Result<()> {
    let config_path = locate_config(cli.config.as_deref())?;
    tracing::info!(path = %config_path.display(), "loading configuration");
    let mut config = load_config(&config_path)?;

    let rules_path = config.rules_path(&config_path);
    let rules = load_rules(&rules_path)
        .with_context(|| format!("loading rules from {}", rules_path.display()))?;

    let probe: Arc<dyn PresenceProbe> = if cli.test {
        tracing::info!("test mode: simulating presence");
        Arc::new(TracedProbe::new(SimulatedProbe::new()))
    } else {
        Arc::new(TracedProbe::new(PingProbe::new(config.general.probe_timeout)))
    };

    // A single cycle polls from the control thread
    if cli.once {
        config.general.background_poll = false;
    }

    let cancel = Cancellation::new();
    let mut control = ControlLoop::from_config(
        &config,
        rules,
        &DriverRegistry::builtin(),
        probe,
        SystemClock,
        &cancel,
    )?;

    if cli.once {
        control.poll_now();
        let report = control.cycle();
        tracing::info!(
            executed = report.dispatch.executed.len(),
            unknown = report.dispatch.unknown.len(),
            failed = report.dispatch.failed.len(),
            "single cycle done"
        );
        control.shutdown(&cancel);
        return Ok(());
    }

    let interrupt = cancel.clone();
    ctrlc::set_handler(move || {
        tracing::info!("interrupted, stopping");
        interrupt.cancel();
    })?;

    control.run(&cancel);
    control.shutdown(&cancel);
    Ok(())
}
