// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::device::{Device, DeviceError};
use crate::probe::{PresenceProbe, ProbeError};

/// Wrapper that adds tracing to any PresenceProbe
#[derive(Clone)]
pub struct TracedProbe<P> {
    inner: P,
}

impl<P> TracedProbe<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: PresenceProbe> PresenceProbe for TracedProbe<P> {
    fn probe(&self, address: &str) -> Result<bool, ProbeError> {
        let span = tracing::debug_span!("probe", address);
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = self.inner.probe(address);
        let elapsed = start.elapsed();

        match &result {
            Ok(found) => tracing::debug!(
                found,
                elapsed_ms = elapsed.as_millis() as u64,
                "probed"
            ),
            Err(e) => tracing::debug!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "probe failed"
            ),
        }

        result
    }
}

/// Wrapper that adds tracing to any Device
pub struct TracedDevice<D> {
    inner: D,
}

impl<D> TracedDevice<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }
}

impl<D: Device> TracedDevice<D> {
    fn command(
        &mut self,
        op: &'static str,
        run: impl FnOnce(&mut D) -> Result<(), DeviceError>,
    ) -> Result<(), DeviceError> {
        let span = tracing::info_span!("device", name = self.inner.name(), op);
        let _guard = span.enter();

        let before = self.inner.state();
        let result = run(&mut self.inner);

        match &result {
            Ok(()) => tracing::debug!(before, after = self.inner.state(), "commanded"),
            Err(e) => tracing::error!(error = %e, "command failed"),
        }

        result
    }
}

impl<D: Device> Device for TracedDevice<D> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn kind(&self) -> &str {
        self.inner.kind()
    }

    fn turn_on(&mut self) -> Result<(), DeviceError> {
        self.command("turn_on", |d| d.turn_on())
    }

    fn turn_off(&mut self) -> Result<(), DeviceError> {
        self.command("turn_off", |d| d.turn_off())
    }

    fn state(&self) -> bool {
        self.inner.state()
    }
}

impl Device for Box<dyn Device> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn kind(&self) -> &str {
        (**self).kind()
    }

    fn turn_on(&mut self) -> Result<(), DeviceError> {
        (**self).turn_on()
    }

    fn turn_off(&mut self) -> Result<(), DeviceError> {
        (**self).turn_off()
    }

    fn state(&self) -> bool {
        (**self).state()
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
