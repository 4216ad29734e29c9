// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::device::FakeDevice;
use crate::probe::FakeProbe;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// A writer that captures log output for testing
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn new() -> Self {
        Self::default()
    }

    fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run a closure with captured tracing output
fn with_tracing<T>(f: impl FnOnce() -> T) -> (String, T) {
    let logs = CapturedLogs::new();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (logs.contents(), result)
}

// =============================================================================
// Probe tracing
// =============================================================================

#[test]
fn traced_probe_passes_result_through() {
    let fake = FakeProbe::new();
    fake.set_present("10.0.0.1", true);
    let traced = TracedProbe::new(fake.clone());

    let (logs, found) = with_tracing(|| traced.probe("10.0.0.1").unwrap());

    assert!(found);
    assert_eq!(fake.calls().len(), 1);
    assert!(logs.contains("probed"), "logs: {}", logs);
    assert!(logs.contains("found=true"), "logs: {}", logs);
    assert!(logs.contains("address=\"10.0.0.1\""), "logs: {}", logs);
}

#[test]
fn traced_probe_logs_failures() {
    let fake = FakeProbe::new();
    fake.set_failing("10.0.0.2", "no route to host");
    let traced = TracedProbe::new(fake);

    let (logs, result) = with_tracing(|| traced.probe("10.0.0.2"));

    assert!(result.is_err());
    assert!(logs.contains("probe failed"), "logs: {}", logs);
    assert!(logs.contains("no route to host"), "logs: {}", logs);
}

// =============================================================================
// Device tracing
// =============================================================================

#[test]
fn traced_device_logs_state_change() {
    let fake = FakeDevice::new("amplifier");
    let mut traced = TracedDevice::new(fake.clone());

    let (logs, result) = with_tracing(|| traced.turn_on());

    assert!(result.is_ok());
    assert!(traced.state());
    assert_eq!(traced.name(), "amplifier");
    assert!(logs.contains("commanded"), "logs: {}", logs);
    assert!(logs.contains("before=false"), "logs: {}", logs);
    assert!(logs.contains("after=true"), "logs: {}", logs);
}

#[test]
fn traced_device_logs_command_errors() {
    let fake = FakeDevice::new("tv");
    fake.set_failing("ir blaster offline");
    let mut traced = TracedDevice::new(fake);

    let (logs, result) = with_tracing(|| traced.turn_off());

    assert!(result.is_err());
    assert!(logs.contains("ERROR"), "logs: {}", logs);
    assert!(logs.contains("ir blaster offline"), "logs: {}", logs);
}
