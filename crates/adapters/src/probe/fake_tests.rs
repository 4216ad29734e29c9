// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn fake_probe_answers_and_records() {
    let probe = FakeProbe::new();
    probe.set_present("10.0.0.1", true);
    probe.set_failing("10.0.0.2", "no route to host");

    assert!(probe.probe("10.0.0.1").unwrap());
    assert!(matches!(
        probe.probe("10.0.0.2"),
        Err(ProbeError::Unreachable { .. })
    ));
    assert!(!probe.probe("10.0.0.3").unwrap());

    let calls = probe.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].address, "10.0.0.1");
}

#[test]
fn recording_is_capped_but_counting_is_not() {
    let probe = FakeProbe::new();
    for _ in 0..MAX_RECORDED_CALLS + 10 {
        probe.probe("10.0.0.1").unwrap();
    }

    assert_eq!(probe.calls().len(), MAX_RECORDED_CALLS);
    assert_eq!(probe.call_count(), MAX_RECORDED_CALLS + 10);
}
