// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn fake_device_records_commands_across_clones() {
    let device = FakeDevice::new("amplifier");
    let mut owned: Box<dyn Device> = Box::new(device.clone());

    owned.turn_on().unwrap();
    owned.turn_off().unwrap();

    assert_eq!(device.calls(), vec![DeviceCall::TurnOn, DeviceCall::TurnOff]);
    assert_eq!(device.turn_on_count(), 1);
    assert!(!device.state());
}

#[test]
fn failing_device_keeps_its_state() {
    let device = FakeDevice::new("tv").with_state(true);
    device.set_failing("ir blaster offline");

    let mut owned = device.clone();
    assert!(owned.turn_off().is_err());
    assert!(device.state());
    assert_eq!(device.turn_off_count(), 1);
}
