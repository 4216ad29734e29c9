// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Homer control engine: manifest, surveyor, judge, valet and the loop
//! that ties them together

mod actions;
mod control;
mod error;
mod judge;
mod manifest;
mod surveyor;
mod valet;

pub use actions::{batch, Action, ActionRegistry};
pub use control::{ControlLoop, CycleReport, Phase};
pub use error::{ActionError, EngineError, ManifestError};
pub use judge::{ConditionRule, Judge, Rule};
pub use manifest::Manifest;
pub use surveyor::{MonitoredDevice, RollCallReader, Surveyor};
pub use valet::{DispatchReport, Valet};
