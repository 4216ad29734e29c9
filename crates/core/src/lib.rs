// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! homer-core: scheduling and state primitives for the Homer control loop
//!
//! This crate provides:
//! - A clock abstraction with a controllable fake for tests
//! - Drift-correcting periodic tasks and multi-task schedules
//! - A concurrent name → value store with per-entry locking
//! - Roll call and fact snapshots consumed by rule evaluation
//! - A cooperative cancellation token

pub mod cancel;
pub mod clock;
pub mod periodic;
pub mod roll_call;
pub mod shared;

pub use cancel::Cancellation;
pub use clock::{Clock, FakeClock, SystemClock};
pub use periodic::{PeriodicTask, Schedule, ScheduleError, TaskAction};
pub use roll_call::{ActionId, DeviceStates, Facts, RollCall};
pub use shared::{SharedState, SharedVar, StateError};
