//! Behavioral specifications for the homer binary.
//!
//! These tests are black-box: they invoke the binary and verify stdout,
//! stderr, and exit codes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// cli/
#[path = "specs/cli/errors.rs"]
mod cli_errors;
#[path = "specs/cli/help.rs"]
mod cli_help;

// control/
#[path = "specs/control/once.rs"]
mod control_once;
