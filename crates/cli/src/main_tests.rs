// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    quiet = { false, false, "warn" },
    verbose = { true, false, "info" },
    diagnostic = { false, true, "debug" },
    both = { true, true, "debug" },
)]
fn log_level_from_flags(verbose: bool, diagnostic: bool, expected: &str) {
    assert_eq!(logging::default_level(verbose, diagnostic), expected);
}

#[test]
fn parses_short_flags() {
    let cli = Cli::try_parse_from(["homer", "-v", "-t", "-c", "home.toml", "--once"]).unwrap();
    assert!(cli.verbose);
    assert!(cli.test);
    assert!(cli.once);
    assert!(!cli.diagnostic);
    assert_eq!(cli.config, Some(PathBuf::from("home.toml")));
    assert_eq!(cli.log_file, None);
}

#[test]
fn rejects_unknown_flags() {
    assert!(Cli::try_parse_from(["homer", "--frobnicate"]).is_err());
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
