// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! homer - presence-driven home automation

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod logging;
mod run;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "homer",
    version,
    about = "Homer - switches things on and off as people come and go"
)]
pub struct Cli {
    /// Configuration file [default: ./homer.toml, then the user config dir]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log notes (info level)
    #[arg(short, long)]
    verbose: bool,

    /// Log diagnostics (debug level)
    #[arg(short, long)]
    diagnostic: bool,

    /// Simulate presence instead of pinging devices
    #[arg(short, long)]
    test: bool,

    /// Poll once, run a single cycle, then exit
    #[arg(long)]
    once: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let guard = match logging::init(&cli) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Fatal: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Homer start");
    let code = match run::run(&cli) {
        Ok(()) => {
            println!("Homer end");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Fatal: {:#}", e);
            ExitCode::FAILURE
        }
    };

    // Flush the file writer before exit
    drop(guard);
    code
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
