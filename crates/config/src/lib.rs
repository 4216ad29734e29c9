// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Typed configuration and rule definitions

mod parser;
mod rule;
mod settings;

pub use parser::{
    load_config, load_rules, locate_config, parse_config, parse_rules, parse_rules_json,
    ConfigError, CONFIG_FILENAME,
};
pub use rule::{RuleDef, RuleSet};
pub use settings::{ActionDef, DeviceDef, DevicesConfig, GeneralConfig, HomerConfig};
