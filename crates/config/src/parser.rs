// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration and rules file loading

use crate::{HomerConfig, RuleDef, RuleSet};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file name
pub const CONFIG_FILENAME: &str = "homer.toml";

/// Errors that can occur while loading configuration or rules
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("no configuration file found (searched: {})", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate a configuration from TOML content
pub fn parse_config(content: &str) -> Result<HomerConfig, ConfigError> {
    let config: HomerConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate a configuration file
pub fn load_config(path: &Path) -> Result<HomerConfig, ConfigError> {
    let content = read(path)?;
    let config = parse_config(&content)?;
    tracing::debug!(
        path = %path.display(),
        monitored = config.devices.monitored.len(),
        managed = config.devices.managed.len(),
        "loaded configuration"
    );
    Ok(config)
}

/// Parse rules from TOML content (`[[rule]]` tables)
pub fn parse_rules(content: &str) -> Result<RuleSet, ConfigError> {
    let rules: RuleSet = toml::from_str(content)?;
    validate_rules(&rules)?;
    Ok(rules)
}

/// Parse rules from JSON content (an array of rule objects)
pub fn parse_rules_json(content: &str) -> Result<RuleSet, ConfigError> {
    let rule: Vec<RuleDef> = serde_json::from_str(content)?;
    let rules = RuleSet { rule };
    validate_rules(&rules)?;
    Ok(rules)
}

/// Read a rules file; `.json` files are JSON, anything else TOML
pub fn load_rules(path: &Path) -> Result<RuleSet, ConfigError> {
    let content = read(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let rules = if is_json {
        parse_rules_json(&content)?
    } else {
        parse_rules(&content)?
    };
    tracing::debug!(path = %path.display(), rules = rules.len(), "loaded rules");
    Ok(rules)
}

fn validate_rules(rules: &RuleSet) -> Result<(), ConfigError> {
    let mut names = BTreeSet::new();
    for rule in rules.iter() {
        if rule.name.trim().is_empty() {
            return Err(ConfigError::Invalid("rule with empty name".to_string()));
        }
        if !names.insert(rule.name.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "rule {:?} defined twice",
                rule.name
            )));
        }
        if rule.then.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "rule {:?}: then must name at least one action",
                rule.name
            )));
        }
    }
    Ok(())
}

/// Find the configuration file.
///
/// An explicit path must exist. Otherwise `./homer.toml` is tried, then
/// `homer/homer.toml` under the user's config directory.
pub fn locate_config(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let candidates = match explicit {
        Some(path) => vec![path.to_path_buf()],
        None => {
            let mut candidates = vec![PathBuf::from(CONFIG_FILENAME)];
            if let Some(dir) = dirs::config_dir() {
                candidates.push(dir.join("homer").join(CONFIG_FILENAME));
            }
            candidates
        }
    };

    if let Some(found) = candidates.iter().find(|path| path.is_file()) {
        return Ok(found.clone());
    }
    Err(ConfigError::NotFound {
        searched: candidates,
    })
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
