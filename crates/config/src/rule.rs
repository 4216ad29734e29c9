// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rule definitions

use serde::{Deserialize, Serialize};

/// A rule: when every listed condition holds, emit the `then` actions.
///
/// A rule with no conditions fires every cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDef {
    pub name: String,
    /// Monitored devices that must all be present
    #[serde(default)]
    pub present: Vec<String>,
    /// Monitored devices that must all be absent
    #[serde(default)]
    pub absent: Vec<String>,
    /// Monitored devices of which at least one must be present
    #[serde(default)]
    pub any_present: Vec<String>,
    /// Managed devices that must currently be on
    #[serde(default)]
    pub on: Vec<String>,
    /// Managed devices that must currently be off
    #[serde(default)]
    pub off: Vec<String>,
    /// Action ids emitted, in order
    pub then: Vec<String>,
}

impl RuleDef {
    pub fn is_unconditional(&self) -> bool {
        self.present.is_empty()
            && self.absent.is_empty()
            && self.any_present.is_empty()
            && self.on.is_empty()
            && self.off.is_empty()
    }
}

/// Ordered rules, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSet {
    #[serde(default)]
    pub rule: Vec<RuleDef>,
}

impl RuleSet {
    pub fn len(&self) -> usize {
        self.rule.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rule.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RuleDef> {
        self.rule.iter()
    }
}

impl IntoIterator for RuleSet {
    type Item = RuleDef;
    type IntoIter = std::vec::IntoIter<RuleDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.rule.into_iter()
    }
}
