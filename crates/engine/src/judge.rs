// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rule evaluation: facts in, action ids out

use homer_config::{RuleDef, RuleSet};
use homer_core::{ActionId, Facts};

/// A rule contributes zero or more action ids for the current facts.
///
/// Implementations must be deterministic and must not mutate anything.
pub trait Rule: Send {
    fn name(&self) -> &str;

    fn evaluate(&self, facts: &Facts<'_>) -> Vec<ActionId>;
}

/// Rule built from a configured condition list
#[derive(Debug, Clone)]
pub struct ConditionRule {
    def: RuleDef,
}

impl ConditionRule {
    pub fn new(def: RuleDef) -> Self {
        Self { def }
    }

    /// True when every condition of the rule holds
    pub fn holds(&self, facts: &Facts<'_>) -> bool {
        let def = &self.def;
        let roll_call = facts.roll_call;

        def.present.iter().all(|name| roll_call.is_present(name))
            && def.absent.iter().all(|name| !roll_call.is_present(name))
            && (def.any_present.is_empty()
                || def.any_present.iter().any(|name| roll_call.is_present(name)))
            && def.on.iter().all(|name| facts.device_on(name) == Some(true))
            && def.off.iter().all(|name| facts.device_on(name) == Some(false))
    }
}

impl From<RuleDef> for ConditionRule {
    fn from(def: RuleDef) -> Self {
        Self::new(def)
    }
}

impl Rule for ConditionRule {
    fn name(&self) -> &str {
        &self.def.name
    }

    fn evaluate(&self, facts: &Facts<'_>) -> Vec<ActionId> {
        if !self.holds(facts) {
            return Vec::new();
        }
        self.def.then.iter().map(|id| ActionId::new(id.as_str())).collect()
    }
}

/// Evaluates rules in load order
#[derive(Default)]
pub struct Judge {
    rules: Vec<Box<dyn Rule>>,
}

impl Judge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Judge over the configured condition rules, in file order
    pub fn from_rules(rules: RuleSet) -> Self {
        let mut judge = Self::new();
        for def in rules {
            judge.add(ConditionRule::new(def));
        }
        judge
    }

    pub fn add(&mut self, rule: impl Rule + 'static) {
        self.rules.push(Box::new(rule));
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Action ids for this cycle, concatenated in rule order.
    ///
    /// Duplicates are kept; actions are idempotent.
    pub fn decide(&self, facts: &Facts<'_>) -> Vec<ActionId> {
        tracing::info!(rules = self.rules.len(), "evaluating rules");
        let mut rulings = Vec::new();
        for rule in &self.rules {
            let ids = rule.evaluate(facts);
            tracing::debug!(rule = rule.name(), fired = !ids.is_empty(), "evaluating: {}", rule.name());
            rulings.extend(ids);
        }
        rulings
    }
}

impl std::fmt::Debug for Judge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|r| r.name()))
            .finish()
    }
}

#[cfg(test)]
#[path = "judge_tests.rs"]
mod tests;
