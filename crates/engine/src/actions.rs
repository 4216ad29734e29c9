// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named actions the valet can run against the manifest

use crate::error::ActionError;
use crate::manifest::Manifest;
use homer_config::ActionDef;
use std::collections::BTreeMap;

/// A named side effect on managed devices
pub type Action = Box<dyn Fn(&mut Manifest) -> Result<(), ActionError> + Send>;

/// Action id → action
#[derive(Default)]
pub struct ActionRegistry {
    actions: BTreeMap<String, Action>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one batch action per `[action.<id>]` entry
    pub fn from_defs(defs: &BTreeMap<String, ActionDef>) -> Self {
        let mut registry = Self::new();
        for (id, def) in defs {
            registry.register(id, batch(def.clone()));
        }
        registry
    }

    /// Register `action` under `id`, replacing any previous action
    pub fn register<F>(&mut self, id: &str, action: F)
    where
        F: Fn(&mut Manifest) -> Result<(), ActionError> + Send + 'static,
    {
        if self.actions.insert(id.to_string(), Box::new(action)).is_some() {
            tracing::debug!(action = %id, "replaced action");
        }
    }

    pub fn get(&self, id: &str) -> Option<&Action> {
        self.actions.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.actions.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.actions.keys()).finish()
    }
}

/// Idempotent batch: switch every listed device into its target state.
///
/// Every device is attempted even when an earlier one fails.
pub fn batch(def: ActionDef) -> impl Fn(&mut Manifest) -> Result<(), ActionError> + Send + 'static {
    move |manifest: &mut Manifest| {
        let total = def.turn_on.len() + def.turn_off.len();
        let mut failures = Vec::new();

        let ons = def.turn_on.iter().map(|name| (name, true));
        let offs = def.turn_off.iter().map(|name| (name, false));
        for (name, on) in ons.chain(offs) {
            let result = if on {
                manifest.ensure_on(name)
            } else {
                manifest.ensure_off(name)
            };
            if let Err(e) = result {
                tracing::warn!(device = %name, error = %e, "device command failed");
                failures.push(e);
            }
        }

        let failed = failures.len();
        match failures.into_iter().next() {
            None => Ok(()),
            Some(first) => Err(ActionError::Batch {
                failed,
                total,
                first: Box::new(first),
            }),
        }
    }
}

#[cfg(test)]
#[path = "actions_tests.rs"]
mod tests;
