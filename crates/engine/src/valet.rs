// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Action dispatch

use crate::actions::ActionRegistry;
use crate::manifest::Manifest;
use homer_core::ActionId;

/// Outcome of dispatching one cycle's rulings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Actions that ran to completion, in dispatch order
    pub executed: Vec<ActionId>,
    /// Ids with no registered action
    pub unknown: Vec<ActionId>,
    /// Actions that ran and failed, with the error text
    pub failed: Vec<(ActionId, String)>,
}

impl DispatchReport {
    pub fn is_clean(&self) -> bool {
        self.unknown.is_empty() && self.failed.is_empty()
    }
}

/// Runs the actions the judge asked for, in order
#[derive(Debug, Default)]
pub struct Valet {
    actions: ActionRegistry,
}

impl Valet {
    pub fn new(actions: ActionRegistry) -> Self {
        Self { actions }
    }

    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    /// Run each id's action against `manifest`.
    ///
    /// Unknown ids and failing actions are logged and skipped; later ids
    /// still run.
    pub fn dispatch(&self, ids: &[ActionId], manifest: &mut Manifest) -> DispatchReport {
        let mut report = DispatchReport::default();
        if ids.is_empty() {
            return report;
        }

        let listed: Vec<&str> = ids.iter().map(ActionId::as_str).collect();
        tracing::info!("actions required: {}", listed.join(", "));

        for id in ids {
            let Some(action) = self.actions.get(id.as_str()) else {
                tracing::warn!(action = %id, "unknown action id, skipping");
                report.unknown.push(id.clone());
                continue;
            };

            let _span = tracing::info_span!("action", id = %id).entered();
            match action(&mut *manifest) {
                Ok(()) => {
                    tracing::debug!("action done");
                    report.executed.push(id.clone());
                }
                Err(e) => {
                    tracing::warn!(error = %e, "action failed");
                    report.failed.push((id.clone(), e.to_string()));
                }
            }
        }
        report
    }
}

#[cfg(test)]
#[path = "valet_tests.rs"]
mod tests;
