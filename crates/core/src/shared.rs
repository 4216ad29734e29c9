// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thread-safe shared values
//!
//! [`SharedState`] maps names to individually locked [`SharedVar`]s. The map
//! lock is held only long enough to find or insert an entry; reads and writes
//! then go through the entry's own lock, so different keys never contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use thiserror::Error;

/// Errors from shared state access
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("key not found: {0}")]
    KeyNotFound(String),
}

/// A single value behind its own lock
#[derive(Debug, Default)]
pub struct SharedVar<V> {
    value: Mutex<V>,
}

impl<V> SharedVar<V> {
    pub fn new(value: V) -> Self {
        Self {
            value: Mutex::new(value),
        }
    }

    pub fn set(&self, value: V) {
        *self.value.lock().unwrap_or_else(|e| e.into_inner()) = value;
    }

    /// Replace the value with `updater(old)` under the lock.
    ///
    /// `updater` must not touch this variable; the lock is not reentrant.
    pub fn update(&self, updater: impl FnOnce(&V) -> V) {
        let mut value = self.value.lock().unwrap_or_else(|e| e.into_inner());
        *value = updater(&value);
    }
}

impl<V: Clone> SharedVar<V> {
    pub fn get(&self) -> V {
        self.value.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

/// A concurrent name → value store with per-entry atomicity
#[derive(Debug)]
pub struct SharedState<V> {
    entries: RwLock<HashMap<String, Arc<SharedVar<V>>>>,
}

impl<V> Default for SharedState<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> SharedState<V> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store pre-populated with `initial` values
    pub fn with_values(initial: impl IntoIterator<Item = (String, V)>) -> Self {
        let entries = initial
            .into_iter()
            .map(|(name, value)| (name, Arc::new(SharedVar::new(value))))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    fn entry(&self, name: &str) -> Option<Arc<SharedVar<V>>> {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .cloned()
    }

    /// Find the entry for `name`, inserting `seed()` if absent
    fn entry_or_insert_with(&self, name: &str, seed: impl FnOnce() -> V) -> Arc<SharedVar<V>> {
        if let Some(entry) = self.entry(name) {
            return entry;
        }
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        // Another writer may have inserted between the read and write locks
        entries
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(SharedVar::new(seed())))
            .clone()
    }

    /// Replace or create the value for `name`
    pub fn set(&self, name: &str, value: V) {
        if let Some(entry) = self.entry(name) {
            entry.set(value);
            return;
        }
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        match entries.get(name).cloned() {
            Some(entry) => {
                drop(entries);
                entry.set(value);
            }
            None => {
                entries.insert(name.to_string(), Arc::new(SharedVar::new(value)));
            }
        }
    }

    /// Atomically replace the value for `name` with `updater(old)`.
    ///
    /// An absent entry is first seeded with `default`.
    pub fn update_or(&self, name: &str, default: V, updater: impl FnOnce(&V) -> V) {
        let entry = self.entry_or_insert_with(name, || default);
        entry.update(updater);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn names(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect()
    }
}

impl<V: Default> SharedState<V> {
    /// `update_or` seeded with `V::default()`
    pub fn update(&self, name: &str, updater: impl FnOnce(&V) -> V) {
        self.update_or(name, V::default(), updater);
    }
}

impl<V: Clone> SharedState<V> {
    /// Current value for `name`
    pub fn get(&self, name: &str) -> Result<V, StateError> {
        self.entry(name)
            .map(|entry| entry.get())
            .ok_or_else(|| StateError::KeyNotFound(name.to_string()))
    }

    /// Read every entry.
    ///
    /// Each entry is locked on its own, so the result is not a single atomic
    /// snapshot: entries may reflect slightly different moments.
    pub fn snapshot(&self) -> HashMap<String, V> {
        let entries: Vec<(String, Arc<SharedVar<V>>)> = self
            .entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(name, entry)| (name.clone(), entry.clone()))
            .collect();
        entries
            .into_iter()
            .map(|(name, entry)| (name, entry.get()))
            .collect()
    }
}

#[cfg(test)]
#[path = "shared_tests.rs"]
mod tests;
