// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory waitlist store

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use wl_core::{EntryKey, EntryPatch, EntryStatus, StoreError, UpdateOutcome, WaitlistEntry, WaitlistStore};

/// In-memory store backed by a shared map
///
/// The conditional update runs entirely under the map lock, so concurrent
/// writers racing on one entry see exactly one `Applied`.
#[derive(Clone)]
pub struct MemoryStore<E> {
    entries: Arc<Mutex<BTreeMap<String, E>>>,
    #[cfg(any(test, feature = "test-support"))]
    fail_scans: Arc<Mutex<bool>>,
}

impl<E: WaitlistEntry> MemoryStore<E> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(BTreeMap::new())),
            #[cfg(any(test, feature = "test-support"))]
            fail_scans: Arc::new(Mutex::new(false)),
        }
    }

    /// Insert or replace an entry (the surrounding CRUD layer's write path)
    pub fn put(&self, entry: E) {
        let key = entry.entry_key().to_string();
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key, entry);
    }

    /// Fetch an entry by key
    pub fn get(&self, key: &EntryKey) -> Option<E> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&key.to_string())
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make subsequent scans fail, for transient-failure tests
    #[cfg(any(test, feature = "test-support"))]
    pub fn set_fail_scans(&self, fail: bool) {
        *self.fail_scans.lock().unwrap_or_else(|e| e.into_inner()) = fail;
    }
}

impl<E: WaitlistEntry> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: WaitlistEntry> WaitlistStore<E> for MemoryStore<E> {
    async fn scan_active(&self) -> Result<Vec<E>, StoreError> {
        #[cfg(any(test, feature = "test-support"))]
        if *self.fail_scans.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(StoreError::Backend("injected scan failure".to_string()));
        }

        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries
            .values()
            .filter(|e| e.status().is_active())
            .cloned()
            .collect())
    }

    async fn conditional_update(
        &self,
        key: &EntryKey,
        expected: EntryStatus,
        patch: EntryPatch,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let entry = entries
            .get_mut(&key.to_string())
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;

        if entry.status() != expected {
            return Ok(UpdateOutcome::Conflict);
        }

        entry.apply(&patch);
        Ok(UpdateOutcome::Applied)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
