// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON file-backed waitlist store
//!
//! One file per resource type, holding a map of entry key to entry. Writes
//! go through a temp-file-then-rename so a crash mid-write never leaves a
//! torn file, and every mutation runs under a process-local lock.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use wl_core::{EntryKey, EntryPatch, EntryStatus, StoreError, UpdateOutcome, WaitlistEntry, WaitlistStore};

/// JSON file-backed store
pub struct JsonStore<E> {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
    _marker: PhantomData<fn() -> E>,
}

impl<E> Clone for JsonStore<E> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            lock: Arc::clone(&self.lock),
            _marker: PhantomData,
        }
    }
}

impl<E> JsonStore<E>
where
    E: WaitlistEntry + Serialize + DeserializeOwned,
{
    /// Open a store backed by the given file, creating parent directories
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            lock: Arc::new(Mutex::new(())),
            _marker: PhantomData,
        })
    }

    /// Insert or replace an entry (the surrounding CRUD layer's write path)
    pub fn put(&self, entry: &E) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut map = self.load_map()?;
        map.insert(entry.entry_key().to_string(), entry.clone());
        self.persist(&map)
    }

    /// Fetch an entry by key
    pub fn get(&self, key: &EntryKey) -> Result<Option<E>, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        Ok(self.load_map()?.remove(&key.to_string()))
    }

    fn load_map(&self) -> Result<BTreeMap<String, E>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn persist(&self, map: &BTreeMap<String, E>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(map)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[async_trait]
impl<E> WaitlistStore<E> for JsonStore<E>
where
    E: WaitlistEntry + Serialize + DeserializeOwned,
{
    async fn scan_active(&self) -> Result<Vec<E>, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let map = self.load_map()?;
        Ok(map
            .into_values()
            .filter(|e| e.status().is_active())
            .collect())
    }

    async fn conditional_update(
        &self,
        key: &EntryKey,
        expected: EntryStatus,
        patch: EntryPatch,
    ) -> Result<UpdateOutcome, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut map = self.load_map()?;
        let entry = map
            .get_mut(&key.to_string())
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;

        if entry.status() != expected {
            return Ok(UpdateOutcome::Conflict);
        }

        entry.apply(&patch);
        self.persist(&map)?;
        Ok(UpdateOutcome::Applied)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
