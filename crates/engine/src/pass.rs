// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scan-and-cascade pass
//!
//! One pass scans every active entry, expires the stale ones, and
//! promotes at most one waiting entry per resource key. The conditional
//! update on the entry is the sole arbiter of claim ownership; the
//! per-pass key set only avoids redundant oracle and notifier calls when
//! several stale holds on the same key expire in one scan. Any per-entry
//! failure is logged and skipped, never aborting the pass.

use crate::claim::notice_for;
use crate::config::EngineConfig;
use crate::dispatch::NotifyDispatcher;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashSet};
use wl_core::{
    AvailabilityOracle, Disposition, EntryKey, EntryPatch, EntryStatus, PassSummary, ResourceKey,
    StoreError, UpdateOutcome, WaitlistEntry, WaitlistStore,
};

/// Resource keys that already produced a notification this pass
///
/// Pass-scoped and explicitly threaded through the scan, so concurrent
/// passes never share it.
#[derive(Debug, Default)]
pub struct NotifiedKeys(HashSet<ResourceKey>);

impl NotifiedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &ResourceKey) -> bool {
        self.0.contains(key)
    }

    pub fn mark(&mut self, key: ResourceKey) {
        self.0.insert(key);
    }
}

/// Result of one cascade attempt for a resource key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CascadeOutcome {
    /// The entry now holds the slot and a notice was dispatched
    Notified(EntryKey),
    /// The oracle reported no free slot or capacity
    NoSlot,
    /// No waiting entry exists for the key
    EmptyQueue,
    /// Another entry already holds the slot inside its window
    HoldActive,
    /// A notification already went out for this key this pass
    AlreadyNotifiedThisPass,
    /// A concurrent writer claimed the head entry first
    Lost,
    /// A dependency failed; the next pass will retry
    Deferred,
}

/// Run one scan pass over a single resource type.
///
/// Entries are grouped by resource key and walked oldest-first within
/// each group. Errors are counted in the summary and never propagate.
pub async fn scan_pass<E, S, O>(
    store: &S,
    oracle: &O,
    dispatcher: &NotifyDispatcher,
    config: &EngineConfig,
    now: DateTime<Utc>,
    notified: &mut NotifiedKeys,
) -> PassSummary
where
    E: WaitlistEntry,
    S: WaitlistStore<E>,
    O: AvailabilityOracle,
{
    let mut summary = PassSummary::default();

    let entries = match store.scan_active().await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %e, "active-entry scan failed, skipping pass");
            summary.errors += 1;
            return summary;
        }
    };

    for (key, group) in group_by_resource(entries) {
        // An active hold for the key blocks promotion; a past resource
        // is cleaned up and never cascades.
        let mut hold_active = false;
        let mut resource_past = false;

        for entry in &group {
            match entry.disposition(now) {
                Disposition::Untouched => {
                    if entry.status() == EntryStatus::Notified {
                        hold_active = true;
                    }
                }
                Disposition::Anomaly { reason } => {
                    // The broken entry still reads notified; keep the key
                    // blocked rather than risk a second hold.
                    tracing::warn!(entry = %entry.entry_key(), reason, "skipping anomalous entry");
                    hold_active = true;
                }
                Disposition::ExpirePast => {
                    resource_past = true;
                    if expire(store, entry, &mut summary).await {
                        summary.past_cleaned += 1;
                    }
                }
                Disposition::ExpireNotify => {
                    if expire(store, entry, &mut summary).await {
                        summary.expired += 1;
                    } else {
                        // A concurrent pass got here first; let it own
                        // the follow-up cascade.
                        hold_active = true;
                    }
                }
            }
        }

        if hold_active || resource_past {
            continue;
        }
        if group
            .iter()
            .any(|e| e.status() == EntryStatus::Waiting && !e.is_past(now))
        {
            let outcome = cascade(
                store, oracle, dispatcher, config, now, &key, &group, notified, &mut summary,
            )
            .await;
            tracing::debug!(resource = %key, ?outcome, "cascade attempt");
        }
    }

    summary
}

/// Attempt one cascade for a resource key outside a scan, e.g. after a
/// real-time cancellation freed a slot.
pub async fn cascade_once<E, S, O>(
    store: &S,
    oracle: &O,
    dispatcher: &NotifyDispatcher,
    config: &EngineConfig,
    now: DateTime<Utc>,
    key: &ResourceKey,
) -> Result<CascadeOutcome, StoreError>
where
    E: WaitlistEntry,
    S: WaitlistStore<E>,
    O: AvailabilityOracle,
{
    let mut candidates: Vec<E> = store
        .scan_active()
        .await?
        .into_iter()
        .filter(|e| e.resource_key() == *key)
        .collect();
    candidates.sort_by_key(WaitlistEntry::queued_at);

    let mut notified = NotifiedKeys::new();
    let mut summary = PassSummary::default();

    // Expire any lapsed hold before promoting, as a scan would.
    for entry in &candidates {
        if entry.disposition(now) == Disposition::ExpireNotify {
            expire(store, entry, &mut summary).await;
        }
    }
    Ok(cascade(
        store,
        oracle,
        dispatcher,
        config,
        now,
        key,
        &candidates,
        &mut notified,
        &mut summary,
    )
    .await)
}

/// Group active entries by resource key, oldest-first within each group
fn group_by_resource<E: WaitlistEntry>(entries: Vec<E>) -> BTreeMap<ResourceKey, Vec<E>> {
    let mut groups: BTreeMap<ResourceKey, Vec<E>> = BTreeMap::new();
    for entry in entries {
        groups.entry(entry.resource_key()).or_default().push(entry);
    }
    for group in groups.values_mut() {
        // Never trust the store's iteration order; FIFO is by queued_at.
        group.sort_by_key(WaitlistEntry::queued_at);
    }
    groups
}

/// Conditionally expire one entry. Returns true only if this pass won
/// the write; a conflict means another pass already handled it.
async fn expire<E, S>(store: &S, entry: &E, summary: &mut PassSummary) -> bool
where
    E: WaitlistEntry,
    S: WaitlistStore<E>,
{
    let key = entry.entry_key();
    match store
        .conditional_update(&key, entry.status(), EntryPatch::expired())
        .await
    {
        Ok(UpdateOutcome::Applied) => true,
        Ok(UpdateOutcome::Conflict) => {
            tracing::debug!(entry = %key, "expiry lost to a concurrent writer");
            false
        }
        Err(e) => {
            tracing::warn!(entry = %key, error = %e, "expiry write failed");
            summary.errors += 1;
            false
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn cascade<E, S, O>(
    store: &S,
    oracle: &O,
    dispatcher: &NotifyDispatcher,
    config: &EngineConfig,
    now: DateTime<Utc>,
    key: &ResourceKey,
    candidates: &[E],
    notified: &mut NotifiedKeys,
    summary: &mut PassSummary,
) -> CascadeOutcome
where
    E: WaitlistEntry,
    S: WaitlistStore<E>,
    O: AvailabilityOracle,
{
    if notified.contains(key) {
        return CascadeOutcome::AlreadyNotifiedThisPass;
    }

    // A live hold (including an anomalous one with no recorded window)
    // blocks promotion; the at-most-one-hold invariant is per key.
    let live_hold = candidates.iter().any(|e| {
        e.status() == EntryStatus::Notified
            && !e.is_past(now)
            && e.expires_at().map_or(true, |deadline| deadline >= now)
    });
    if live_hold {
        return CascadeOutcome::HoldActive;
    }

    match oracle.has_open_slot(key).await {
        Ok(true) => {}
        Ok(false) => return CascadeOutcome::NoSlot,
        Err(e) => {
            tracing::warn!(resource = %key, error = %e, "availability lookup failed");
            summary.errors += 1;
            return CascadeOutcome::Deferred;
        }
    }

    // Candidates are already queued_at-ascending; the head waiting entry
    // is the FIFO winner.
    let Some(head) = candidates
        .iter()
        .find(|e| e.status() == EntryStatus::Waiting && !e.is_past(now))
    else {
        return CascadeOutcome::EmptyQueue;
    };

    let entry_key = head.entry_key();
    match store
        .conditional_update(
            &entry_key,
            EntryStatus::Waiting,
            EntryPatch::notified(now, config.notify_window),
        )
        .await
    {
        Ok(UpdateOutcome::Applied) => {}
        Ok(UpdateOutcome::Conflict) => {
            tracing::debug!(entry = %entry_key, "promotion lost to a concurrent writer");
            return CascadeOutcome::Lost;
        }
        Err(e) => {
            tracing::warn!(entry = %entry_key, error = %e, "promotion write failed");
            summary.errors += 1;
            return CascadeOutcome::Deferred;
        }
    }

    notified.mark(key.clone());
    summary.notified += 1;

    // The hold stands even if dispatch fails; delivery is best-effort.
    let notice = notice_for(&config.claim_base_url, head);
    if let Err(e) = dispatcher.enqueue(notice) {
        tracing::warn!(entry = %entry_key, error = %e, "could not queue slot notice");
    }

    CascadeOutcome::Notified(entry_key)
}

#[cfg(test)]
#[path = "pass_tests.rs"]
mod tests;
