// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapter trait definitions for external collaborators
//!
//! The engine touches the outside world through three seams: the waitlist
//! store (the only mutation primitive is a per-entry conditional update),
//! the availability oracle, and the best-effort notifier.

use crate::entry::{EntryKey, EntryPatch, EntryStatus, WaitlistEntry};
use crate::id::{ProductId, TenantId};
use crate::resource::ResourceKey;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Waitlist Store
// =============================================================================

/// Result of a conditional write
///
/// A conflict means the entry's status no longer matched the expectation at
/// write time. Conflicts are expected and non-exceptional: whoever's write
/// applied owns the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Applied,
    Conflict,
}

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("entry not found: {0}")]
    NotFound(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Adapter for the per-tenant waitlist store
///
/// `conditional_update` is the sole arbiter of claim ownership: two
/// concurrent writers racing on the same entry see exactly one `Applied`.
#[async_trait]
pub trait WaitlistStore<E: WaitlistEntry>: Clone + Send + Sync + 'static {
    /// All entries with status in `{waiting, notified}`
    async fn scan_active(&self) -> Result<Vec<E>, StoreError>;

    /// Apply `patch` iff the entry's status still equals `expected`
    async fn conditional_update(
        &self,
        key: &EntryKey,
        expected: EntryStatus,
        patch: EntryPatch,
    ) -> Result<UpdateOutcome, StoreError>;
}

// =============================================================================
// Availability Oracle
// =============================================================================

/// Errors from availability lookups
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("availability lookup failed: {0}")]
    LookupFailed(String),
}

/// Adapter for the external availability calculator
#[async_trait]
pub trait AvailabilityOracle: Clone + Send + Sync + 'static {
    /// Whether at least one bookable calendar slot exists for the date
    async fn check_availability(
        &self,
        tenant: &TenantId,
        date: NaiveDate,
    ) -> Result<bool, OracleError>;

    /// Remaining webinar capacity: `max_participants - current_signups`
    async fn remaining_capacity(
        &self,
        tenant: &TenantId,
        product: &ProductId,
    ) -> Result<u32, OracleError>;

    /// Whether the resource behind `key` has an open slot
    async fn has_open_slot(&self, key: &ResourceKey) -> Result<bool, OracleError> {
        match key {
            ResourceKey::Booking { tenant, date } => self.check_availability(tenant, *date).await,
            ResourceKey::Webinar { tenant, product } => {
                Ok(self.remaining_capacity(tenant, product).await? > 0)
            }
        }
    }
}

// =============================================================================
// Notifier
// =============================================================================

/// The "your slot is available" message handed to the notifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotNotice {
    pub recipient_email: String,
    pub recipient_name: String,
    pub claim_url: String,
    pub context: String,
}

/// Errors from notification delivery
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification failed: {0}")]
    Failed(String),
    #[error("notification queue is full")]
    QueueFull,
    #[error("notification queue is closed")]
    QueueClosed,
}

/// Adapter for notification delivery; best-effort, never awaited for
/// correctness
#[async_trait]
pub trait Notifier: Clone + Send + Sync + 'static {
    async fn notify(&self, notice: SlotNotice) -> Result<(), NotifyError>;
}

#[cfg(test)]
#[path = "traits_tests.rs"]
mod tests;
