// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Webinar waitlist entries
//!
//! Structurally parallel to booking entries but keyed by product, and
//! "past" means every expanded session has ended. A slot here is one unit
//! of remaining capacity rather than a calendar opening.

use crate::clock::Clock;
use crate::entry::{EntryKey, EntryPatch, EntryStatus, Visitor, WaitlistEntry};
use crate::id::{EntryId, ProductId, TenantId};
use crate::resource::ResourceKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scheduled session of a webinar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl Session {
    pub fn new(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Self {
        Self { starts_at, ends_at }
    }

    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        self.ends_at < now
    }
}

/// One visitor queued for a capacity-limited webinar product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebinarEntry {
    pub tenant: TenantId,
    pub product: ProductId,
    pub id: EntryId,
    pub visitor: Visitor,
    pub status: EntryStatus,
    pub queued_at: DateTime<Utc>,
    pub notified_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub sessions: Vec<Session>,
}

impl WebinarEntry {
    /// Create a fresh `waiting` entry queued now
    pub fn new(
        tenant: impl Into<TenantId>,
        product: impl Into<ProductId>,
        visitor: Visitor,
        sessions: Vec<Session>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            tenant: tenant.into(),
            product: product.into(),
            id: EntryId::generate(),
            visitor,
            status: EntryStatus::Waiting,
            queued_at: clock.now(),
            notified_at: None,
            expires_at: None,
            sessions,
        }
    }

    pub fn with_id(mut self, id: impl Into<EntryId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_queued_at(mut self, queued_at: DateTime<Utc>) -> Self {
        self.queued_at = queued_at;
        self
    }

    /// Start of the earliest session, used by refund callers
    pub fn first_session_start(&self) -> Option<DateTime<Utc>> {
        self.sessions.iter().map(|s| s.starts_at).min()
    }
}

impl WaitlistEntry for WebinarEntry {
    fn entry_key(&self) -> EntryKey {
        EntryKey::new(self.resource_key(), self.id.clone())
    }

    fn resource_key(&self) -> ResourceKey {
        ResourceKey::Webinar {
            tenant: self.tenant.clone(),
            product: self.product.clone(),
        }
    }

    fn status(&self) -> EntryStatus {
        self.status
    }

    fn queued_at(&self) -> DateTime<Utc> {
        self.queued_at
    }

    fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    fn visitor(&self) -> &Visitor {
        &self.visitor
    }

    fn is_past(&self, now: DateTime<Utc>) -> bool {
        // An entry with no scheduled sessions is never past; sessions may
        // simply not be published yet.
        !self.sessions.is_empty() && self.sessions.iter().all(|s| s.has_ended(now))
    }

    fn apply(&mut self, patch: &EntryPatch) {
        self.status = patch.status;
        self.notified_at = patch.notified_at;
        self.expires_at = patch.expires_at;
    }
}

#[cfg(test)]
#[path = "webinar_tests.rs"]
mod tests;
