// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Waitlist entry state machine
//!
//! An entry moves `waiting -> notified -> {expired, booked}`, with two
//! extra exits: `waiting -> expired` when the resource itself passes, and
//! `notified -> expired` when the claim window lapses. `expired` and
//! `booked` are terminal. The engine never writes an entry directly; every
//! transition is a conditional update keyed on the current status.

use crate::clock::Clock;
use crate::id::{EntryId, TenantId};
use crate::resource::ResourceKey;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a waitlist entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Queued, waiting for a slot to free up
    Waiting,
    /// Holding a freed slot, must claim before the window lapses
    Notified,
    /// Window lapsed, resource passed, or someone else claimed the slot
    Expired,
    /// Converted into a booking
    Booked,
}

impl EntryStatus {
    /// Terminal states admit no further transitions
    pub fn is_terminal(self) -> bool {
        matches!(self, EntryStatus::Expired | EntryStatus::Booked)
    }

    /// Active states are the ones a store scan returns
    pub fn is_active(self) -> bool {
        matches!(self, EntryStatus::Waiting | EntryStatus::Notified)
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStatus::Waiting => write!(f, "waiting"),
            EntryStatus::Notified => write!(f, "notified"),
            EntryStatus::Expired => write!(f, "expired"),
            EntryStatus::Booked => write!(f, "booked"),
        }
    }
}

/// The visitor queued on a waitlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visitor {
    pub name: String,
    pub email: String,
}

impl Visitor {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Full identity of one entry: its resource key plus entry id
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryKey {
    pub resource: ResourceKey,
    pub entry: EntryId,
}

impl EntryKey {
    pub fn new(resource: ResourceKey, entry: EntryId) -> Self {
        Self { resource, entry }
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource, self.entry)
    }
}

/// Field changes applied by a conditional update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPatch {
    pub status: EntryStatus,
    pub notified_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl EntryPatch {
    /// Transition to `expired`, clearing any claim window
    pub fn expired() -> Self {
        Self {
            status: EntryStatus::Expired,
            notified_at: None,
            expires_at: None,
        }
    }

    /// Transition to `notified`, stamping the claim window
    pub fn notified(now: DateTime<Utc>, window: Duration) -> Self {
        Self {
            status: EntryStatus::Notified,
            notified_at: Some(now),
            expires_at: Some(now + window),
        }
    }
}

/// What a scan pass should do with one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The resource itself is gone; expire, never cascade
    ExpirePast,
    /// The claim window lapsed; expire and attempt a cascade
    ExpireNotify,
    /// Inconsistent data; log and skip
    Anomaly { reason: &'static str },
    /// Terminal or healthy; nothing to do this pass
    Untouched,
}

/// The shape of an entry the cascade engine scans over
///
/// Implemented by both waitlist flavors. `apply` mirrors the store's
/// conditional-update patch so in-process stores share the semantics.
pub trait WaitlistEntry: Clone + Send + Sync + 'static {
    fn entry_key(&self) -> EntryKey;
    fn resource_key(&self) -> ResourceKey;
    fn status(&self) -> EntryStatus;
    fn queued_at(&self) -> DateTime<Utc>;
    fn expires_at(&self) -> Option<DateTime<Utc>>;
    fn visitor(&self) -> &Visitor;

    /// Whether the underlying resource is entirely in the past
    fn is_past(&self, now: DateTime<Utc>) -> bool;

    /// Apply a conditional-update patch to this entry
    fn apply(&mut self, patch: &EntryPatch);

    /// Classify this entry for one scan pass
    fn disposition(&self, now: DateTime<Utc>) -> Disposition {
        if self.status().is_terminal() {
            return Disposition::Untouched;
        }
        // Past-resource cleanup wins over notify-expiry: the resource is
        // gone, not a freed slot.
        if self.is_past(now) {
            return Disposition::ExpirePast;
        }
        match self.status() {
            EntryStatus::Notified => match self.expires_at() {
                None => Disposition::Anomaly {
                    reason: "notified entry has no expires_at",
                },
                Some(deadline) if deadline < now => Disposition::ExpireNotify,
                Some(_) => Disposition::Untouched,
            },
            _ => Disposition::Untouched,
        }
    }
}

/// One visitor queued for a specific tenant and bookable date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingEntry {
    pub tenant: TenantId,
    pub date: NaiveDate,
    pub id: EntryId,
    pub visitor: Visitor,
    pub status: EntryStatus,
    pub queued_at: DateTime<Utc>,
    pub notified_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl BookingEntry {
    /// Create a fresh `waiting` entry queued now
    pub fn new(
        tenant: impl Into<TenantId>,
        date: NaiveDate,
        visitor: Visitor,
        clock: &impl Clock,
    ) -> Self {
        Self {
            tenant: tenant.into(),
            date,
            id: EntryId::generate(),
            visitor,
            status: EntryStatus::Waiting,
            queued_at: clock.now(),
            notified_at: None,
            expires_at: None,
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
}

impl WaitlistEntry for BookingEntry {
    fn entry_key(&self) -> EntryKey {
        EntryKey::new(self.resource_key(), self.id.clone())
    }

    fn resource_key(&self) -> ResourceKey {
        ResourceKey::Booking {
            tenant: self.tenant.clone(),
            date: self.date,
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
        self.date < now.date_naive()
    }

    fn apply(&mut self, patch: &EntryPatch) {
        self.status = patch.status;
        self.notified_at = patch.notified_at;
        self.expires_at = patch.expires_at;
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
