// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! wl-core: Core library for the Waitline waitlist engine
//!
//! This crate provides:
//! - Pure state machines for booking and webinar waitlist entries
//! - The deadline-based refund proration policy
//! - Adapter traits for the store, availability oracle, and notifier seams
//! - Pass summary types reported by a trigger invocation

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod clock;
pub mod id;

pub mod adapters;

// State machines and policy (order matters for dependencies)
pub mod resource;
pub mod entry;
pub mod webinar;
pub mod refund;
pub mod summary;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use entry::{
    BookingEntry, Disposition, EntryKey, EntryPatch, EntryStatus, Visitor, WaitlistEntry,
};
pub use id::{EntryId, ProductId, TenantId};
pub use refund::{calculate_refund, is_before_deadline, CancellationPolicy, RefundDecision, RefundTier};
pub use resource::{ResourceKey, ResourceType};
pub use summary::{PassReport, PassSummary};
pub use webinar::{Session, WebinarEntry};

// Re-export adapter contracts
pub use adapters::{
    AvailabilityOracle, Notifier, NotifyError, OracleError, SlotNotice, StoreError, UpdateOutcome,
    WaitlistStore,
};
