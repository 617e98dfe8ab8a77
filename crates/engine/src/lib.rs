// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Waitlist cascade and expiry engine
//!
//! One scan pass classifies every active entry, expires the stale ones,
//! and promotes at most one waiting entry per resource key. All state
//! transitions go through the store's conditional update, so overlapping
//! passes and real-time cancellation triggers race safely.

mod claim;
mod config;
mod dispatch;
mod engine;
mod pass;

pub use claim::{claim_url, notice_for};
pub use config::{EngineConfig, RetryPolicy};
pub use dispatch::NotifyDispatcher;
pub use engine::CascadeEngine;
pub use pass::{cascade_once, scan_pass, CascadeOutcome, NotifiedKeys};
