// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deadline-based refund proration
//!
//! Pure policy evaluation: cancellations at or before the tenant's deadline
//! refund in full; inside the deadline the refund drops to the tenant's
//! configured tier (zero when no tier matches). Executing a refund against
//! the payment gateway is an explicit caller step, never done here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One graduated proration step below the deadline
///
/// Matches when `hours_until_start / deadline_hours >= min_ratio`. Tiers
/// are kept sorted by `min_ratio` descending so the most generous matching
/// tier wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundTier {
    pub min_ratio: f64,
    pub percent: u8,
}

/// Per-tenant cancellation policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancellationPolicy {
    /// Minimum lead time, in hours before the first session or slot start,
    /// for a cancellation to refund in full
    pub cancellation_deadline_hours: i64,
    /// Graduated tiers applied inside the deadline; empty means no refund
    #[serde(default)]
    pub tiers: Vec<RefundTier>,
}

impl CancellationPolicy {
    /// Full refund before the deadline, nothing after
    pub fn new(cancellation_deadline_hours: i64) -> Self {
        Self {
            cancellation_deadline_hours,
            tiers: Vec::new(),
        }
    }

    /// Add a graduated tier (kept sorted, most generous first)
    pub fn with_tier(mut self, min_ratio: f64, percent: u8) -> Self {
        self.tiers.push(RefundTier { min_ratio, percent });
        self.tiers
            .sort_by(|a, b| b.min_ratio.total_cmp(&a.min_ratio));
        self
    }
}

/// Outcome of a refund policy evaluation; transient, never persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundDecision {
    pub amount_cents: u64,
    pub is_full_refund: bool,
    pub reason: String,
}

/// Whether a cancellation made now still falls at or before the deadline
///
/// The boundary is inclusive: cancelling exactly `deadline_hours` before
/// the start refunds in full.
pub fn is_before_deadline(
    event_start: DateTime<Utc>,
    policy: &CancellationPolicy,
    now: DateTime<Utc>,
) -> bool {
    (event_start - now).num_seconds() >= policy.cancellation_deadline_hours * 3600
}

/// Evaluate the refund for a cancellation made at `now`
///
/// Pure and idempotent: same inputs, same decision, no side effects.
pub fn calculate_refund(
    paid_amount_cents: u64,
    event_start: DateTime<Utc>,
    policy: &CancellationPolicy,
    now: DateTime<Utc>,
) -> RefundDecision {
    if paid_amount_cents == 0 {
        return RefundDecision {
            amount_cents: 0,
            is_full_refund: true,
            reason: "No payment to refund".to_string(),
        };
    }

    if is_before_deadline(event_start, policy, now) {
        return RefundDecision {
            amount_cents: paid_amount_cents,
            is_full_refund: true,
            reason: "Cancelled before deadline".to_string(),
        };
    }

    let seconds_until = (event_start - now).num_seconds().max(0) as f64;
    let deadline_seconds = (policy.cancellation_deadline_hours * 3600) as f64;
    let ratio = if deadline_seconds > 0.0 {
        seconds_until / deadline_seconds
    } else {
        0.0
    };

    for tier in &policy.tiers {
        if ratio >= tier.min_ratio {
            return RefundDecision {
                amount_cents: paid_amount_cents * u64::from(tier.percent) / 100,
                is_full_refund: false,
                reason: format!(
                    "Cancelled inside {}h window: {}% refund",
                    policy.cancellation_deadline_hours, tier.percent
                ),
            };
        }
    }

    RefundDecision {
        amount_cents: 0,
        is_full_refund: false,
        reason: format!(
            "Cancelled inside {}h window: no refund",
            policy.cancellation_deadline_hours
        ),
    }
}

#[cfg(test)]
#[path = "refund_tests.rs"]
mod tests;
