// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Visitor-initiated cancellation refund scenarios

use crate::prelude::t;
use wl_core::{calculate_refund, is_before_deadline, CancellationPolicy};

#[test]
fn cancelling_well_before_the_deadline_refunds_in_full() {
    let policy = CancellationPolicy::new(48);
    let start = t("2025-03-04T12:00:00Z");
    let now = t("2025-03-01T12:00:00Z"); // 72h out

    let decision = calculate_refund(10_000, start, &policy, now);
    assert_eq!(decision.amount_cents, 10_000);
    assert!(decision.is_full_refund);
}

#[test]
fn cancelling_inside_the_window_is_never_full() {
    let start = t("2025-03-01T22:00:00Z");
    let now = t("2025-03-01T12:00:00Z"); // 10h out, 48h deadline

    let bare = CancellationPolicy::new(48);
    let decision = calculate_refund(10_000, start, &bare, now);
    assert!(!decision.is_full_refund);
    assert_eq!(decision.amount_cents, 0);

    let tiered = CancellationPolicy::new(48).with_tier(0.0, 50);
    let decision = calculate_refund(10_000, start, &tiered, now);
    assert!(!decision.is_full_refund);
    assert_eq!(decision.amount_cents, 5_000);
}

#[test]
fn deadline_boundary_is_inclusive_to_the_second() {
    let policy = CancellationPolicy::new(48);
    let start = t("2025-03-03T12:00:00Z");

    assert!(is_before_deadline(start, &policy, t("2025-03-01T12:00:00Z")));
    let at_boundary = calculate_refund(10_000, start, &policy, t("2025-03-01T12:00:00Z"));
    assert!(at_boundary.is_full_refund);

    let one_second_late = calculate_refund(10_000, start, &policy, t("2025-03-01T12:00:01Z"));
    assert!(!one_second_late.is_full_refund);
}

#[test]
fn nothing_paid_means_nothing_to_refund() {
    let policy = CancellationPolicy::new(48);
    let decision = calculate_refund(0, t("2025-03-01T12:00:00Z"), &policy, t("2025-03-01T11:00:00Z"));
    assert_eq!(decision.amount_cents, 0);
    assert!(decision.is_full_refund);
}

#[test]
fn graduated_tiers_scale_with_remaining_lead_time() {
    let policy = CancellationPolicy::new(48)
        .with_tier(0.5, 75)
        .with_tier(0.25, 50)
        .with_tier(0.0, 10);
    let start = t("2025-03-03T12:00:00Z");

    // 36h of a 48h deadline remaining: ratio 0.75 lands in the 75% tier.
    let decision = calculate_refund(10_000, start, &policy, t("2025-03-02T00:00:00Z"));
    assert_eq!(decision.amount_cents, 7_500);

    // 18h remaining: ratio 0.375 lands in the 50% tier.
    let decision = calculate_refund(10_000, start, &policy, t("2025-03-02T18:00:00Z"));
    assert_eq!(decision.amount_cents, 5_000);

    // 1h remaining: ratio ~0.02 falls through to the 10% tier.
    let decision = calculate_refund(10_000, start, &policy, t("2025-03-03T11:00:00Z"));
    assert_eq!(decision.amount_cents, 1_000);
}
