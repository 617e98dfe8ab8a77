// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end cascade scenarios over the engine facade

use crate::prelude::*;
use wl_adapters::JsonStore;
use wl_core::{EntryStatus, WaitlistEntry, WaitlistStore};
use wl_engine::CascadeOutcome;

#[tokio::test]
async fn open_slot_notifies_the_earliest_queued_visitor() {
    let now = t("2025-03-01T10:10:00Z");
    let h = Harness::new(now);
    h.bookings
        .put(waiting_booking("a", "a@example.com", t("2025-03-01T10:00:00Z")));
    h.bookings
        .put(waiting_booking("b", "b@example.com", t("2025-03-01T10:05:00Z")));
    h.oracle.set_available("t-1", march_10(), true);

    let engine = h.engine();
    let report = engine.run().await;

    assert_eq!(report.bookings.notified, 1);
    let a = h.bookings.get(&waiting_booking("a", "", now).entry_key()).unwrap();
    assert_eq!(a.status, EntryStatus::Notified);
    assert_eq!(a.expires_at, Some(now + chrono::Duration::minutes(10)));
    let b = h.bookings.get(&waiting_booking("b", "", now).entry_key()).unwrap();
    assert_eq!(b.status, EntryStatus::Waiting);

    engine.shutdown().await;
    let sent = h.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient_email, "a@example.com");
}

#[tokio::test]
async fn lapsed_hold_expires_and_the_next_in_line_is_notified() {
    let now = t("2025-03-01T09:05:00Z");
    let h = Harness::new(now);
    h.bookings
        .put(notified_booking("a", "a@example.com", t("2025-03-01T09:00:00Z")));
    h.bookings
        .put(waiting_booking("b", "b@example.com", t("2025-03-01T08:00:00Z")));
    h.oracle.set_available("t-1", march_10(), true);

    let engine = h.engine();
    let report = engine.run().await;

    assert_eq!(report.bookings.expired, 1);
    assert_eq!(report.bookings.notified, 1);
    let a = h.bookings.get(&notified_booking("a", "", now).entry_key()).unwrap();
    assert_eq!(a.status, EntryStatus::Expired);
    let b = h.bookings.get(&waiting_booking("b", "", now).entry_key()).unwrap();
    assert_eq!(b.status, EntryStatus::Notified);
}

#[tokio::test]
async fn webinar_at_capacity_expires_the_hold_but_never_cascades() {
    let now = t("2025-03-01T09:05:00Z");
    let h = Harness::new(now);
    h.webinars
        .put(notified_webinar("c", "c@example.com", t("2025-03-01T09:00:00Z")));
    h.webinars
        .put(waiting_webinar("d", "d@example.com", t("2025-03-01T08:00:00Z")));
    h.oracle.set_capacity("t-1", "yoga-101", 10, 10);

    let engine = h.engine();
    let report = engine.run().await;

    assert_eq!(report.webinars.expired, 1);
    assert_eq!(report.webinars.notified, 0);
    let d = h.webinars.get(&waiting_webinar("d", "", now).entry_key()).unwrap();
    assert_eq!(d.status, EntryStatus::Waiting);
}

#[tokio::test]
async fn past_date_wins_over_a_still_valid_hold() {
    // The date is gone; the hold is expired by the past-date rule and no
    // cascade fires even though the window was still open.
    let now = t("2025-04-01T09:00:00Z");
    let h = Harness::new(now);
    h.bookings
        .put(notified_booking("a", "a@example.com", t("2025-04-01T12:00:00Z")));
    h.bookings
        .put(waiting_booking("b", "b@example.com", t("2025-03-01T08:00:00Z")));
    h.oracle.set_available("t-1", march_10(), true);

    let engine = h.engine();
    let report = engine.run().await;

    assert_eq!(report.bookings.past_cleaned, 2);
    assert_eq!(report.bookings.notified, 0);

    engine.shutdown().await;
    assert!(h.notifier.sent().is_empty());
}

#[tokio::test]
async fn immediate_rerun_produces_no_additional_notifications() {
    let now = t("2025-03-01T09:05:00Z");
    let h = Harness::new(now);
    h.bookings
        .put(notified_booking("a", "a@example.com", t("2025-03-01T09:00:00Z")));
    h.bookings
        .put(waiting_booking("b", "b@example.com", t("2025-03-01T08:00:00Z")));
    h.oracle.set_available("t-1", march_10(), true);

    let engine = h.engine();
    let first = engine.run().await;
    assert_eq!(first.bookings.notified, 1);

    let second = engine.run().await;
    assert!(second.bookings.is_empty());
    assert!(second.webinars.is_empty());
}

#[tokio::test]
async fn at_most_one_hold_per_resource_across_scan_and_triggers() {
    // Two stale holds expire in one scan while real-time cancellation
    // triggers race in; the key never carries more than one live hold.
    let now = t("2025-03-01T09:05:00Z");
    let h = Harness::new(now);
    h.bookings
        .put(notified_booking("a", "a@example.com", t("2025-03-01T09:00:00Z")));
    h.bookings
        .put(notified_booking("b", "b@example.com", t("2025-03-01T09:01:00Z")));
    h.bookings
        .put(waiting_booking("c", "c@example.com", t("2025-03-01T08:00:00Z")));
    h.bookings
        .put(waiting_booking("d", "d@example.com", t("2025-03-01T08:30:00Z")));
    h.oracle.set_available("t-1", march_10(), true);

    let engine = h.engine();
    let report = engine.run().await;
    assert_eq!(report.bookings.expired, 2);
    assert_eq!(report.bookings.notified, 1);

    for _ in 0..3 {
        let outcome = engine.cascade_booking("t-1", march_10()).await.unwrap();
        assert!(
            !matches!(outcome, CascadeOutcome::Notified(_)),
            "second hold was created: {:?}",
            outcome
        );
    }

    let holds = h
        .bookings
        .scan_active()
        .await
        .unwrap()
        .into_iter()
        .filter(|e| e.status == EntryStatus::Notified)
        .count();
    assert_eq!(holds, 1);
}

#[tokio::test]
async fn promotions_survive_a_store_reload() {
    let now = t("2025-03-01T10:10:00Z");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bookings.json");

    let bookings: JsonStore<wl_core::BookingEntry> = JsonStore::open(&path).unwrap();
    bookings
        .put(&waiting_booking("a", "a@example.com", t("2025-03-01T10:00:00Z")))
        .unwrap();

    let webinars: JsonStore<wl_core::WebinarEntry> =
        JsonStore::open(dir.path().join("webinars.json")).unwrap();
    let oracle = wl_adapters::FakeOracle::new();
    oracle.set_available("t-1", march_10(), true);

    let engine = wl_engine::CascadeEngine::new(
        bookings,
        webinars,
        oracle,
        wl_adapters::FakeNotifier::new(),
        wl_core::FakeClock::at(now),
        wl_engine::EngineConfig::new("https://book.example.com"),
    );
    let report = engine.run().await;
    assert_eq!(report.bookings.notified, 1);
    engine.shutdown().await;

    // A fresh store over the same file sees the promotion.
    let reloaded: JsonStore<wl_core::BookingEntry> = JsonStore::open(&path).unwrap();
    let entry = reloaded
        .get(&waiting_booking("a", "", now).entry_key())
        .unwrap()
        .unwrap();
    assert_eq!(entry.status, EntryStatus::Notified);
}
