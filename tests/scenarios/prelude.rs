// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for the scenario tests

use chrono::{DateTime, NaiveDate, Utc};
use wl_adapters::{FakeNotifier, FakeOracle, MemoryStore};
use wl_core::{
    BookingEntry, EntryStatus, FakeClock, Session, Visitor, WebinarEntry,
};
use wl_engine::{CascadeEngine, EngineConfig};

pub fn t(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

pub fn march_10() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

pub struct Harness {
    pub bookings: MemoryStore<BookingEntry>,
    pub webinars: MemoryStore<WebinarEntry>,
    pub oracle: FakeOracle,
    pub notifier: FakeNotifier,
    pub clock: FakeClock,
}

impl Harness {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            bookings: MemoryStore::new(),
            webinars: MemoryStore::new(),
            oracle: FakeOracle::new(),
            notifier: FakeNotifier::new(),
            clock: FakeClock::at(now),
        }
    }

    pub fn engine(
        &self,
    ) -> CascadeEngine<MemoryStore<BookingEntry>, MemoryStore<WebinarEntry>, FakeOracle, FakeClock>
    {
        CascadeEngine::new(
            self.bookings.clone(),
            self.webinars.clone(),
            self.oracle.clone(),
            self.notifier.clone(),
            self.clock.clone(),
            EngineConfig::new("https://book.example.com"),
        )
    }
}

pub fn waiting_booking(id: &str, email: &str, queued_at: DateTime<Utc>) -> BookingEntry {
    BookingEntry {
        tenant: "t-1".into(),
        date: march_10(),
        id: id.into(),
        visitor: Visitor::new("Ada", email),
        status: EntryStatus::Waiting,
        queued_at,
        notified_at: None,
        expires_at: None,
    }
}

pub fn notified_booking(id: &str, email: &str, expires_at: DateTime<Utc>) -> BookingEntry {
    BookingEntry {
        status: EntryStatus::Notified,
        notified_at: Some(expires_at - chrono::Duration::minutes(10)),
        expires_at: Some(expires_at),
        ..waiting_booking(id, email, expires_at - chrono::Duration::hours(1))
    }
}

pub fn waiting_webinar(id: &str, email: &str, queued_at: DateTime<Utc>) -> WebinarEntry {
    WebinarEntry::new(
        "t-1",
        "yoga-101",
        Visitor::new("Dave", email),
        vec![Session::new(
            t("2025-06-01T18:00:00Z"),
            t("2025-06-01T19:00:00Z"),
        )],
        &FakeClock::at(queued_at),
    )
    .with_id(id)
}

pub fn notified_webinar(id: &str, email: &str, expires_at: DateTime<Utc>) -> WebinarEntry {
    WebinarEntry {
        status: EntryStatus::Notified,
        notified_at: Some(expires_at - chrono::Duration::minutes(10)),
        expires_at: Some(expires_at),
        ..waiting_webinar(id, email, expires_at - chrono::Duration::hours(1))
    }
}
