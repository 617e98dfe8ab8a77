// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine facade tying the stores, oracle, clock, and dispatcher together
//!
//! The engine is stateless between runs: each `run` performs one full
//! scan-and-cascade pass over both waitlist flavors with a fresh
//! notified-keys accumulator. Real-time cancellation triggers reuse the
//! same conditional-write path, so they interleave safely with scans.

use crate::config::EngineConfig;
use crate::dispatch::NotifyDispatcher;
use crate::pass::{cascade_once, scan_pass, CascadeOutcome, NotifiedKeys};
use chrono::NaiveDate;
use wl_core::{
    AvailabilityOracle, BookingEntry, Clock, Notifier, PassReport, ProductId, ResourceKey,
    StoreError, TenantId, WaitlistStore, WebinarEntry,
};

pub struct CascadeEngine<SB, SW, O, C> {
    bookings: SB,
    webinars: SW,
    oracle: O,
    clock: C,
    config: EngineConfig,
    dispatcher: NotifyDispatcher,
}

impl<SB, SW, O, C> CascadeEngine<SB, SW, O, C>
where
    SB: WaitlistStore<BookingEntry>,
    SW: WaitlistStore<WebinarEntry>,
    O: AvailabilityOracle,
    C: Clock,
{
    /// Build an engine and spawn its notification dispatch worker
    pub fn new<N: Notifier>(
        bookings: SB,
        webinars: SW,
        oracle: O,
        notifier: N,
        clock: C,
        config: EngineConfig,
    ) -> Self {
        let dispatcher = NotifyDispatcher::spawn(
            notifier,
            config.queue_capacity,
            config.notify_retry.clone(),
        );
        Self {
            bookings,
            webinars,
            oracle,
            clock,
            config,
            dispatcher,
        }
    }

    /// Run one scan-and-cascade pass over both waitlist flavors
    pub async fn run(&self) -> PassReport {
        let now = self.clock.now();
        let mut notified = NotifiedKeys::new();

        let bookings = scan_pass(
            &self.bookings,
            &self.oracle,
            &self.dispatcher,
            &self.config,
            now,
            &mut notified,
        )
        .await;
        let webinars = scan_pass(
            &self.webinars,
            &self.oracle,
            &self.dispatcher,
            &self.config,
            now,
            &mut notified,
        )
        .await;

        let report = PassReport { bookings, webinars };
        tracing::info!(%report, "scan pass complete");
        report
    }

    /// Cascade after a real-time booking cancellation freed a slot
    pub async fn cascade_booking(
        &self,
        tenant: impl Into<TenantId>,
        date: NaiveDate,
    ) -> Result<CascadeOutcome, StoreError> {
        cascade_once(
            &self.bookings,
            &self.oracle,
            &self.dispatcher,
            &self.config,
            self.clock.now(),
            &ResourceKey::booking(tenant, date),
        )
        .await
    }

    /// Cascade after a real-time webinar cancellation freed capacity
    pub async fn cascade_webinar(
        &self,
        tenant: impl Into<TenantId>,
        product: impl Into<ProductId>,
    ) -> Result<CascadeOutcome, StoreError> {
        cascade_once(
            &self.webinars,
            &self.oracle,
            &self.dispatcher,
            &self.config,
            self.clock.now(),
            &ResourceKey::webinar(tenant, product),
        )
        .await
    }

    /// Flush pending notices and stop the dispatch worker
    pub async fn shutdown(self) {
        self.dispatcher.drain().await;
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
