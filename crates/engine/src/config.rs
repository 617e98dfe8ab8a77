// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine configuration

use chrono::Duration;

/// How long a notified visitor has to claim the slot before the hold
/// expires and the next waiting entry is considered.
pub const DEFAULT_NOTIFY_WINDOW_SECS: i64 = 600;

/// Default bound on the notification dispatch queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Retry policy for notification delivery
///
/// Delivery is best-effort and retried inside the dispatcher worker;
/// it never blocks or fails a state transition.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Base delay, doubled after every failed attempt.
    pub backoff: std::time::Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: std::time::Duration::from_millis(500),
        }
    }
}

/// Tunables for a cascade engine instance
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL claim links are built from.
    pub claim_base_url: String,
    /// Hold duration stamped on a newly notified entry.
    pub notify_window: Duration,
    /// Capacity of the bounded notification queue.
    pub queue_capacity: usize,
    pub notify_retry: RetryPolicy,
}

impl EngineConfig {
    pub fn new(claim_base_url: impl Into<String>) -> Self {
        Self {
            claim_base_url: claim_base_url.into(),
            notify_window: Duration::seconds(DEFAULT_NOTIFY_WINDOW_SECS),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            notify_retry: RetryPolicy::default(),
        }
    }

    pub fn with_notify_window(mut self, window: Duration) -> Self {
        self.notify_window = window;
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn with_notify_retry(mut self, retry: RetryPolicy) -> Self {
        self.notify_retry = retry;
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
