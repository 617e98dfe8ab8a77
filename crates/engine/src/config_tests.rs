// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn defaults_use_ten_minute_window() {
    let config = EngineConfig::new("https://book.example.com");
    assert_eq!(config.notify_window, Duration::minutes(10));
    assert_eq!(config.queue_capacity, DEFAULT_QUEUE_CAPACITY);
    assert_eq!(config.notify_retry.max_attempts, 3);
}

#[test]
fn builder_overrides_stick() {
    let config = EngineConfig::new("https://book.example.com")
        .with_notify_window(Duration::minutes(30))
        .with_queue_capacity(8)
        .with_notify_retry(RetryPolicy {
            max_attempts: 1,
            backoff: std::time::Duration::from_millis(10),
        });

    assert_eq!(config.notify_window, Duration::minutes(30));
    assert_eq!(config.queue_capacity, 8);
    assert_eq!(config.notify_retry.max_attempts, 1);
}
