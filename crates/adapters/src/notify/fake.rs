// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake notifier for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use wl_core::{Notifier, NotifyError, SlotNotice};

#[derive(Default)]
struct Inner {
    sent: Vec<SlotNotice>,
    fail_remaining: u32,
}

/// Fake notifier that records every delivered notice
///
/// `fail_times` scripts the next N deliveries to fail, for exercising the
/// dispatcher's retry path.
#[derive(Clone, Default)]
pub struct FakeNotifier {
    inner: Arc<Mutex<Inner>>,
}

impl FakeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices delivered so far
    pub fn sent(&self) -> Vec<SlotNotice> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .sent
            .clone()
    }

    /// Fail the next `n` delivery attempts
    pub fn fail_times(&self, n: u32) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .fail_remaining = n;
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn notify(&self, notice: SlotNotice) -> Result<(), NotifyError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if inner.fail_remaining > 0 {
            inner.fail_remaining -= 1;
            return Err(NotifyError::Failed("injected delivery failure".to_string()));
        }
        inner.sent.push(notice);
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
