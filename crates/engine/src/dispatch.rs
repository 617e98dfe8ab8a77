// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded notification dispatch
//!
//! Promotion to `notified` and delivery of the notice are decoupled: the
//! pass enqueues the notice and moves on, and a worker task delivers it
//! with retry and backoff. A slow or failing notifier can therefore never
//! block or roll back a state transition. Delivery failures after the
//! final retry are logged and dropped.

use crate::config::RetryPolicy;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use wl_core::{Notifier, NotifyError, SlotNotice};

/// Hands notices to a background delivery worker over a bounded queue
pub struct NotifyDispatcher {
    tx: mpsc::Sender<SlotNotice>,
    worker: JoinHandle<()>,
}

impl NotifyDispatcher {
    /// Spawn the delivery worker on the current runtime
    pub fn spawn<N: Notifier>(notifier: N, capacity: usize, retry: RetryPolicy) -> Self {
        let (tx, mut rx) = mpsc::channel::<SlotNotice>(capacity);
        let worker = tokio::spawn(async move {
            while let Some(notice) = rx.recv().await {
                deliver(&notifier, notice, &retry).await;
            }
        });
        Self { tx, worker }
    }

    /// Queue a notice for delivery without waiting
    pub fn enqueue(&self, notice: SlotNotice) -> Result<(), NotifyError> {
        self.tx.try_send(notice).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => NotifyError::QueueFull,
            mpsc::error::TrySendError::Closed(_) => NotifyError::QueueClosed,
        })
    }

    /// Close the queue and wait for in-flight deliveries to finish
    pub async fn drain(self) {
        drop(self.tx);
        if let Err(e) = self.worker.await {
            tracing::warn!(error = %e, "notify worker terminated abnormally");
        }
    }
}

async fn deliver<N: Notifier>(notifier: &N, notice: SlotNotice, retry: &RetryPolicy) {
    let mut attempt = 1;
    loop {
        match notifier.notify(notice.clone()).await {
            Ok(()) => {
                tracing::debug!(
                    recipient = %notice.recipient_email,
                    context = %notice.context,
                    attempt,
                    "notice delivered"
                );
                return;
            }
            Err(e) if attempt < retry.max_attempts => {
                let delay = retry.backoff * 2u32.saturating_pow(attempt - 1);
                tracing::debug!(
                    recipient = %notice.recipient_email,
                    error = %e,
                    attempt,
                    ?delay,
                    "delivery failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                tracing::warn!(
                    recipient = %notice.recipient_email,
                    context = %notice.context,
                    error = %e,
                    attempts = attempt,
                    "notice delivery failed, giving up"
                );
                return;
            }
        }
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
