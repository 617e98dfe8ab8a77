// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Webhook notifier
//!
//! Posts the slot notice as JSON to the platform's message-dispatch
//! service, which owns the actual email/SMS templating and delivery.

use async_trait::async_trait;
use wl_core::{Notifier, NotifyError, SlotNotice};

/// Notifier that POSTs notices to a webhook URL
#[derive(Clone)]
pub struct WebhookNotifier {
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, notice: SlotNotice) -> Result<(), NotifyError> {
        let url = self.url.clone();
        let body =
            serde_json::to_string(&notice).map_err(|e| NotifyError::Failed(e.to_string()))?;

        tokio::task::spawn_blocking(move || {
            ureq::post(&url)
                .header("content-type", "application/json")
                .send(body.as_str())
                .map_err(|e| NotifyError::Failed(format!("POST {}: {}", url, e)))?;
            Ok(())
        })
        .await
        .map_err(|e| NotifyError::Failed(format!("join: {}", e)))?
    }
}

#[cfg(test)]
#[path = "webhook_tests.rs"]
mod tests;
