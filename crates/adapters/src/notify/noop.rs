// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op notifier
//!
//! Logs the notice and succeeds. Used when no delivery endpoint is
//! configured.

use async_trait::async_trait;
use wl_core::{Notifier, NotifyError, SlotNotice};

/// Notifier that only logs
#[derive(Clone, Default)]
pub struct NoOpNotifier;

impl NoOpNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for NoOpNotifier {
    async fn notify(&self, notice: SlotNotice) -> Result<(), NotifyError> {
        tracing::info!(
            recipient = %notice.recipient_email,
            claim_url = %notice.claim_url,
            context = %notice.context,
            "dropping notice (no notifier configured)"
        );
        Ok(())
    }
}
