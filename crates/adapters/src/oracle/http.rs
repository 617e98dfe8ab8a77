// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP availability oracle
//!
//! Queries the platform's availability service. The calculator itself
//! (calendar expansion, capacity counters) lives behind that service; this
//! adapter only asks yes/no and how-many questions.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use wl_core::{AvailabilityOracle, OracleError, ProductId, TenantId};

#[derive(Debug, Deserialize)]
struct AvailabilityBody {
    available: bool,
}

#[derive(Debug, Deserialize)]
struct CapacityBody {
    remaining: u32,
}

/// Oracle backed by the availability service's HTTP API
#[derive(Clone)]
pub struct HttpOracle {
    base_url: String,
}

impl HttpOracle {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Blocking GET, parsed as JSON; runs on the blocking pool
    async fn fetch_json<T: serde::de::DeserializeOwned + Send + 'static>(
        &self,
        url: String,
    ) -> Result<T, OracleError> {
        tokio::task::spawn_blocking(move || {
            let mut response = ureq::get(&url)
                .call()
                .map_err(|e| OracleError::LookupFailed(format!("GET {}: {}", url, e)))?;
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(|e| OracleError::LookupFailed(format!("read {}: {}", url, e)))?;
            serde_json::from_str(&body)
                .map_err(|e| OracleError::LookupFailed(format!("parse {}: {}", url, e)))
        })
        .await
        .map_err(|e| OracleError::LookupFailed(format!("join: {}", e)))?
    }
}

#[async_trait]
impl AvailabilityOracle for HttpOracle {
    async fn check_availability(
        &self,
        tenant: &TenantId,
        date: NaiveDate,
    ) -> Result<bool, OracleError> {
        let url = format!("{}/availability/{}/{}", self.base_url, tenant, date);
        let body: AvailabilityBody = self.fetch_json(url).await?;
        Ok(body.available)
    }

    async fn remaining_capacity(
        &self,
        tenant: &TenantId,
        product: &ProductId,
    ) -> Result<u32, OracleError> {
        let url = format!("{}/capacity/{}/{}", self.base_url, tenant, product);
        let body: CapacityBody = self.fetch_json(url).await?;
        Ok(body.remaining)
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
