// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake availability oracle for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use wl_core::{AvailabilityOracle, OracleError, ProductId, TenantId};

#[derive(Default)]
struct Inner {
    availability: HashMap<(TenantId, NaiveDate), bool>,
    capacity: HashMap<(TenantId, ProductId), (u32, u32)>, // (max, signups)
    fail: bool,
}

/// Fake oracle with scripted availability and capacity
///
/// Unknown dates report no availability and unknown products report zero
/// remaining capacity.
#[derive(Clone, Default)]
pub struct FakeOracle {
    inner: Arc<Mutex<Inner>>,
}

impl FakeOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_available(&self, tenant: impl Into<TenantId>, date: NaiveDate, available: bool) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .availability
            .insert((tenant.into(), date), available);
    }

    pub fn set_capacity(
        &self,
        tenant: impl Into<TenantId>,
        product: impl Into<ProductId>,
        max_participants: u32,
        current_signups: u32,
    ) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .capacity
            .insert(
                (tenant.into(), product.into()),
                (max_participants, current_signups),
            );
    }

    /// Make every lookup fail, for transient-failure tests
    pub fn set_fail(&self, fail: bool) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).fail = fail;
    }

    fn check_fail(&self) -> Result<(), OracleError> {
        if self.inner.lock().unwrap_or_else(|e| e.into_inner()).fail {
            return Err(OracleError::LookupFailed(
                "injected oracle failure".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl AvailabilityOracle for FakeOracle {
    async fn check_availability(
        &self,
        tenant: &TenantId,
        date: NaiveDate,
    ) -> Result<bool, OracleError> {
        self.check_fail()?;
        Ok(self
            .inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .availability
            .get(&(tenant.clone(), date))
            .copied()
            .unwrap_or(false))
    }

    async fn remaining_capacity(
        &self,
        tenant: &TenantId,
        product: &ProductId,
    ) -> Result<u32, OracleError> {
        self.check_fail()?;
        Ok(self
            .inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .capacity
            .get(&(tenant.clone(), product.clone()))
            .map(|(max, signups)| max.saturating_sub(*signups))
            .unwrap_or(0))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
