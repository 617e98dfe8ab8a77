// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource keys scoping one FIFO waitlist queue
//!
//! A resource key is the `(tenant, date)` or `(tenant, product)` tuple that
//! a queue of waitlist entries competes over. One open slot on a resource
//! admits at most one cascade notification per pass.

use crate::id::{ProductId, TenantId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two waitlist flavors the engine scans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Booking,
    Webinar,
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceType::Booking => write!(f, "booking"),
            ResourceType::Webinar => write!(f, "webinar"),
        }
    }
}

/// The tuple that scopes one waitlist queue
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceKey {
    /// A bookable calendar date for a tenant
    Booking { tenant: TenantId, date: NaiveDate },
    /// A capacity-limited webinar product for a tenant
    Webinar {
        tenant: TenantId,
        product: ProductId,
    },
}

impl ResourceKey {
    pub fn booking(tenant: impl Into<TenantId>, date: NaiveDate) -> Self {
        Self::Booking {
            tenant: tenant.into(),
            date,
        }
    }

    pub fn webinar(tenant: impl Into<TenantId>, product: impl Into<ProductId>) -> Self {
        Self::Webinar {
            tenant: tenant.into(),
            product: product.into(),
        }
    }

    pub fn tenant(&self) -> &TenantId {
        match self {
            ResourceKey::Booking { tenant, .. } => tenant,
            ResourceKey::Webinar { tenant, .. } => tenant,
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        match self {
            ResourceKey::Booking { .. } => ResourceType::Booking,
            ResourceKey::Webinar { .. } => ResourceType::Webinar,
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKey::Booking { tenant, date } => write!(f, "{}:{}", tenant, date),
            ResourceKey::Webinar { tenant, product } => write!(f, "{}:{}", tenant, product),
        }
    }
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
