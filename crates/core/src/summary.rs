// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pass summaries reported by a trigger invocation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Counts for one scan pass over one resource type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassSummary {
    /// Notify windows that lapsed
    pub expired: u32,
    /// Entries removed because their resource passed
    pub past_cleaned: u32,
    /// Cascade notifications dispatched
    pub notified: u32,
    /// Per-entry failures deferred to the next pass
    pub errors: u32,
}

impl PassSummary {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for PassSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expired={} past_cleaned={} notified={} errors={}",
            self.expired, self.past_cleaned, self.notified, self.errors
        )
    }
}

/// Summary of one full trigger invocation, per resource type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassReport {
    pub bookings: PassSummary,
    pub webinars: PassSummary,
}

impl fmt::Display for PassReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bookings[{}] webinars[{}]",
            self.bookings, self.webinars
        )
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
