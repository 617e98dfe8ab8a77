// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Claim URL and notice construction
//!
//! Bookings get a per-entry claim link; webinars point at the product's
//! public signup page since claiming there is a normal signup.

use wl_core::{EntryKey, ResourceKey, SlotNotice, WaitlistEntry};

/// Build the claim URL for a promoted entry.
pub fn claim_url(base: &str, key: &EntryKey) -> String {
    let base = base.trim_end_matches('/');
    match &key.resource {
        ResourceKey::Booking { tenant, date } => {
            format!("{}/claim/{}/{}/{}", base, tenant, date, key.entry)
        }
        ResourceKey::Webinar { product, .. } => {
            format!("{}/webinars/{}", base, product)
        }
    }
}

/// Build the notice dispatched after an entry is promoted to notified.
pub fn notice_for<E: WaitlistEntry>(base: &str, entry: &E) -> SlotNotice {
    let key = entry.entry_key();
    let context = match &key.resource {
        ResourceKey::Booking { date, .. } => format!("booking waitlist for {}", date),
        ResourceKey::Webinar { product, .. } => format!("webinar waitlist for {}", product),
    };
    SlotNotice {
        recipient_email: entry.visitor().email.clone(),
        recipient_name: entry.visitor().name.clone(),
        claim_url: claim_url(base, &key),
        context,
    }
}

#[cfg(test)]
#[path = "claim_tests.rs"]
mod tests;
