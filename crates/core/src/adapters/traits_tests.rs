// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

/// Minimal oracle for exercising the default `has_open_slot` dispatch
#[derive(Clone)]
struct StubOracle {
    available: bool,
    remaining: u32,
}

#[async_trait]
impl AvailabilityOracle for StubOracle {
    async fn check_availability(
        &self,
        _tenant: &TenantId,
        _date: NaiveDate,
    ) -> Result<bool, OracleError> {
        Ok(self.available)
    }

    async fn remaining_capacity(
        &self,
        _tenant: &TenantId,
        _product: &ProductId,
    ) -> Result<u32, OracleError> {
        Ok(self.remaining)
    }
}

fn march_10() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

#[tokio::test]
async fn booking_slot_follows_calendar_availability() {
    let oracle = StubOracle {
        available: true,
        remaining: 0,
    };
    let key = ResourceKey::booking("t-1", march_10());
    assert!(oracle.has_open_slot(&key).await.unwrap());
}

#[tokio::test]
async fn webinar_slot_requires_positive_remaining_capacity() {
    let key = ResourceKey::webinar("t-1", "p-1");

    let full = StubOracle {
        available: true,
        remaining: 0,
    };
    assert!(!full.has_open_slot(&key).await.unwrap());

    let open = StubOracle {
        available: false,
        remaining: 1,
    };
    assert!(open.has_open_slot(&key).await.unwrap());
}

#[test]
fn conflict_is_a_value_not_an_error() {
    let outcome = UpdateOutcome::Conflict;
    assert_ne!(outcome, UpdateOutcome::Applied);
}

#[test]
fn notice_round_trips_through_json() {
    let notice = SlotNotice {
        recipient_email: "ada@example.com".to_string(),
        recipient_name: "Ada".to_string(),
        claim_url: "https://book.example.com/claim/t-1/2025-03-10/e-1".to_string(),
        context: "booking waitlist for 2025-03-10".to_string(),
    };
    let json = serde_json::to_string(&notice).unwrap();
    let back: SlotNotice = serde_json::from_str(&json).unwrap();
    assert_eq!(back, notice);
}
