// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use wl_core::ResourceKey;

fn march_10() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

#[tokio::test]
async fn unknown_date_has_no_availability() {
    let oracle = FakeOracle::new();
    let available = oracle
        .check_availability(&TenantId::new("t-1"), march_10())
        .await
        .unwrap();
    assert!(!available);
}

#[tokio::test]
async fn scripted_availability_is_returned() {
    let oracle = FakeOracle::new();
    oracle.set_available("t-1", march_10(), true);

    assert!(oracle
        .check_availability(&TenantId::new("t-1"), march_10())
        .await
        .unwrap());
}

#[tokio::test]
async fn remaining_capacity_subtracts_signups() {
    let oracle = FakeOracle::new();
    oracle.set_capacity("t-1", "p-1", 10, 7);

    let remaining = oracle
        .remaining_capacity(&TenantId::new("t-1"), &ProductId::new("p-1"))
        .await
        .unwrap();
    assert_eq!(remaining, 3);
}

#[tokio::test]
async fn full_webinar_has_no_open_slot() {
    let oracle = FakeOracle::new();
    oracle.set_capacity("t-1", "p-1", 10, 10);

    let key = ResourceKey::webinar("t-1", "p-1");
    assert!(!oracle.has_open_slot(&key).await.unwrap());
}

#[tokio::test]
async fn oversubscribed_webinar_saturates_to_zero() {
    let oracle = FakeOracle::new();
    oracle.set_capacity("t-1", "p-1", 10, 12);

    let remaining = oracle
        .remaining_capacity(&TenantId::new("t-1"), &ProductId::new("p-1"))
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn injected_failure_surfaces_as_lookup_error() {
    let oracle = FakeOracle::new();
    oracle.set_available("t-1", march_10(), true);
    oracle.set_fail(true);

    assert!(matches!(
        oracle.check_availability(&TenantId::new("t-1"), march_10()).await,
        Err(OracleError::LookupFailed(_))
    ));
}
