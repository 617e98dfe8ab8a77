// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapter contracts for external collaborators

pub mod traits;

pub use traits::{
    AvailabilityOracle, Notifier, NotifyError, OracleError, SlotNotice, StoreError, UpdateOutcome,
    WaitlistStore,
};
