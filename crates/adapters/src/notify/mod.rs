// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notifier adapters
//!
//! Delivery is best-effort: the engine's state transitions never depend on
//! a notifier succeeding.

pub mod noop;
pub mod webhook;

pub use noop::NoOpNotifier;
pub use webhook::WebhookNotifier;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeNotifier;
