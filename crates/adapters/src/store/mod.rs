// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Waitlist store adapters
//!
//! Both stores implement the same contract: a scan of active entries and a
//! per-entry conditional update that is atomic with respect to concurrent
//! writers.

pub mod json;
pub mod memory;

pub use json::JsonStore;
pub use memory::MemoryStore;
