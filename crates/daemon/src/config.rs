// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration from the environment

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_SCAN_INTERVAL_SECS: u64 = 300;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Runtime configuration for `wld`
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// Directory holding the waitlist JSON files.
    pub data_dir: PathBuf,
    /// How often a scan pass runs.
    pub scan_interval: Duration,
    /// Base URL claim links are built from.
    pub claim_base_url: String,
    /// Base URL of the availability service.
    pub oracle_url: String,
    /// Message-dispatch webhook; notices are logged and dropped when unset.
    pub webhook_url: Option<String>,
    /// Override for the claim window, in seconds.
    pub notify_window_secs: Option<i64>,
}

impl DaemonConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from a variable lookup, so tests never touch process env
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = PathBuf::from(required(&get, "WL_DATA_DIR")?);
        let claim_base_url = required(&get, "WL_CLAIM_BASE_URL")?;
        let oracle_url = required(&get, "WL_ORACLE_URL")?;

        let scan_interval = match get("WL_SCAN_INTERVAL_SECS") {
            Some(raw) => Duration::from_secs(parse(&raw, "WL_SCAN_INTERVAL_SECS")?),
            None => Duration::from_secs(DEFAULT_SCAN_INTERVAL_SECS),
        };
        let notify_window_secs = match get("WL_NOTIFY_WINDOW_SECS") {
            Some(raw) => Some(parse(&raw, "WL_NOTIFY_WINDOW_SECS")?),
            None => None,
        };

        Ok(Self {
            data_dir,
            scan_interval,
            claim_base_url,
            oracle_url,
            webhook_url: get("WL_WEBHOOK_URL"),
            notify_window_secs,
        })
    }
}

fn required(get: &impl Fn(&str) -> Option<String>, var: &'static str) -> Result<String, ConfigError> {
    get(var).filter(|v| !v.is_empty()).ok_or(ConfigError::Missing(var))
}

fn parse<T: std::str::FromStr>(raw: &str, var: &'static str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Invalid {
        var,
        value: raw.to_string(),
    })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
