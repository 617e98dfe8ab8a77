// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Waitlist daemon (wld)
//!
//! Background process that runs a scan-and-cascade pass on a fixed
//! interval. The daemon holds no state between passes; overlapping
//! instances are safe because every transition is a conditional write.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod config;

use async_trait::async_trait;
use tokio::signal::unix::{signal, SignalKind};
use tokio::time::MissedTickBehavior;
use tracing::info;
use wl_adapters::{HttpOracle, JsonStore, NoOpNotifier, WebhookNotifier};
use wl_core::{BookingEntry, Notifier, NotifyError, SlotNotice, SystemClock, WebinarEntry};
use wl_engine::{CascadeEngine, EngineConfig};

use crate::config::DaemonConfig;

/// Notifier picked at startup from the environment
#[derive(Clone)]
enum DaemonNotifier {
    Webhook(WebhookNotifier),
    NoOp(NoOpNotifier),
}

#[async_trait]
impl Notifier for DaemonNotifier {
    async fn notify(&self, notice: SlotNotice) -> Result<(), NotifyError> {
        match self {
            DaemonNotifier::Webhook(n) => n.notify(notice).await,
            DaemonNotifier::NoOp(n) => n.notify(notice).await,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logging();

    let config = DaemonConfig::from_env()?;
    info!(data_dir = %config.data_dir.display(), "starting wld");

    let bookings: JsonStore<BookingEntry> = JsonStore::open(config.data_dir.join("bookings.json"))?;
    let webinars: JsonStore<WebinarEntry> = JsonStore::open(config.data_dir.join("webinars.json"))?;
    let oracle = HttpOracle::new(&config.oracle_url);
    let notifier = match &config.webhook_url {
        Some(url) => DaemonNotifier::Webhook(WebhookNotifier::new(url)),
        None => DaemonNotifier::NoOp(NoOpNotifier::new()),
    };

    let mut engine_config = EngineConfig::new(&config.claim_base_url);
    if let Some(secs) = config.notify_window_secs {
        engine_config = engine_config.with_notify_window(chrono::Duration::seconds(secs));
    }
    let engine = CascadeEngine::new(
        bookings,
        webinars,
        oracle,
        notifier,
        SystemClock,
        engine_config,
    );

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut ticks = tokio::time::interval(config.scan_interval);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        interval_secs = config.scan_interval.as_secs(),
        "daemon ready"
    );

    loop {
        tokio::select! {
            _ = ticks.tick() => {
                engine.run().await;
            }
            _ = sigterm.recv() => {
                info!("received SIGTERM, shutting down");
                break;
            }
            _ = sigint.recv() => {
                info!("received SIGINT, shutting down");
                break;
            }
        }
    }

    // Flush any notices still queued before exiting.
    engine.shutdown().await;
    info!("daemon stopped");
    Ok(())
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}
