//! Console logging setup.
//!
//! Subscribes to standard tracing logs printed to the console via
//! `tracing_subscriber::fmt`. The filter is taken from `RUST_LOG` when set
//! and defaults to `info` otherwise.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    Ok(())
}
