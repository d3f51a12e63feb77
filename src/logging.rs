//! File logging for the typing test.
//!
//! The terminal belongs to the UI, so events go to a daily-rolling file in
//! the state directory. The filter is read from `TYPESPEED_LOG` and falls
//! back to `info`.
//!
//! ```bash
//! TYPESPEED_LOG=typespeed=debug typespeed
//! ```

use crate::error::Result;
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "TYPESPEED_LOG";
const LOG_PREFIX: &str = "typespeed.log";

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber. Keep the returned guard alive until exit
/// or buffered lines are lost.
pub fn init(log_dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(log_dir)?;

    let file_appender = rolling::daily(log_dir, LOG_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    tracing::info!(dir = %log_dir.display(), "logging initialized");
    Ok(guard)
}
