//! Tracing setup: human-readable console output on stderr plus a daily
//! rotating JSON log under the config directory.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Environment variable holding the console log filter.
pub const LOG_ENV: &str = "AGENTCC_LOG";

/// Console filter when `AGENTCC_LOG` is unset or invalid.
const CONSOLE_DEFAULT_FILTER: &str = "warn";

/// File filter; always verbose.
const FILE_FILTER: &str =
    "agentcc=debug,agentcc_config=debug,agentcc_llm=debug,agentcc_session=debug,info";

/// Install the global subscriber.
///
/// The returned guard flushes the file log when dropped and must be held
/// until the process is about to exit. File logging is skipped (with a
/// debug event) when the log directory cannot be used.
pub fn init(log_name: &str) -> Result<Option<WorkerGuard>> {
    let console_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(CONSOLE_DEFAULT_FILTER));

    let (writer, guard, file_error) = match file_writer(log_name) {
        Ok((writer, guard)) => (Some(writer), Some(guard), None),
        Err(e) => (None, None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_filter(console_filter),
        )
        .with(writer.map(|writer| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(EnvFilter::new(FILE_FILTER))
        }))
        .try_init()
        .context("failed to install the tracing subscriber")?;

    if let Some(e) = file_error {
        tracing::debug!(error = %format!("{:#}", e), "File logging disabled");
    }
    Ok(guard)
}

fn file_writer(log_name: &str) -> Result<(NonBlocking, WorkerGuard)> {
    let log_dir = agentcc_config::config_dir()
        .context("no config directory for log files")?
        .join("logs");
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(log_name)
        .filename_suffix("log")
        .build(&log_dir)
        .with_context(|| format!("cannot write logs to {}", log_dir.display()))?;
    Ok(tracing_appender::non_blocking(appender))
}
