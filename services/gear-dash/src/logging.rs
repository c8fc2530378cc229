// services/gear-dash/src/logging.rs
//
// File-backed tracing so log output never lands on the terminal UI.

use std::fs::{self, OpenOptions};
use std::path::Path;

use anyhow::Result;
use gearkit::config::ObservabilityConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Keep the returned guard alive until exit so
/// buffered lines are flushed.
pub fn init_tracing(observability: &ObservabilityConfig, log_file: Option<&str>) -> Result<WorkerGuard> {
    let path = Path::new(log_file.unwrap_or(&observability.log_file));
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let level = &observability.log_level;
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("gear_dash={level},gearkit={level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    Ok(guard)
}
