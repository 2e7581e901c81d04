//! Logging Infrastructure
//!
//! Console output is always on. When a log directory is configured a daily
//! rolling JSON file is written as well.

use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Default filter when `RUST_LOG` is not set
pub fn default_filter(level: &str) -> String {
    format!("hr_server={level},tower_http={level},security={level},http_access={level}")
}

/// Initialize the global subscriber
///
/// Returns the file writer guard when file output is enabled; dropping it
/// flushes pending lines.
pub fn init_logger(level: &str, log_dir: Option<&str>) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(level)))
        .context("invalid log filter")?;

    let console = fmt::layer()
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let log_path = Path::new(dir);
            std::fs::create_dir_all(log_path)
                .with_context(|| format!("cannot create log directory {dir}"))?;
            let appender = tracing_appender::rolling::daily(log_path, "hr-server.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .context("logger already initialized")?;

    Ok(guard)
}
