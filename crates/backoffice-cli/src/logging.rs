//! Tracing setup for the CLI.

use backoffice_infrastructure::BackofficePaths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "backoffice.log";

/// Installs the global subscriber: stderr plus a daily rolling file in the
/// logs directory.
///
/// The level comes from `RUST_LOG` (default `info`). When the logs directory
/// cannot be created only stderr is used. Keep the returned guard alive
/// until exit so buffered file output is flushed.
pub fn init(paths: &BackofficePaths) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let logs_dir = paths
        .logs_dir()
        .ok()
        .filter(|dir| std::fs::create_dir_all(dir).is_ok());

    match logs_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(stderr_layer)
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(stderr_layer)
                .init();
            None
        }
    }
}
