//! Tracing subscriber setup for the CLI.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset. Keeps HTTP client noise down.
pub const DEFAULT_FILTER: &str = "newsgraph=info,newsgraph_core=info,reqwest=warn,hyper=warn";

/// File name prefix for rolling log files.
pub const LOG_FILE_PREFIX: &str = "newsgraph.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// Logs go to stderr so stdout stays clean for JSON output. When `log_dir`
/// is given, a second layer writes daily rolling files there without ANSI
/// colour. Hold the returned guard until exit so buffered file lines flush.
pub fn init(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter());

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(env_filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // Ignored when a subscriber is already installed.
    let _ = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn init_with_log_dir_returns_guard() {
        let dir = tempfile::tempdir().expect("tempdir");
        let guard = init(Some(dir.path()));
        assert!(guard.is_some());
        tracing::info!("log line for file layer");
        drop(guard);
    }
}
