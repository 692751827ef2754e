//! Utilities for logging.

use tracing_subscriber::filter::EnvFilter;

/// Output format for emitted logs.
#[derive(Debug, Clone, Copy, Default)]
pub enum LoggingMode {
    #[default]
    Pretty,
    Json,
    Compact,
}

/// Initialize the global tracing subscriber.
///
/// Logs are written to stderr so they never interleave with query output.
/// `RUST_LOG` takes precedence over the verbosity count when set.
pub fn init(verbosity: u8, mode: LoggingMode) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match mode {
        LoggingMode::Pretty => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
        }
        LoggingMode::Json => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .json()
                .try_init();
        }
        LoggingMode::Compact => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .compact()
                .try_init();
        }
    }
}
