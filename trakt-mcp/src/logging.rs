use anyhow::Result;
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Keeps the file writer flushing until the server exits.
pub struct LogGuard {
    pub log_path: Option<PathBuf>,
    _file_guard: Option<WorkerGuard>,
}

/// Initialize tracing. Stdout carries the protocol, so console output goes to
/// stderr. When `log_dir` is set, logs are also written to
/// `<log_dir>/trakt-mcp-YYYY-MM-DD-HH-MM-SS.log`.
pub fn init_logging(log_dir: Option<&Path>) -> Result<LogGuard> {
    // Default to INFO, can be overridden with RUST_LOG env var
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true);

    let (file_layer, log_path, file_guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;

            let timestamp = Local::now().format("%Y-%m-%d-%H-%M-%S");
            let log_filename = format!("trakt-mcp-{}.log", timestamp);
            let log_path = dir.join(&log_filename);

            let file_appender = tracing_appender::rolling::never(dir, &log_filename);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false) // No ANSI codes in log file
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true)
                .boxed();

            (Some(layer), Some(log_path), Some(guard))
        }
        None => (None, None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(LogGuard {
        log_path,
        _file_guard: file_guard,
    })
}
