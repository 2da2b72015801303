use anyhow::Result;
use chrono::Local;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize tracing with file-based logging
/// Logs are written to ~/.config/exercises/logs/exercises-YYYY-MM-DD-HH-MM-SS.log
///
/// With `verbose`, events are mirrored to stderr as well. The returned guard
/// flushes the file writer when dropped, so keep it alive until exit.
pub fn init_logging(verbose: bool) -> Result<(PathBuf, WorkerGuard)> {
    let config_dir = dirs::config_dir()
        .ok_or(anyhow::anyhow!("Could not find config directory"))?
        .join("exercises");

    let logs_dir = config_dir.join("logs");
    std::fs::create_dir_all(&logs_dir)?;

    let timestamp = Local::now().format("%Y-%m-%d-%H-%M-%S");
    let log_filename = format!("exercises-{}.log", timestamp);
    let log_path = logs_dir.join(&log_filename);

    let file_appender = tracing_appender::rolling::never(&logs_dir, &log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false) // No ANSI codes in log file
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    let stderr_layer = verbose.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .with_filter(EnvFilter::new("debug"))
    });

    // Set up filter (default to INFO, can be overridden with RUST_LOG env var)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(file_layer.with_filter(filter))
        .with(stderr_layer)
        .init();

    Ok((log_path, guard))
}
