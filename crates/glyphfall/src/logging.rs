//! File logging. The terminal belongs to the rain, so logs never go there.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Keeps the background log writer alive. Dropping it flushes the log.
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

/// Install a subscriber writing to a daily rolling file.
///
/// Returns `None` if no log directory can be created or a subscriber is
/// already installed; the program runs without logs in that case.
pub fn init() -> Option<LoggingGuard> {
    let log_dir = glyphfall_config::ensure_log_dir().ok()?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "glyphfall.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("glyphfall=info"));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_thread_names(true),
    );

    if subscriber.try_init().is_err() {
        return None;
    }

    tracing::info!(log_dir = %log_dir.display(), "tracing initialized");

    Some(LoggingGuard { _guard: guard })
}
