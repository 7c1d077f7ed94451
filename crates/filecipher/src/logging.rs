use std::path::Path;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_FILE_NAME: &str = "filecipher.log";

/// `RUST_LOG` when set, `level` otherwise.
fn filter(level: tracing::Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

/// Daily rolling writer under `dir`. `None` when the directory cannot be
/// created; the CLI then logs to stderr only.
fn daily_writer(dir: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("Warning: not logging to {}: {}", dir.display(), e);
        return None;
    }
    Some(tracing_appender::non_blocking(
        tracing_appender::rolling::daily(dir, LOG_FILE_NAME),
    ))
}

/// Install the global subscriber and the panic hook.
///
/// Command output owns stdout, so log lines go to stderr, and to a daily
/// file when `log_dir` is configured. Keep the returned guards alive until
/// exit or buffered lines are lost.
pub fn init(level: tracing::Level, log_dir: Option<&Path>) -> Vec<WorkerGuard> {
    let (stderr, stderr_guard) = tracing_appender::non_blocking(std::io::stderr());
    let mut guards = vec![stderr_guard];

    let file_layer = log_dir.and_then(daily_writer).map(|(writer, guard)| {
        guards.push(guard);
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(filter(level))
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(stderr)
                .with_filter(filter(level)),
        )
        .with(file_layer)
        .init();

    std::panic::set_hook(Box::new(|panic| {
        let location = panic.location();
        tracing::error!(
            message = %panic,
            panic.file = location.map(|l| l.file()),
            panic.line = location.map(|l| l.line()),
        );
    }));

    guards
}
