use std::path::Path;

use tracing_appender::rolling::{InitError, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

const LOG_FILE_PREFIX: &str = "wellday";
const MAX_LOG_FILES: usize = 5;

/// Directive used when `RUST_LOG` is unset or unparseable
fn default_directive(level: &str) -> String {
    format!("{}={level}", env!("CARGO_PKG_NAME").replace('-', "_"))
}

/// `RUST_LOG` wins over the configured level
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(level)))
}

/// Install the global subscriber.
///
/// Logs go to a daily rolling file under `log_dir`; with `show_stderr` they
/// are mirrored to stderr as well.
pub fn enable_logging(log_dir: &Path, level: &str, show_stderr: bool) -> Result<(), InitError> {
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(MAX_LOG_FILES)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(log_dir)?;

    let stderr = std::io::stderr.with_filter(move |_| show_stderr);

    // A second call (tests, embedders) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_writer(stderr.and(appender))
        .with_ansi(false)
        .try_init();

    Ok(())
}
