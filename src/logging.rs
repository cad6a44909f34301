//! Tracing setup
//!
//! The TUI owns the terminal, so interactive sessions log to a daily rolling
//! file. CLI runs log to stderr only when asked to.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Default filter when neither `RUST_LOG` nor the config sets one
pub const DEFAULT_FILTER: &str = "showbrowse=info";

/// Build the filter: `RUST_LOG` first, then the configured directive, then the default
pub fn env_filter(configured: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured.unwrap_or(DEFAULT_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Daily rolling writer for `<log_dir>/showbrowse.log.<date>`, creating the directory
pub fn rolling_appender(log_dir: &Path) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("showbrowse.log")
        .build(log_dir)
}

/// Log to `<log_dir>/showbrowse.log.<date>`.
///
/// Keep the returned guard alive for the whole session; dropping it flushes
/// and stops the writer thread. If the log file cannot be opened the reason
/// goes to stderr, so call this before the terminal enters raw mode.
pub fn init_file(log_dir: &Path, configured: Option<&str>) -> WorkerGuard {
    let (writer, guard) = match rolling_appender(log_dir) {
        Ok(appender) => tracing_appender::non_blocking(appender),
        Err(e) => {
            eprintln!(
                "showbrowse: logging disabled, cannot open {}: {}",
                log_dir.display(),
                e
            );
            tracing_appender::non_blocking(std::io::sink())
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(env_filter(configured))
        .with_ansi(false)
        .try_init();

    guard
}

/// Log to stderr (CLI `--verbose`)
pub fn init_stderr(configured: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter(configured))
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_appender_creates_directory() {
        let dir = std::env::temp_dir().join(format!("showbrowse-logs-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        assert!(rolling_appender(&dir.join("nested")).is_ok());
        assert!(dir.join("nested").is_dir());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_rolling_appender_reports_unusable_directory() {
        let file = std::env::temp_dir().join(format!("showbrowse-not-a-dir-{}", std::process::id()));
        std::fs::write(&file, "").unwrap();

        assert!(rolling_appender(&file.join("logs")).is_err());
        let _ = std::fs::remove_file(file);
    }

    #[test]
    fn test_init_file_survives_unusable_directory() {
        let file = std::env::temp_dir().join(format!("showbrowse-blocked-{}", std::process::id()));
        std::fs::write(&file, "").unwrap();

        let guard = init_file(&file.join("logs"), None);
        tracing::info!("dropped");
        drop(guard);
        let _ = std::fs::remove_file(file);
    }
}
