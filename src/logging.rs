//! File-backed tracing setup for the demo binary.
//!
//! The console owns stdout, so log records go to a file: `CONSOLE_KIT_LOG` if
//! set, else `<cache dir>/console-kit/console-kit.log`. Filtering follows
//! `RUST_LOG` with a `console_kit=info` default.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::APP_DIR_NAME;

const LOG_FILE_NAME: &str = "console-kit.log";
const DEFAULT_FILTER: &str = "console_kit=info";

/// Returned by [`init`]; keeps the resolved log location around for display.
#[derive(Debug)]
pub struct LoggingGuard {
    log_file: PathBuf,
}

impl LoggingGuard {
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }
}

/// Log file location, from the environment override or the cache dir.
pub fn log_file_path<F>(env_lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = env_lookup("CONSOLE_KIT_LOG").filter(|p| !p.trim().is_empty()) {
        return PathBuf::from(path.trim());
    }
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
        .join(LOG_FILE_NAME)
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber and a panic hook that logs instead of
/// printing over the console.
///
/// Returns `None` when the log file can't be opened or a subscriber is
/// already installed; the program keeps running without logs.
pub fn init() -> Option<LoggingGuard> {
    let log_file = log_file_path(|name| std::env::var(name).ok());
    let file = open_log_file(&log_file).ok()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true),
    );

    if subscriber.try_init().is_err() {
        return None;
    }

    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!(panic = %panic_info, "panic");
    }));

    tracing::info!(log_file = %log_file.display(), "tracing initialized");

    Some(LoggingGuard { log_file })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::TestTempDir;

    #[test]
    fn env_override_wins() {
        let path = log_file_path(|name| {
            (name == "CONSOLE_KIT_LOG").then(|| " /tmp/custom.log ".to_string())
        });
        assert_eq!(path, PathBuf::from("/tmp/custom.log"));
    }

    #[test]
    fn blank_override_falls_back_to_cache_dir() {
        let path = log_file_path(|_| Some("   ".to_string()));
        assert!(path.ends_with("console-kit/console-kit.log"), "{path:?}");
    }

    #[test]
    fn open_creates_missing_parent_dirs() {
        let tmp = TestTempDir::new("logging");
        let path = tmp.path().join("nested").join("out.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
