//! Shared test fixtures for unit test modules.

use crate::console::Console;
use crate::term::VirtualTerminal;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!("console-kit-{prefix}-{millis}-{suffix}"));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// A console drawing into a fresh virtual terminal of `width` columns.
pub fn virtual_console(width: u16) -> (Console, VirtualTerminal) {
    let term = VirtualTerminal::new(width);
    (Console::new(term.clone()), term)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_fixture_writes_and_cleans_up() {
        let root;
        {
            let fixture = TestTempDir::new("fixture");
            let file = fixture.write_text("nested/file.txt", "hello");
            assert_eq!(fs::read_to_string(file).unwrap(), "hello");
            root = fixture.path().to_path_buf();
        }
        assert!(!root.exists());
    }

    #[test]
    fn virtual_console_shares_the_terminal() {
        let (console, term) = virtual_console(20);
        console.write_line("hi").unwrap();
        assert_eq!(term.lines(), vec!["hi"]);
    }
}
