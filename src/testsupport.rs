//! Throwaway directory trees for handler, completion, and config tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::session::SessionCursor;

static FIXTURE_SEQ: AtomicU64 = AtomicU64::new(0);

/// A scratch directory under the system temp root, removed on drop.
///
/// The stored path is canonical, so it compares equal to paths produced by
/// the session cursor even when the temp root is a symlink (macOS `/tmp`).
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// New empty directory named `fmsh-<label>-<pid>-<millis>-<seq>`.
    pub fn new(label: &str) -> Self {
        let dir = std::env::temp_dir().join(unique_name(label));
        fs::create_dir_all(&dir).expect("create fixture root");
        let path = fs::canonicalize(&dir).unwrap_or(dir);
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write `content` at `relative`, creating intermediate directories.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture parents");
        }
        fs::write(&path, content).expect("write fixture file");
        path
    }

    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.child(relative);
        fs::create_dir_all(&path).expect("create fixture directory");
        path
    }

    pub fn read_text(&self, relative: &str) -> String {
        fs::read_to_string(self.child(relative)).expect("read fixture file")
    }

    /// A session cursor whose home is the fixture root.
    pub fn cursor(&self) -> SessionCursor {
        SessionCursor::new("ann", self.path())
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn unique_name(label: &str) -> String {
    let seq = FIXTURE_SEQ.fetch_add(1, Ordering::Relaxed);
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("fmsh-{label}-{}-{millis}-{seq}", std::process::id())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_nested_files_and_directories() {
        let fixture = TestTempDir::new("fixture");
        fixture.write_text("nested/file.txt", "hello");
        assert_eq!(fixture.read_text("nested/file.txt"), "hello");
        assert!(fixture.mkdir("a/b").is_dir());
    }

    #[test]
    fn cursor_starts_at_fixture_root() {
        let fixture = TestTempDir::new("cursor");
        let cursor = fixture.cursor();
        assert_eq!(cursor.current_path(), fixture.path());
        assert!(cursor.is_at_home());
    }

    #[test]
    fn names_are_unique() {
        assert_ne!(unique_name("x"), unique_name("x"));
    }

    #[test]
    fn directory_is_removed_on_drop() {
        let path = {
            let fixture = TestTempDir::new("drop");
            fixture.path().to_path_buf()
        };
        assert!(!path.exists());
    }
}
