//! Session cursor: the shell's current working directory.
//!
//! The cursor is the only mutable session state. It is owned by the REPL loop
//! and lent to handlers through the dispatch chain; `change_path` is the one
//! way to move it.

use std::path::{Component, Path, PathBuf};

use crate::error::CursorError;

/// Current working path plus the identity of the interactive user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCursor {
    current: PathBuf,
    user_name: String,
    home: PathBuf,
}

impl SessionCursor {
    /// Start a session at `home`.
    pub fn new(user_name: impl Into<String>, home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            current: home.clone(),
            user_name: user_name.into(),
            home,
        }
    }

    /// Start a session at the user's home directory (falls back to `/`).
    pub fn at_home_dir(user_name: impl Into<String>) -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));
        Self::new(user_name, home)
    }

    pub fn current_path(&self) -> &Path {
        &self.current
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// True when the cursor sits at the home directory.
    pub fn is_at_home(&self) -> bool {
        self.current == self.home
    }

    /// Move the cursor. An empty path is rejected and leaves it untouched.
    pub fn change_path(&mut self, path: impl Into<PathBuf>) -> Result<(), CursorError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(CursorError::EmptyPath);
        }
        tracing::debug!(from = %self.current.display(), to = %path.display(), "cursor moved");
        self.current = path;
        Ok(())
    }

    /// Resolve a raw argument token against the current path.
    pub fn resolve(&self, token: &str) -> PathBuf {
        resolve_against(&self.current, token)
    }
}

/// Join `token` onto `base` and normalize `.`/`..` lexically.
///
/// Absolute tokens ignore `base`. Normalizing an already-normalized absolute
/// path returns it unchanged.
pub fn resolve_against(base: &Path, token: &str) -> PathBuf {
    normalize(&base.join(token))
}

/// Lexical normalization; never touches the file system.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `pop` on the root is a no-op, so `/..` stays `/`.
                let ends_with_parent =
                    matches!(out.components().next_back(), Some(Component::ParentDir));
                if ends_with_parent || (!out.pop() && !path.has_root()) {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
