//! Directory-name completion for `cd`.
//!
//! Completion is read-only: it lists the directory the partial token points
//! at and never touches the session cursor. The editor calls [`complete`] on
//! every buffer change to preview candidates and [`Completion::apply`] when
//! the user accepts one.

use std::path::{Path, PathBuf};

use crate::session::{normalize, resolve_against};

const SEPARATOR: char = '/';

/// Candidates for the token being typed, plus the token itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    suggestions: Vec<String>,
    matched: String,
}

impl Completion {
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// The partial token the suggestions complete, as typed.
    pub fn matched(&self) -> &str {
        &self.matched
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    /// Iterate suggestions. May be called any number of times.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.suggestions.iter()
    }

    /// Rewrite `line` with suggestion `index` in place of the matched token.
    pub fn apply(&self, line: &str, index: usize) -> Option<String> {
        let suggestion = self.suggestions.get(index)?;
        let command = line.split_whitespace().next()?;
        Some(format!("{command} {suggestion}"))
    }
}

impl IntoIterator for Completion {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.suggestions.into_iter()
    }
}

impl<'a> IntoIterator for &'a Completion {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.suggestions.iter()
    }
}

/// Complete the `cd` argument in `line` relative to `cursor_path`.
///
/// Any other command yields an empty result, as does a directory that
/// cannot be read.
pub fn complete(line: &str, cursor_path: &Path) -> Completion {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("cd") {
        return Completion::default();
    }
    let token = tokens.next().unwrap_or("");
    let (dir_token, base) = split_token(token);
    let dir = match dir_token {
        "" => cursor_path.to_path_buf(),
        _ => resolve_against(cursor_path, dir_token),
    };

    let names = match matching_directories(&dir, base) {
        Ok(names) => names,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "completion skipped unreadable directory");
            return Completion {
                suggestions: Vec::new(),
                matched: token.to_string(),
            };
        }
    };

    let prefix = display_prefix(&dir, cursor_path);
    Completion {
        suggestions: names
            .into_iter()
            .map(|name| format!("{prefix}{name}{SEPARATOR}"))
            .collect(),
        matched: token.to_string(),
    }
}

/// Split a partial path into its directory part and the base being typed.
///
/// A token that is empty, ends with a separator, or names `.`/`..` is
/// entirely directory part.
fn split_token(token: &str) -> (&str, &str) {
    if token.is_empty() || token.ends_with(SEPARATOR) {
        return (token, "");
    }
    let (dir, base) = match token.rfind(SEPARATOR) {
        Some(idx) => (&token[..=idx], &token[idx + 1..]),
        None => ("", token),
    };
    if base == "." || base == ".." {
        return (token, "");
    }
    (dir, base)
}

/// Directory names in `dir` starting with `base`, case-insensitively, sorted.
fn matching_directories(dir: &Path, base: &str) -> std::io::Result<Vec<String>> {
    let wanted = base.to_lowercase();
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.to_lowercase().starts_with(&wanted) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Prefix for candidates in `dir`: empty at the cursor, relative below it,
/// absolute elsewhere.
fn display_prefix(dir: &Path, cursor_path: &Path) -> String {
    let dir = normalize(dir);
    let cursor_path = normalize(cursor_path);
    if dir == cursor_path {
        return String::new();
    }
    let shown: PathBuf = match dir.strip_prefix(&cursor_path) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => dir.clone(),
    };
    let mut prefix = shown.to_string_lossy().into_owned();
    if !prefix.ends_with(SEPARATOR) {
        prefix.push(SEPARATOR);
    }
    prefix
}
