//! Editable input buffer and history helpers.

use std::fs;
use std::io;
use std::path::Path;

const MAX_HISTORY: usize = 1000;

/// Command history shared across input reads.
#[derive(Debug, Clone, Default)]
pub struct ReplState {
    history: Vec<String>,
}

impl ReplState {
    /// Add a submitted line to history. Blank lines and immediate repeats are
    /// skipped.
    pub fn push_history(&mut self, entry: &str) {
        if entry.trim().is_empty() {
            return;
        }
        if self.history.last().map(String::as_str) == Some(entry) {
            return;
        }

        self.history.push(entry.to_string());
        if self.history.len() > MAX_HISTORY {
            let overflow = self.history.len() - MAX_HISTORY;
            self.history.drain(0..overflow);
        }
    }

    /// Load persisted history from a JSON array file. A missing file is not an
    /// error.
    pub fn load_history_file(&mut self, path: &Path) -> io::Result<()> {
        if !path.exists() {
            return Ok(());
        }

        let raw = fs::read_to_string(path)?;
        self.history.clear();
        if raw.trim().is_empty() {
            return Ok(());
        }

        let entries: Vec<String> = serde_json::from_str(&raw).map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("failed to decode history: {err}"),
            )
        })?;
        for entry in entries {
            self.push_history(&entry);
        }
        Ok(())
    }

    /// Persist history as a compact JSON array.
    pub fn save_history_file(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let encoded = serde_json::to_string(&self.history).map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("failed to encode history: {err}"),
            )
        })?;
        fs::write(path, format!("{encoded}\n"))
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }
}

/// Position within history while the user browses it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct HistoryCursor {
    /// Entry currently shown, `None` while editing a fresh line.
    index: Option<usize>,
    /// Line being typed before browsing started.
    draft: String,
}

impl HistoryCursor {
    /// Forget the browse position after the buffer is edited.
    pub(crate) fn reset(&mut self) {
        self.index = None;
    }

    /// Step to the previous entry, replacing `buffer`.
    pub(crate) fn up(&mut self, state: &ReplState, buffer: &mut String) {
        if state.history.is_empty() {
            return;
        }
        let idx = match self.index {
            Some(idx) => idx.saturating_sub(1),
            None => {
                self.draft = buffer.clone();
                state.history.len() - 1
            }
        };
        self.index = Some(idx);
        *buffer = state.history[idx].clone();
    }

    /// Step to the next entry, restoring the draft past the newest one.
    pub(crate) fn down(&mut self, state: &ReplState, buffer: &mut String) {
        let Some(idx) = self.index else {
            return;
        };
        if idx + 1 < state.history.len() {
            self.index = Some(idx + 1);
            *buffer = state.history[idx + 1].clone();
            return;
        }
        self.index = None;
        *buffer = std::mem::take(&mut self.draft);
    }
}

/// Insert one char at the current cursor position.
pub(crate) fn insert_char_at_cursor(buffer: &mut String, cursor: &mut usize, ch: char) {
    let byte_idx = byte_index_at_char(buffer, *cursor);
    buffer.insert(byte_idx, ch);
    *cursor += 1;
}

/// Delete one char immediately before cursor.
pub(crate) fn delete_char_before_cursor(buffer: &mut String, cursor: &mut usize) {
    if *cursor == 0 {
        return;
    }
    delete_char_range(buffer, *cursor - 1, *cursor);
    *cursor -= 1;
}

/// Delete one char at the current cursor position.
pub(crate) fn delete_char_at_cursor(buffer: &mut String, cursor: usize) {
    delete_char_range(buffer, cursor, cursor + 1);
}

/// Delete a char range represented in char indices.
pub(crate) fn delete_char_range(buffer: &mut String, start_char: usize, end_char: usize) {
    if start_char >= end_char {
        return;
    }
    let start = byte_index_at_char(buffer, start_char);
    let end = byte_index_at_char(buffer, end_char);
    buffer.replace_range(start..end, "");
}

/// Return the char index where the previous word starts.
pub(crate) fn previous_word_start(buffer: &str, cursor: usize) -> usize {
    let chars: Vec<char> = buffer.chars().take(cursor).collect();
    let mut idx = chars.len();
    while idx > 0 && chars[idx - 1].is_whitespace() {
        idx -= 1;
    }
    while idx > 0 && !chars[idx - 1].is_whitespace() {
        idx -= 1;
    }
    idx
}

/// Convert a char index to a byte index, preserving UTF-8 boundaries.
pub(crate) fn byte_index_at_char(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(s.len())
}

/// Return total char count for a UTF-8 string.
pub(crate) fn char_count(s: &str) -> usize {
    s.chars().count()
}
