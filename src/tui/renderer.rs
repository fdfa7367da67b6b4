//! Styling for session output: cursor path, error lines, banner, warnings.
//!
//! Lines meant for the session output channel are returned as strings so the
//! dispatcher can write them to any async sink. Diagnostics go to stderr.

use std::path::Path;

use crossterm::style::Stylize;

use crate::error::ShellError;
use crate::tui::settings;

/// Handles all terminal output formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    /// Whether ANSI color/style output is enabled.
    color: bool,
}

impl Renderer {
    /// Create a renderer with optional color output.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn color(&self) -> bool {
        self.color
    }

    /// The cursor path line printed after every cycle, with trailing newline.
    pub fn path_line(&self, path: &Path) -> String {
        let text = path.display().to_string();
        if self.color {
            format!("{}\n", text.as_str().with(settings::COLOR_CURSOR_PATH))
        } else {
            format!("{text}\n")
        }
    }

    /// A user-visible failure, with trailing newline.
    pub fn error_line(&self, error: ShellError) -> String {
        let text = error.to_string();
        if self.color {
            format!("{}\n", text.as_str().with(settings::COLOR_ERROR))
        } else {
            format!("{text}\n")
        }
    }

    pub fn banner(&self, user_name: &str) -> String {
        self.session_message(settings::banner_text(user_name))
    }

    pub fn farewell(&self, user_name: &str) -> String {
        self.session_message(settings::farewell_text(user_name))
    }

    fn session_message(&self, text: String) -> String {
        if self.color {
            format!("{}\n", text.as_str().with(settings::COLOR_BANNER).bold())
        } else {
            format!("{text}\n")
        }
    }

    /// Print a warning (to stderr).
    pub fn warn(&self, msg: &str) {
        if self.color {
            eprintln!(
                "\r{} {msg}",
                settings::LABEL_WARNING.with(settings::COLOR_WARNING).bold()
            );
        } else {
            eprintln!("\r{} {msg}", settings::LABEL_WARNING);
        }
    }

    /// Print an error (to stderr).
    pub fn error(&self, msg: &str) {
        if self.color {
            eprintln!(
                "\r{} {msg}",
                settings::LABEL_ERROR.with(settings::COLOR_ERROR).bold()
            );
        } else {
            eprintln!("\r{} {msg}", settings::LABEL_ERROR);
        }
    }
}
