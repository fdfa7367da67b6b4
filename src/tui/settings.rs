//! Fixed strings, glyphs, and colors used by the shell's terminal output.

use crossterm::style::Color;

pub const PROMPT_PRIMARY: &str = "> ";

// ---------------------------------------------------------------------------
// Session messages
// ---------------------------------------------------------------------------

pub const APP_TITLE: &str = "File Manager";
pub const LABEL_WARNING: &str = "warning:";
pub const LABEL_ERROR: &str = "error:";

pub fn banner_text(user_name: &str) -> String {
    format!("Welcome to the {APP_TITLE}, {user_name}!")
}

pub fn farewell_text(user_name: &str) -> String {
    format!("Thank you for using {APP_TITLE}, {user_name}, goodbye!")
}

// ---------------------------------------------------------------------------
// Autocomplete UI
// ---------------------------------------------------------------------------

pub const AUTOCOMPLETE_PREFIX: &str = "  ";
/// `(selected, unselected)` markers for styled and plain output.
const MARKERS_STYLED: (&str, &str) = ("▶", "·");
const MARKERS_PLAIN: (&str, &str) = (">", "-");
/// Candidates drawn under the prompt; the rest are summarized.
pub const AUTOCOMPLETE_MAX_ROWS: usize = 8;

pub const REPL_EVENT_POLL_MS: u64 = 80;

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

pub const COLOR_PROMPT_SYMBOL: Color = Color::White;
pub const COLOR_CURSOR_PATH: Color = Color::Cyan;
pub const COLOR_BANNER: Color = Color::Green;
pub const COLOR_WARNING: Color = Color::Yellow;
pub const COLOR_ERROR: Color = Color::Red;

pub const COLOR_AUTOCOMPLETE_SELECTED: Color = Color::DarkYellow;
pub const COLOR_AUTOCOMPLETE_UNSELECTED: Color = Color::DarkGrey;
pub const COLOR_AUTOCOMPLETE_CANDIDATE: Color = Color::Yellow;
pub const COLOR_AUTOCOMPLETE_MORE: Color = Color::DarkGrey;

pub fn suggestion_marker(is_selected: bool, color: bool) -> &'static str {
    let (selected, unselected) = if color { MARKERS_STYLED } else { MARKERS_PLAIN };
    if is_selected {
        selected
    } else {
        unselected
    }
}
