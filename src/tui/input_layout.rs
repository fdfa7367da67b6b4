//! Terminal row/column layout helpers for the interactive editor.

use crossterm::terminal;

use crate::tui::settings;

/// Computed layout for prompt + input buffer on the terminal surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InputLayout {
    /// Total terminal rows consumed by prompt + buffer.
    pub(crate) total_rows: usize,
    /// Row index where the cursor should be placed.
    pub(crate) cursor_row: usize,
    /// Column index where the cursor should be placed.
    pub(crate) cursor_col: usize,
}

/// Read terminal width or fallback to 80 columns.
pub(crate) fn terminal_columns() -> usize {
    terminal::size()
        .ok()
        .map(|(cols, _)| cols as usize)
        .filter(|cols| *cols > 0)
        .unwrap_or(80)
}

/// Compute terminal layout for prompt + input and current cursor position.
pub(crate) fn compute_input_layout(
    buffer: &str,
    cursor: usize,
    cols: usize,
    prompt: &str,
) -> InputLayout {
    let mut row = 0usize;
    let mut col = 0usize;
    let mut cursor_pos: Option<(usize, usize)> = None;

    advance_text(prompt, cols, &mut row, &mut col);
    for (idx, _) in buffer.chars().enumerate() {
        if idx == cursor {
            cursor_pos = Some((row, col));
        }
        advance_char(cols, &mut row, &mut col);
    }

    let (cursor_row, cursor_col) = cursor_pos.unwrap_or((row, col));
    InputLayout {
        total_rows: row + 1,
        cursor_row,
        cursor_col,
    }
}

/// Lines drawn under the prompt for a candidate list, already clipped to the
/// visible window and terminal width.
pub(crate) fn suggestion_lines(
    candidates: &[String],
    selected: usize,
    color: bool,
    cols: usize,
) -> Vec<SuggestionLine> {
    let (start, end) = visible_window(candidates.len(), selected);
    let mut lines: Vec<SuggestionLine> = candidates[start..end]
        .iter()
        .enumerate()
        .map(|(offset, candidate)| {
            let is_selected = start + offset == selected;
            let marker = settings::suggestion_marker(is_selected, color);
            let room = cols.saturating_sub(settings::AUTOCOMPLETE_PREFIX.len() + 2);
            SuggestionLine::Candidate {
                marker,
                text: crate::tui::text::ellipsize(candidate, room),
                is_selected,
            }
        })
        .collect();
    let hidden = candidates.len() - (end - start);
    if hidden > 0 {
        lines.push(SuggestionLine::More(hidden));
    }
    lines
}

/// One row of the suggestion preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SuggestionLine {
    Candidate {
        marker: &'static str,
        text: String,
        is_selected: bool,
    },
    /// Count of candidates outside the visible window.
    More(usize),
}

/// Window of at most `AUTOCOMPLETE_MAX_ROWS` candidates containing `selected`.
fn visible_window(len: usize, selected: usize) -> (usize, usize) {
    let rows = settings::AUTOCOMPLETE_MAX_ROWS;
    if len <= rows {
        return (0, len);
    }
    let start = selected.saturating_sub(rows - 1).min(len - rows);
    (start, start + rows)
}

fn advance_text(text: &str, cols: usize, row: &mut usize, col: &mut usize) {
    for ch in text.chars() {
        if ch == '\n' {
            *row += 1;
            *col = 0;
        } else {
            advance_char(cols, row, col);
        }
    }
}

/// Advance by one printable cell, wrapping to the next row when needed.
fn advance_char(cols: usize, row: &mut usize, col: &mut usize) {
    if cols == 0 {
        return;
    }
    if *col + 1 >= cols {
        *row += 1;
        *col = 0;
    } else {
        *col += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROMPT: &str = settings::PROMPT_PRIMARY;

    fn candidates(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("dir{i}/")).collect()
    }

    #[test]
    fn input_layout_tracks_soft_wraps() {
        let layout = compute_input_layout("abcdefghij", 10, 8, PROMPT);
        assert_eq!(layout.total_rows, 2);
        assert_eq!(layout.cursor_row, 1);
    }

    #[test]
    fn input_layout_wraps_exactly_at_terminal_edge() {
        let layout = compute_input_layout("abcd", 4, 11, PROMPT);
        assert_eq!(layout.cursor_row, 0);
        assert_eq!(layout.cursor_col, 6);
        assert_eq!(layout.total_rows, 1);
    }

    #[test]
    fn input_layout_cursor_can_be_mid_buffer() {
        let layout = compute_input_layout("abcdef", 2, 10, PROMPT);
        assert_eq!(layout.cursor_row, 0);
        assert_eq!(layout.cursor_col, 4);
        assert_eq!(layout.total_rows, 1);
    }

    #[test]
    fn input_layout_handles_very_narrow_terminal() {
        let empty = compute_input_layout("", 0, 4, PROMPT);
        assert_eq!((empty.cursor_row, empty.cursor_col, empty.total_rows), (0, 2, 1));
    }

    #[test]
    fn short_lists_are_shown_whole() {
        let lines = suggestion_lines(&candidates(3), 1, false, 80);
        assert_eq!(lines.len(), 3);
        assert!(matches!(
            &lines[1],
            SuggestionLine::Candidate { is_selected: true, marker: ">", .. }
        ));
    }

    #[test]
    fn long_lists_scroll_with_selection() {
        let all = candidates(20);
        let lines = suggestion_lines(&all, 15, true, 80);
        assert_eq!(lines.len(), settings::AUTOCOMPLETE_MAX_ROWS + 1);
        assert_eq!(lines.last(), Some(&SuggestionLine::More(12)));
        let selected_text = lines.iter().find_map(|line| match line {
            SuggestionLine::Candidate {
                text,
                is_selected: true,
                ..
            } => Some(text.clone()),
            _ => None,
        });
        assert_eq!(selected_text.as_deref(), Some("dir15/"));
    }

    #[test]
    fn candidates_are_clipped_to_terminal_width() {
        let lines = suggestion_lines(&["abcdefghijklmnop/".to_string()], 0, false, 12);
        let SuggestionLine::Candidate { text, .. } = &lines[0] else {
            panic!("expected a candidate row");
        };
        assert_eq!(text, "abcde...");
    }

    #[test]
    fn visible_window_bounds() {
        assert_eq!(visible_window(3, 0), (0, 3));
        assert_eq!(visible_window(20, 0), (0, 8));
        assert_eq!(visible_window(20, 19), (12, 20));
    }
}
