//! Interactive line editor with history and `cd` completion preview.
//!
//! The editor exposes one entry point, [`read_repl_line`]. The caller owns
//! session state; this module owns terminal editing mechanics. Completion is
//! injected as a closure so the editor never sees the session cursor.

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use crossterm::cursor::{MoveToColumn, MoveUp};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::{Print, PrintStyledContent, Stylize};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;

use crate::complete::Completion;
use crate::tui::input_buffer::{
    char_count, delete_char_at_cursor, delete_char_before_cursor, delete_char_range,
    insert_char_at_cursor, previous_word_start, HistoryCursor,
};
use crate::tui::input_layout::{
    compute_input_layout, suggestion_lines, terminal_columns, SuggestionLine,
};
use crate::tui::settings;

pub use crate::tui::input_buffer::ReplState;

/// Result of reading one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// User submitted a full line.
    Line(String),
    /// End-of-file (`Ctrl-D` on empty buffer / stdin EOF).
    Eof,
    /// User pressed `Ctrl-C`.
    Cancelled,
    /// The poll callback asked the editor to stop.
    Interrupted,
}

/// Read one line from the user.
///
/// `interrupted` is polled while waiting for keys; returning `true` clears the
/// editor and yields [`ReadOutcome::Interrupted`]. `completer` maps the current
/// buffer to candidates drawn under the prompt.
pub fn read_repl_line<P, C>(
    color: bool,
    state: &ReplState,
    mut interrupted: P,
    completer: C,
) -> io::Result<ReadOutcome>
where
    P: FnMut() -> bool,
    C: Fn(&str) -> Completion,
{
    if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
        return read_line_fallback(color, &mut interrupted);
    }
    read_line_interactive(color, state, &mut interrupted, &completer)
}

fn read_line_fallback(color: bool, interrupted: &mut dyn FnMut() -> bool) -> io::Result<ReadOutcome> {
    // Non-TTY path: probe once, then block on stdin.
    if interrupted() {
        return Ok(ReadOutcome::Interrupted);
    }
    write_prompt(&mut io::stderr(), color)?;
    io::stderr().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(ReadOutcome::Eof);
    }
    Ok(ReadOutcome::Line(
        line.trim_end_matches(['\n', '\r']).to_string(),
    ))
}

/// Editor state for one interactive read.
#[derive(Debug, Default)]
struct EditorState {
    buffer: String,
    /// Cursor in char indices.
    cursor: usize,
    selected: usize,
    completion: Completion,
    /// Buffer the current `completion` was computed for.
    completed_for: Option<String>,
    history: HistoryCursor,
}

impl EditorState {
    fn refresh_completion(&mut self, completer: &dyn Fn(&str) -> Completion) {
        if self.completed_for.as_deref() == Some(self.buffer.as_str()) {
            return;
        }
        self.completion = completer(&self.buffer);
        self.completed_for = Some(self.buffer.clone());
        if self.selected >= self.completion.len() {
            self.selected = 0;
        }
    }

    /// The buffer changed by typing; drop history browsing and selection.
    fn edited(&mut self) {
        self.selected = 0;
        self.history.reset();
    }

    fn replace_buffer(&mut self, text: String) {
        self.buffer = text;
        self.cursor = char_count(&self.buffer);
        self.selected = 0;
    }

    /// Accept the selected candidate, if any.
    fn accept_selection(&mut self) -> bool {
        match self.completion.apply(&self.buffer, self.selected) {
            Some(line) => {
                self.replace_buffer(line);
                self.history.reset();
                true
            }
            None => false,
        }
    }
}

fn read_line_interactive(
    color: bool,
    state: &ReplState,
    interrupted: &mut dyn FnMut() -> bool,
    completer: &dyn Fn(&str) -> Completion,
) -> io::Result<ReadOutcome> {
    let _guard = RawModeGuard::acquire()?;
    let mut stderr = io::stderr();
    let mut editor = EditorState::default();
    let mut previous_cursor_row = 0usize;
    let mut last_render_signature: Option<String> = None;

    loop {
        editor.refresh_completion(completer);
        let signature = format!("{}|{}|{}", editor.buffer, editor.cursor, editor.selected);
        if last_render_signature.as_deref() != Some(signature.as_str()) {
            // Skip full repaint when nothing visual changed.
            previous_cursor_row = render_editor(&mut stderr, color, &editor, previous_cursor_row)?;
            last_render_signature = Some(signature);
        }

        if interrupted() {
            clear_editor_surface(&mut stderr, previous_cursor_row)?;
            return Ok(ReadOutcome::Interrupted);
        }

        if !event::poll(Duration::from_millis(settings::REPL_EVENT_POLL_MS))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
            continue;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Enter => {
                finalize_editor(&mut stderr, color, &editor.buffer, previous_cursor_row)?;
                return Ok(ReadOutcome::Line(editor.buffer));
            }
            KeyCode::Char('d') if ctrl => {
                // Ctrl-D exits only when no text is present.
                if editor.buffer.is_empty() {
                    finalize_editor(&mut stderr, color, "", previous_cursor_row)?;
                    return Ok(ReadOutcome::Eof);
                }
                if editor.cursor < char_count(&editor.buffer) {
                    delete_char_at_cursor(&mut editor.buffer, editor.cursor);
                    editor.edited();
                }
            }
            KeyCode::Char('c') if ctrl => {
                finalize_editor(&mut stderr, color, "", previous_cursor_row)?;
                return Ok(ReadOutcome::Cancelled);
            }
            KeyCode::Tab => {
                editor.accept_selection();
            }
            KeyCode::BackTab => {
                if !editor.completion.is_empty() {
                    editor.selected = previous_index(editor.selected, editor.completion.len());
                }
            }
            KeyCode::Up => {
                // Up cycles candidates while a preview is shown, otherwise history.
                if editor.completion.is_empty() {
                    editor.history.up(state, &mut editor.buffer);
                    editor.cursor = char_count(&editor.buffer);
                } else {
                    editor.selected = previous_index(editor.selected, editor.completion.len());
                }
            }
            KeyCode::Down => {
                if editor.completion.is_empty() {
                    editor.history.down(state, &mut editor.buffer);
                    editor.cursor = char_count(&editor.buffer);
                } else {
                    editor.selected = (editor.selected + 1) % editor.completion.len();
                }
            }
            KeyCode::Char('p') if ctrl => {
                editor.history.up(state, &mut editor.buffer);
                editor.cursor = char_count(&editor.buffer);
            }
            KeyCode::Char('n') if ctrl => {
                editor.history.down(state, &mut editor.buffer);
                editor.cursor = char_count(&editor.buffer);
            }
            KeyCode::Left => editor.cursor = editor.cursor.saturating_sub(1),
            KeyCode::Char('b') if ctrl => editor.cursor = editor.cursor.saturating_sub(1),
            KeyCode::Right => {
                editor.cursor = (editor.cursor + 1).min(char_count(&editor.buffer));
            }
            KeyCode::Char('f') if ctrl => {
                editor.cursor = (editor.cursor + 1).min(char_count(&editor.buffer));
            }
            KeyCode::Home => editor.cursor = 0,
            KeyCode::Char('a') if ctrl => editor.cursor = 0,
            KeyCode::End => editor.cursor = char_count(&editor.buffer),
            KeyCode::Char('e') if ctrl => editor.cursor = char_count(&editor.buffer),
            KeyCode::Backspace => {
                if editor.cursor > 0 {
                    delete_char_before_cursor(&mut editor.buffer, &mut editor.cursor);
                    editor.edited();
                }
            }
            KeyCode::Delete => {
                if editor.cursor < char_count(&editor.buffer) {
                    delete_char_at_cursor(&mut editor.buffer, editor.cursor);
                    editor.edited();
                }
            }
            KeyCode::Char('k') if ctrl => {
                // Emacs-style kill-to-end-of-line.
                let end = char_count(&editor.buffer);
                delete_char_range(&mut editor.buffer, editor.cursor, end);
                editor.edited();
            }
            KeyCode::Char('u') if ctrl => {
                // Emacs-style kill-to-start-of-line.
                delete_char_range(&mut editor.buffer, 0, editor.cursor);
                editor.cursor = 0;
                editor.edited();
            }
            KeyCode::Char('w') if ctrl => {
                // Emacs-style backward-kill-word.
                let start = previous_word_start(&editor.buffer, editor.cursor);
                delete_char_range(&mut editor.buffer, start, editor.cursor);
                editor.cursor = start;
                editor.edited();
            }
            KeyCode::Char(ch) => {
                // Ignore control/alt-modified printable keys.
                if ctrl || key.modifiers.contains(KeyModifiers::ALT) {
                    continue;
                }
                insert_char_at_cursor(&mut editor.buffer, &mut editor.cursor, ch);
                editor.edited();
            }
            _ => {}
        }
    }
}

fn previous_index(selected: usize, len: usize) -> usize {
    if selected == 0 {
        len - 1
    } else {
        selected - 1
    }
}

fn write_prompt(out: &mut impl Write, color: bool) -> io::Result<()> {
    if color {
        out.queue(PrintStyledContent(
            settings::PROMPT_PRIMARY.with(settings::COLOR_PROMPT_SYMBOL).bold(),
        ))?;
    } else {
        out.queue(Print(settings::PROMPT_PRIMARY))?;
    }
    Ok(())
}

/// Render prompt/input/suggestions and restore cursor to edit position.
fn render_editor(
    stderr: &mut io::Stderr,
    color: bool,
    editor: &EditorState,
    previous_cursor_row: usize,
) -> io::Result<usize> {
    clear_from(stderr, previous_cursor_row)?;
    write_prompt(stderr, color)?;
    stderr.queue(Print(&editor.buffer))?;

    let cols = terminal_columns();
    let lines = suggestion_lines(editor.completion.suggestions(), editor.selected, color, cols);
    for line in &lines {
        stderr.queue(Print("\r\n"))?;
        write_suggestion(stderr, color, line)?;
    }

    let layout = compute_input_layout(&editor.buffer, editor.cursor, cols, settings::PROMPT_PRIMARY);
    let bottom_row = layout.total_rows.saturating_sub(1) + lines.len();
    let lines_to_move_up = bottom_row.saturating_sub(layout.cursor_row);
    if lines_to_move_up > 0 {
        stderr.queue(MoveUp(lines_to_move_up as u16))?;
    }
    stderr.queue(MoveToColumn(layout.cursor_col as u16))?;
    stderr.flush()?;
    Ok(layout.cursor_row)
}

fn write_suggestion(stderr: &mut io::Stderr, color: bool, line: &SuggestionLine) -> io::Result<()> {
    stderr.queue(Print(settings::AUTOCOMPLETE_PREFIX))?;
    match line {
        SuggestionLine::Candidate {
            marker,
            text,
            is_selected,
        } if color => {
            let marker_color = if *is_selected {
                settings::COLOR_AUTOCOMPLETE_SELECTED
            } else {
                settings::COLOR_AUTOCOMPLETE_UNSELECTED
            };
            stderr.queue(PrintStyledContent(marker.with(marker_color)))?;
            stderr.queue(Print(" "))?;
            stderr.queue(PrintStyledContent(
                text.as_str().with(settings::COLOR_AUTOCOMPLETE_CANDIDATE),
            ))?;
        }
        SuggestionLine::Candidate { marker, text, .. } => {
            stderr.queue(Print(format!("{marker} {text}")))?;
        }
        SuggestionLine::More(hidden) => {
            let text = format!("(+{hidden} more)");
            if color {
                stderr.queue(PrintStyledContent(
                    text.as_str().with(settings::COLOR_AUTOCOMPLETE_MORE),
                ))?;
            } else {
                stderr.queue(Print(text))?;
            }
        }
    }
    Ok(())
}

/// Clear rows previously painted by the interactive editor.
fn clear_editor_surface(stderr: &mut io::Stderr, previous_cursor_row: usize) -> io::Result<()> {
    clear_from(stderr, previous_cursor_row)?;
    stderr.flush()
}

fn clear_from(stderr: &mut io::Stderr, previous_cursor_row: usize) -> io::Result<()> {
    if previous_cursor_row > 0 {
        stderr.queue(MoveUp(previous_cursor_row as u16))?;
    }
    stderr.queue(MoveToColumn(0))?;
    stderr.queue(Clear(ClearType::FromCursorDown))?;
    Ok(())
}

/// Redraw a clean final frame without suggestions and end the line.
fn finalize_editor(
    stderr: &mut io::Stderr,
    color: bool,
    buffer: &str,
    previous_cursor_row: usize,
) -> io::Result<()> {
    clear_from(stderr, previous_cursor_row)?;
    write_prompt(stderr, color)?;
    stderr.queue(Print(buffer))?;
    stderr.queue(Print("\r\n"))?;
    stderr.flush()
}

/// Raw mode lifetime guard so terminal state is restored on any return path.
struct RawModeGuard;

impl RawModeGuard {
    fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
