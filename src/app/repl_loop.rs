//! The interactive session loop.
//!
//! Each cycle reads a line on a blocking thread, parses it, and hands it to
//! the dispatcher. The loop stops once the shutdown signal is raised by
//! `.exit`, Ctrl-C, or end of input.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fmsh::commands::CommandTable;
use fmsh::complete::complete;
use fmsh::dispatch::Dispatcher;
use fmsh::parser::parse_line;
use fmsh::session::SessionCursor;
use fmsh::shutdown::ShutdownSignal;
use fmsh::tui::{read_repl_line, ReadOutcome, Renderer, ReplState};
use tokio::io::AsyncWriteExt;

/// Everything the loop needs from startup.
pub(crate) struct SessionOptions {
    pub(crate) user_name: String,
    pub(crate) renderer: Renderer,
    pub(crate) show_banner: bool,
    pub(crate) history_path: Option<PathBuf>,
}

/// Run one interactive session until shutdown.
pub(crate) async fn run_session(options: SessionOptions) -> io::Result<()> {
    let renderer = options.renderer;
    let mut cursor = SessionCursor::at_home_dir(options.user_name.as_str());
    let dispatcher =
        Dispatcher::new(Arc::new(CommandTable::standard())).with_renderer(renderer);
    let shutdown = ShutdownSignal::new();
    let signal_task = shutdown.listen_for_interrupt();
    let mut history = load_history(options.history_path.as_deref(), &renderer);
    let mut stdout = tokio::io::stdout();

    let mut opening = String::new();
    if options.show_banner {
        opening.push_str(&renderer.banner(cursor.user_name()));
    }
    opening.push_str(&renderer.path_line(cursor.current_path()));
    stdout.write_all(opening.as_bytes()).await?;
    stdout.flush().await?;
    tracing::info!(
        user = cursor.user_name(),
        home = %cursor.home().display(),
        "session started"
    );

    while !shutdown.is_requested() {
        let outcome = tokio::select! {
            biased;
            _ = shutdown.requested() => break,
            outcome = read_line(renderer.color(), &history, &shutdown, cursor.current_path()) => outcome,
        };
        match outcome {
            Ok(ReadOutcome::Line(line)) => {
                history.push_history(&line);
                let command = parse_line(&line);
                dispatcher
                    .execute(&mut cursor, &command, &mut stdout, &shutdown)
                    .await;
            }
            Ok(ReadOutcome::Eof | ReadOutcome::Cancelled) => shutdown.request(),
            Ok(ReadOutcome::Interrupted) => break,
            Err(e) => {
                tracing::warn!(error = %e, "input failed; ending session");
                shutdown.request();
            }
        }
    }
    signal_task.abort();

    if options.show_banner {
        stdout
            .write_all(renderer.farewell(cursor.user_name()).as_bytes())
            .await?;
        stdout.flush().await?;
    }
    save_history(&history, options.history_path.as_deref(), &renderer);
    tracing::info!(user = cursor.user_name(), "session ended");
    Ok(())
}

/// Read one line on a blocking thread. Completion sees a snapshot of the
/// cursor path; the editor gives up once shutdown is requested.
async fn read_line(
    color: bool,
    history: &ReplState,
    shutdown: &ShutdownSignal,
    cursor_path: &Path,
) -> io::Result<ReadOutcome> {
    let history = history.clone();
    let shutdown = shutdown.clone();
    let cursor_path = cursor_path.to_path_buf();
    tokio::task::spawn_blocking(move || {
        read_repl_line(
            color,
            &history,
            || shutdown.is_requested(),
            |line| complete(line, &cursor_path),
        )
    })
    .await
    .map_err(io::Error::other)?
}

fn load_history(path: Option<&Path>, renderer: &Renderer) -> ReplState {
    let mut state = ReplState::default();
    if let Some(path) = path {
        if let Err(e) = state.load_history_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "history not loaded");
            renderer.warn(&format!("failed to load history {}: {e}", path.display()));
        }
    }
    state
}

fn save_history(state: &ReplState, path: Option<&Path>, renderer: &Renderer) {
    let Some(path) = path else {
        return;
    };
    if let Err(e) = state.save_history_file(path) {
        tracing::warn!(path = %path.display(), error = %e, "history not saved");
        renderer.warn(&format!("failed to save history {}: {e}", path.display()));
    }
}
