//! One read-eval cycle: resolve, look up, run, report.
//!
//! [`Dispatcher::execute`] never fails. Every handler error is reduced to a
//! [`ShellError`] here and nowhere else; the detailed cause only reaches the
//! log.

use std::sync::Arc;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::commands::{CommandArgs, CommandContext, CommandTable};
use crate::error::{CommandError, ShellError};
use crate::parser::ParsedCommand;
use crate::session::SessionCursor;
use crate::shutdown::ShutdownSignal;
use crate::tui::Renderer;

/// How one cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStatus {
    Completed,
    /// The cycle failed and this error line was shown.
    Reported(ShellError),
}

impl CycleStatus {
    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }
}

/// Routes parsed lines to handlers in a shared command table.
#[derive(Clone)]
pub struct Dispatcher {
    table: Arc<CommandTable>,
    renderer: Renderer,
}

impl Dispatcher {
    pub fn new(table: Arc<CommandTable>) -> Self {
        Self {
            table,
            renderer: Renderer::new(false),
        }
    }

    /// Use `renderer` to style the path and error lines.
    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    /// Run `command` against the session, then print any error line and the
    /// cursor path to `out`.
    pub async fn execute(
        &self,
        cursor: &mut SessionCursor,
        command: &ParsedCommand,
        out: &mut (dyn AsyncWrite + Unpin + Send),
        shutdown: &ShutdownSignal,
    ) -> CycleStatus {
        let status = match self.run(cursor, command, out, shutdown).await {
            Ok(()) => CycleStatus::Completed,
            Err(err) => {
                tracing::debug!(command = %command.name, error = %err, "command failed");
                CycleStatus::Reported(ShellError::from(&err))
            }
        };
        self.report(status, cursor, out).await;
        status
    }

    async fn run(
        &self,
        cursor: &mut SessionCursor,
        command: &ParsedCommand,
        out: &mut (dyn AsyncWrite + Unpin + Send),
        shutdown: &ShutdownSignal,
    ) -> Result<(), CommandError> {
        let handler = self
            .table
            .get(&command.name)
            .ok_or(CommandError::InvalidInput)?;
        let args = CommandArgs::resolve(cursor, &command.raw_args);
        tracing::debug!(command = %command.name, args = ?args.resolved, "dispatching");
        let mut ctx = CommandContext {
            cursor,
            out,
            shutdown,
        };
        handler.exec(&mut ctx, &args).await
    }

    async fn report(
        &self,
        status: CycleStatus,
        cursor: &SessionCursor,
        out: &mut (dyn AsyncWrite + Unpin + Send),
    ) {
        let mut text = String::new();
        if let CycleStatus::Reported(error) = status {
            text.push_str(&self.renderer.error_line(error));
        }
        text.push_str(&self.renderer.path_line(cursor.current_path()));
        let written = match out.write_all(text.as_bytes()).await {
            Ok(()) => out.flush().await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            tracing::warn!(error = %e, "failed to write cycle report");
        }
    }
}
