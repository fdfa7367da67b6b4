//! fmsh: an interactive file-manager shell.
//!
//! The library holds everything below the terminal loop: the session cursor,
//! the line parser, the command table and its handlers, dispatch with error
//! reporting, path completion, configuration, and the line editor.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use fmsh::commands::CommandTable;
//! use fmsh::dispatch::Dispatcher;
//! use fmsh::parser::parse_line;
//! use fmsh::session::SessionCursor;
//! use fmsh::shutdown::ShutdownSignal;
//!
//! # async fn example() {
//! let dispatcher = Dispatcher::new(Arc::new(CommandTable::standard()));
//! let mut cursor = SessionCursor::at_home_dir("ann");
//! let shutdown = ShutdownSignal::new();
//! let mut out = Vec::new();
//! dispatcher
//!     .execute(&mut cursor, &parse_line("ls"), &mut out, &shutdown)
//!     .await;
//! print!("{}", String::from_utf8_lossy(&out));
//! # }
//! ```

pub mod commands;
pub mod complete;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod parser;
pub mod session;
pub mod shutdown;
#[cfg(test)]
pub mod testsupport;
pub mod tui;
