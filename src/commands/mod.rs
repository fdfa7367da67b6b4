//! Command table and the handler contract.
//!
//! Every shell command is an async trait object registered in a
//! [`CommandTable`] under its name. The dispatcher resolves arguments, looks the
//! handler up by name and hands it a [`CommandContext`], which is the handler's
//! only view of the session.

pub mod codec;
pub mod digest;
pub mod exit;
pub mod files;
pub mod navigate;
pub mod os_info;

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::CommandError;
use crate::session::SessionCursor;
use crate::shutdown::ShutdownSignal;

// ---------------------------------------------------------------------------
// Command trait
// ---------------------------------------------------------------------------

/// One shell command.
///
/// Handlers validate their own argument count and return
/// [`CommandError::InvalidInput`] before touching the file system when a
/// required argument is missing.
#[async_trait]
pub trait Command: Send + Sync {
    /// Name typed at the prompt.
    fn name(&self) -> &'static str;

    /// Run the command against the session.
    async fn exec(&self, ctx: &mut CommandContext<'_>, args: &CommandArgs)
        -> Result<(), CommandError>;
}

// ---------------------------------------------------------------------------
// Context and arguments
// ---------------------------------------------------------------------------

/// Session state lent to a handler for one dispatch cycle.
pub struct CommandContext<'a> {
    pub cursor: &'a mut SessionCursor,
    /// User-visible output channel.
    pub out: &'a mut (dyn AsyncWrite + Unpin + Send),
    pub shutdown: &'a ShutdownSignal,
}

impl CommandContext<'_> {
    /// Write `text` followed by a newline.
    pub async fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await
    }
}

/// Arguments for one invocation: raw tokens plus their resolved paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandArgs {
    /// Each raw token resolved against the cursor.
    pub resolved: Vec<PathBuf>,
    /// Tokens exactly as typed.
    pub raw: Vec<String>,
}

impl CommandArgs {
    /// Resolve `raw` against the cursor without moving it.
    pub fn resolve(cursor: &SessionCursor, raw: &[String]) -> Self {
        Self {
            resolved: raw.iter().map(|token| cursor.resolve(token)).collect(),
            raw: raw.to_vec(),
        }
    }

    /// First resolved path, or `InvalidInput` when none was given.
    pub fn first_path(&self) -> Result<&Path, CommandError> {
        self.resolved
            .first()
            .map(PathBuf::as_path)
            .ok_or(CommandError::InvalidInput)
    }

    /// Source and destination paths, or `InvalidInput` when fewer than two.
    pub fn two_paths(&self) -> Result<(&Path, &Path), CommandError> {
        match self.resolved.as_slice() {
            [source, destination, ..] => Ok((source.as_path(), destination.as_path())),
            _ => Err(CommandError::InvalidInput),
        }
    }

    /// First raw token, or `InvalidInput` when none was given.
    pub fn first_raw(&self) -> Result<&str, CommandError> {
        self.raw
            .first()
            .map(String::as_str)
            .ok_or(CommandError::InvalidInput)
    }
}

// ---------------------------------------------------------------------------
// Command table
// ---------------------------------------------------------------------------

/// Name-to-handler mapping. Built once, then only read.
pub struct CommandTable {
    commands: HashMap<&'static str, Box<dyn Command>>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// The full built-in command set.
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.register(navigate::CdCommand);
        table.register(navigate::UpCommand);
        table.register(navigate::LsCommand);
        table.register(files::CatCommand);
        table.register(files::AddCommand);
        table.register(files::RnCommand);
        table.register(files::CpCommand);
        table.register(files::MvCommand);
        table.register(files::RmCommand);
        table.register(os_info::OsCommand::new());
        table.register(digest::HashCommand);
        table.register(codec::CompressCommand);
        table.register(codec::DecompressCommand);
        table.register(exit::ExitCommand);
        table
    }

    /// Register a handler under its own name, replacing any previous one.
    pub fn register(&mut self, command: impl Command + 'static) {
        self.commands.insert(command.name(), Box::new(command));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|command| command.as_ref())
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoCommand;

    #[async_trait]
    impl Command for EchoCommand {
        fn name(&self) -> &'static str {
            "echo"
        }

        async fn exec(
            &self,
            ctx: &mut CommandContext<'_>,
            args: &CommandArgs,
        ) -> Result<(), CommandError> {
            ctx.write_line(&args.raw.join(" ")).await?;
            Ok(())
        }
    }

    #[test]
    fn new_table_is_empty() {
        assert!(CommandTable::new().is_empty());
        assert!(CommandTable::default().is_empty());
    }

    #[test]
    fn standard_table_has_every_builtin() {
        let table = CommandTable::standard();
        assert_eq!(
            table.names(),
            vec![
                ".exit",
                "add",
                "cat",
                "cd",
                "compress",
                "cp",
                "decompress",
                "hash",
                "ls",
                "mv",
                "os",
                "rm",
                "rn",
                "up"
            ]
        );
        assert_eq!(table.len(), 14);
    }

    #[test]
    fn lookup_is_exact() {
        let table = CommandTable::standard();
        assert!(table.get("ls").is_some());
        assert!(table.get("LS").is_none());
        assert!(table.get("").is_none());
    }

    #[tokio::test]
    async fn registered_command_runs_with_context() {
        let mut table = CommandTable::new();
        table.register(EchoCommand);
        let mut cursor = SessionCursor::new("ann", "/home/ann");
        let mut out: Vec<u8> = Vec::new();
        let shutdown = ShutdownSignal::new();
        let args = CommandArgs::resolve(&cursor, &["hi".to_string(), "there".to_string()]);
        let mut ctx = CommandContext {
            cursor: &mut cursor,
            out: &mut out,
            shutdown: &shutdown,
        };
        table.get("echo").unwrap().exec(&mut ctx, &args).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "hi there\n");
    }

    #[test]
    fn args_resolve_against_cursor() {
        let cursor = SessionCursor::new("ann", "/home/ann");
        let args = CommandArgs::resolve(&cursor, &["a.txt".into(), "/tmp/b.txt".into()]);
        assert_eq!(
            args.resolved,
            vec![PathBuf::from("/home/ann/a.txt"), PathBuf::from("/tmp/b.txt")]
        );
        assert_eq!(args.raw, vec!["a.txt".to_string(), "/tmp/b.txt".to_string()]);
    }

    #[test]
    fn missing_arguments_are_invalid_input() {
        let empty = CommandArgs::default();
        assert!(matches!(empty.first_path(), Err(CommandError::InvalidInput)));
        assert!(matches!(empty.first_raw(), Err(CommandError::InvalidInput)));
        let cursor = SessionCursor::new("ann", "/home/ann");
        let one = CommandArgs::resolve(&cursor, &["a".into()]);
        assert!(matches!(one.two_paths(), Err(CommandError::InvalidInput)));
        let three = CommandArgs::resolve(&cursor, &["a".into(), "b".into(), "c".into()]);
        let (source, destination) = three.two_paths().unwrap();
        assert_eq!(source, Path::new("/home/ann/a"));
        assert_eq!(destination, Path::new("/home/ann/b"));
    }
}
