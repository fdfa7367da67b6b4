//! File commands: `cat`, `add`, `rn`, `cp`, `mv`, and `rm`.
//!
//! Copies are streamed and never overwrite an existing destination. `mv` is a
//! copy followed by a delete, so an interruption between the two phases
//! leaves both files on disk.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use super::{Command, CommandArgs, CommandContext};
use crate::error::CommandError;

/// Chunk size used when streaming file contents to the output channel.
const CAT_CHUNK_BYTES: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// cat
// ---------------------------------------------------------------------------

/// Stream a file to the output channel.
pub struct CatCommand;

#[async_trait]
impl Command for CatCommand {
    fn name(&self) -> &'static str {
        "cat"
    }

    async fn exec(
        &self,
        ctx: &mut CommandContext<'_>,
        args: &CommandArgs,
    ) -> Result<(), CommandError> {
        let path = args.first_path()?;
        let mut file = File::open(path).await?;
        let mut buf = vec![0u8; CAT_CHUNK_BYTES];
        let mut last_byte = None;
        loop {
            let n = file.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            ctx.out.write_all(&buf[..n]).await?;
            last_byte = Some(buf[n - 1]);
        }
        // Keep the prompt path on its own line.
        if last_byte.is_some_and(|b| b != b'\n') {
            ctx.out.write_all(b"\n").await?;
        }
        ctx.out.flush().await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// add
// ---------------------------------------------------------------------------

/// Create an empty file, creating missing parent directories first.
pub struct AddCommand;

#[async_trait]
impl Command for AddCommand {
    fn name(&self) -> &'static str {
        "add"
    }

    async fn exec(
        &self,
        _ctx: &mut CommandContext<'_>,
        args: &CommandArgs,
    ) -> Result<(), CommandError> {
        let path = args.first_path()?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// rn
// ---------------------------------------------------------------------------

/// Rename a path in one OS-level operation.
pub struct RnCommand;

#[async_trait]
impl Command for RnCommand {
    fn name(&self) -> &'static str {
        "rn"
    }

    async fn exec(
        &self,
        _ctx: &mut CommandContext<'_>,
        args: &CommandArgs,
    ) -> Result<(), CommandError> {
        let (source, destination) = args.two_paths()?;
        tokio::fs::rename(source, destination).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// cp / mv
// ---------------------------------------------------------------------------

/// Stream-copy a file without overwriting.
pub struct CpCommand;

#[async_trait]
impl Command for CpCommand {
    fn name(&self) -> &'static str {
        "cp"
    }

    async fn exec(
        &self,
        _ctx: &mut CommandContext<'_>,
        args: &CommandArgs,
    ) -> Result<(), CommandError> {
        let (source, destination) = args.two_paths()?;
        let target = copy_exclusive(source, destination).await?;
        tracing::debug!(target = %target.display(), "copied");
        Ok(())
    }
}

/// Copy, then delete the source once the copy has completed.
pub struct MvCommand;

#[async_trait]
impl Command for MvCommand {
    fn name(&self) -> &'static str {
        "mv"
    }

    async fn exec(
        &self,
        _ctx: &mut CommandContext<'_>,
        args: &CommandArgs,
    ) -> Result<(), CommandError> {
        let (source, destination) = args.two_paths()?;
        let target = move_by_copy(source, destination, |path| async move {
            tokio::fs::remove_file(path).await
        })
        .await?;
        tracing::debug!(target = %target.display(), "moved");
        Ok(())
    }
}

/// Copy `source` to `destination`, failing if the destination exists.
///
/// When `destination` is an existing directory the copy lands inside it under
/// the source's file name. The source is opened before the destination is
/// created, so a missing source never leaves an empty file behind. Returns the
/// path actually written.
pub async fn copy_exclusive(source: &Path, destination: &Path) -> io::Result<PathBuf> {
    let mut reader = File::open(source).await?;
    if !reader.metadata().await?.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a regular file", source.display()),
        ));
    }
    let target = copy_target(source, destination).await;
    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
        .await?;
    tokio::io::copy(&mut reader, &mut writer).await?;
    writer.flush().await?;
    Ok(target)
}

/// Copy `source` to `destination`, then run `remove_source` on the source.
///
/// `remove_source` only runs after the copy has been flushed. If it fails the
/// destination is complete and the source is still present.
pub async fn move_by_copy<F, Fut>(
    source: &Path,
    destination: &Path,
    remove_source: F,
) -> io::Result<PathBuf>
where
    F: FnOnce(PathBuf) -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    let target = copy_exclusive(source, destination).await?;
    remove_source(source.to_path_buf()).await?;
    Ok(target)
}

async fn copy_target(source: &Path, destination: &Path) -> PathBuf {
    match tokio::fs::metadata(destination).await {
        Ok(meta) if meta.is_dir() => match source.file_name() {
            Some(name) => destination.join(name),
            None => destination.to_path_buf(),
        },
        _ => destination.to_path_buf(),
    }
}

// ---------------------------------------------------------------------------
// rm
// ---------------------------------------------------------------------------

/// Delete a file.
pub struct RmCommand;

#[async_trait]
impl Command for RmCommand {
    fn name(&self) -> &'static str {
        "rm"
    }

    async fn exec(
        &self,
        _ctx: &mut CommandContext<'_>,
        args: &CommandArgs,
    ) -> Result<(), CommandError> {
        let path = args.first_path()?;
        tokio::fs::remove_file(path).await?;
        Ok(())
    }
}
