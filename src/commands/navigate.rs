//! Navigation commands: `cd`, `up`, and `ls`.

use std::cmp::Ordering;
use std::path::Path;

use async_trait::async_trait;

use super::{Command, CommandArgs, CommandContext};
use crate::error::CommandError;
use crate::tui::text::{pad_to_width, visible_width};

// ---------------------------------------------------------------------------
// cd
// ---------------------------------------------------------------------------

/// Move the cursor to an existing directory.
pub struct CdCommand;

#[async_trait]
impl Command for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }

    async fn exec(
        &self,
        ctx: &mut CommandContext<'_>,
        args: &CommandArgs,
    ) -> Result<(), CommandError> {
        let target = args.first_path()?;
        let meta = tokio::fs::metadata(target).await?;
        if !meta.is_dir() {
            return Err(CommandError::Failed(format!(
                "{} is not a directory",
                target.display()
            )));
        }
        ctx.cursor.change_path(target)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// up
// ---------------------------------------------------------------------------

/// Move the cursor one level up, but never above the home directory.
pub struct UpCommand;

#[async_trait]
impl Command for UpCommand {
    fn name(&self) -> &'static str {
        "up"
    }

    async fn exec(
        &self,
        ctx: &mut CommandContext<'_>,
        _args: &CommandArgs,
    ) -> Result<(), CommandError> {
        if ctx.cursor.is_at_home() {
            return Ok(());
        }
        let Some(parent) = ctx.cursor.current_path().parent().map(Path::to_path_buf) else {
            // Already at the filesystem root.
            return Ok(());
        };
        ctx.cursor.change_path(parent)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ls
// ---------------------------------------------------------------------------

/// Kind of a listed entry. Directories sort before files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    Directory,
    File,
}

impl EntryKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::File => "file",
        }
    }
}

/// One row of an `ls` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl Ord for ListingEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind
            .cmp(&other.kind)
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for ListingEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Print the current directory as a name/type table.
pub struct LsCommand;

#[async_trait]
impl Command for LsCommand {
    fn name(&self) -> &'static str {
        "ls"
    }

    async fn exec(
        &self,
        ctx: &mut CommandContext<'_>,
        _args: &CommandArgs,
    ) -> Result<(), CommandError> {
        let entries = list_entries(ctx.cursor.current_path()).await?;
        ctx.write_line(&render_listing(&entries)).await?;
        Ok(())
    }
}

/// Read `dir` and return its files and directories, directories first.
///
/// Symlinks, sockets, and devices are skipped; symlinks are not followed.
pub async fn list_entries(dir: &Path) -> std::io::Result<Vec<ListingEntry>> {
    let mut reader = tokio::fs::read_dir(dir).await?;
    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        let file_type = entry.file_type().await?;
        let kind = if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            continue;
        };
        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            kind,
        });
    }
    entries.sort();
    Ok(entries)
}

/// Render entries as a boxed `(index) | Name | Type` table.
pub fn render_listing(entries: &[ListingEntry]) -> String {
    let header = ["(index)", "Name", "Type"];
    let rows: Vec<[String; 3]> = entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            [
                idx.to_string(),
                entry.name.clone(),
                entry.kind.label().to_string(),
            ]
        })
        .collect();

    let mut widths = header.map(visible_width);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(visible_width(cell));
        }
    }

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{left}{}{right}", segments.join(mid))
    };
    let line = |cells: [&str; 3]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!(" {} ", pad_to_width(cell, width)))
            .collect();
        format!("│{}│", padded.join("│"))
    };

    let mut out = vec![rule("┌", "┬", "┐"), line(header), rule("├", "┼", "┤")];
    for row in &rows {
        out.push(line([row[0].as_str(), row[1].as_str(), row[2].as_str()]));
    }
    out.push(rule("└", "┴", "┘"));
    out.join("\n")
}
