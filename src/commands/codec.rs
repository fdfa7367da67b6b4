//! `compress` / `decompress`: Brotli stream codec over files.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use async_compression::tokio::bufread::{BrotliDecoder, BrotliEncoder};
use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufReader};

use super::{Command, CommandArgs, CommandContext};
use crate::error::CommandError;

/// Extension appended to the destination stem by `compress`.
pub const COMPRESSED_EXTENSION: &str = "br";

pub struct CompressCommand;

#[async_trait]
impl Command for CompressCommand {
    fn name(&self) -> &'static str {
        "compress"
    }

    async fn exec(
        &self,
        _ctx: &mut CommandContext<'_>,
        args: &CommandArgs,
    ) -> Result<(), CommandError> {
        let (source, stem) = args.two_paths()?;
        let target = compressed_path(stem);
        let written = compress_file(source, &target).await?;
        tracing::debug!(target = %target.display(), bytes = written, "compressed");
        Ok(())
    }
}

pub struct DecompressCommand;

#[async_trait]
impl Command for DecompressCommand {
    fn name(&self) -> &'static str {
        "decompress"
    }

    async fn exec(
        &self,
        _ctx: &mut CommandContext<'_>,
        args: &CommandArgs,
    ) -> Result<(), CommandError> {
        let (source, destination) = args.two_paths()?;
        let written = decompress_file(source, destination).await?;
        tracing::debug!(target = %destination.display(), bytes = written, "decompressed");
        Ok(())
    }
}

/// `stem` with `.br` appended (not substituted for an existing extension).
pub fn compressed_path(stem: &Path) -> PathBuf {
    let mut name = OsString::from(stem.as_os_str());
    name.push(".");
    name.push(COMPRESSED_EXTENSION);
    PathBuf::from(name)
}

/// Brotli-encode `source` into `destination`. Returns bytes written.
pub async fn compress_file(source: &Path, destination: &Path) -> io::Result<u64> {
    let reader = BufReader::new(open_source(source, destination).await?);
    let mut encoder = BrotliEncoder::new(reader);
    let mut writer = File::create(destination).await?;
    let written = tokio::io::copy(&mut encoder, &mut writer).await?;
    writer.flush().await?;
    Ok(written)
}

/// Brotli-decode `source` into `destination`. Returns bytes written.
pub async fn decompress_file(source: &Path, destination: &Path) -> io::Result<u64> {
    let reader = BufReader::new(open_source(source, destination).await?);
    let mut decoder = BrotliDecoder::new(reader);
    let mut writer = File::create(destination).await?;
    let written = tokio::io::copy(&mut decoder, &mut writer).await?;
    writer.flush().await?;
    Ok(written)
}

/// Open `source` for reading, refusing a `destination` that is the same file.
/// Creating the output truncates it, which would wipe the input first.
async fn open_source(source: &Path, destination: &Path) -> io::Result<File> {
    let file = File::open(source).await?;
    let source = tokio::fs::canonicalize(source).await?;
    if let Ok(existing) = tokio::fs::canonicalize(destination).await {
        if existing == source {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is both input and output", source.display()),
            ));
        }
    }
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shutdown::ShutdownSignal;
    use crate::testsupport::TestTempDir;

    async fn run(
        command: &dyn Command,
        fixture: &TestTempDir,
        raw: &[&str],
    ) -> Result<(), CommandError> {
        let mut cursor = fixture.cursor();
        let raw: Vec<String> = raw.iter().map(|s| s.to_string()).collect();
        let args = CommandArgs::resolve(&cursor, &raw);
        let mut out: Vec<u8> = Vec::new();
        let shutdown = ShutdownSignal::new();
        let mut ctx = CommandContext {
            cursor: &mut cursor,
            out: &mut out,
            shutdown: &shutdown,
        };
        command.exec(&mut ctx, &args).await
    }

    #[test]
    fn compressed_path_appends_suffix() {
        assert_eq!(
            compressed_path(Path::new("/tmp/archive")),
            PathBuf::from("/tmp/archive.br")
        );
        assert_eq!(
            compressed_path(Path::new("/tmp/notes.txt")),
            PathBuf::from("/tmp/notes.txt.br")
        );
    }

    #[tokio::test]
    async fn compress_then_decompress_round_trips() {
        let fixture = TestTempDir::new("codec");
        let body: String = (0..5_000).map(|i| format!("line {i}\n")).collect();
        fixture.write_text("notes.txt", &body);

        run(&CompressCommand, &fixture, &["notes.txt", "notes"])
            .await
            .unwrap();
        let packed = std::fs::read(fixture.child("notes.br")).unwrap();
        assert!(!packed.is_empty());
        assert!(packed.len() < body.len());

        run(&DecompressCommand, &fixture, &["notes.br", "restored.txt"])
            .await
            .unwrap();
        assert_eq!(
            std::fs::read(fixture.child("restored.txt")).unwrap(),
            body.as_bytes()
        );
    }

    #[tokio::test]
    async fn empty_file_round_trips() {
        let fixture = TestTempDir::new("codec-empty");
        let source = fixture.write_text("empty.txt", "");
        let packed = fixture.child("empty.br");
        let restored = fixture.child("empty.out");
        compress_file(&source, &packed).await.unwrap();
        decompress_file(&packed, &restored).await.unwrap();
        assert!(std::fs::read(restored).unwrap().is_empty());
    }

    #[tokio::test]
    async fn decompress_rejects_garbage() {
        let fixture = TestTempDir::new("codec-garbage");
        fixture.write_text("junk.br", "definitely not brotli data at all");
        let result = run(&DecompressCommand, &fixture, &["junk.br", "out.txt"]).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn missing_source_creates_no_output() {
        let fixture = TestTempDir::new("codec-missing");
        let result = run(&CompressCommand, &fixture, &["nope.txt", "nope"]).await;
        assert!(result.is_err());
        assert!(!fixture.child("nope.br").exists());
    }

    #[tokio::test]
    async fn codec_commands_need_two_arguments() {
        let fixture = TestTempDir::new("codec-args");
        for command in [&CompressCommand as &dyn Command, &DecompressCommand] {
            assert!(matches!(
                run(command, &fixture, &["only-one"]).await,
                Err(CommandError::InvalidInput)
            ));
        }
    }

    #[tokio::test]
    async fn compress_into_its_own_source_keeps_the_data() {
        let fixture = TestTempDir::new("codec-self-compress");
        fixture.write_text("a.br", "precious data");
        let result = run(&CompressCommand, &fixture, &["a.br", "a"]).await;
        assert!(matches!(result, Err(CommandError::Io(_))));
        assert_eq!(fixture.read_text("a.br"), "precious data");
    }

    #[tokio::test]
    async fn decompress_onto_its_own_source_keeps_the_data() {
        let fixture = TestTempDir::new("codec-self-decompress");
        let plain = fixture.write_text("plain.txt", "hello");
        let source = fixture.child("x.br");
        compress_file(&plain, &source).await.unwrap();
        let packed = std::fs::read(&source).unwrap();

        let result = run(&DecompressCommand, &fixture, &["x.br", "./x.br"]).await;
        assert!(matches!(result, Err(CommandError::Io(_))));
        assert_eq!(std::fs::read(&source).unwrap(), packed);
    }
}
