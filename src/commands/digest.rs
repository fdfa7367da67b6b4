//! `hash`: SHA-256 of a file's contents.

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use super::{Command, CommandArgs, CommandContext};
use crate::error::CommandError;

pub struct HashCommand;

#[async_trait]
impl Command for HashCommand {
    fn name(&self) -> &'static str {
        "hash"
    }

    async fn exec(
        &self,
        ctx: &mut CommandContext<'_>,
        args: &CommandArgs,
    ) -> Result<(), CommandError> {
        let path = args.first_path()?;
        let bytes = tokio::fs::read(path).await?;
        ctx.write_line(&sha256_hex(&bytes)).await?;
        Ok(())
    }
}

/// Lowercase hex SHA-256 digest.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
