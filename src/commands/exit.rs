//! `.exit`: end the session.

use async_trait::async_trait;

use super::{Command, CommandArgs, CommandContext};
use crate::error::CommandError;

pub struct ExitCommand;

#[async_trait]
impl Command for ExitCommand {
    fn name(&self) -> &'static str {
        ".exit"
    }

    async fn exec(
        &self,
        ctx: &mut CommandContext<'_>,
        _args: &CommandArgs,
    ) -> Result<(), CommandError> {
        tracing::info!(user = ctx.cursor.user_name(), "exit requested");
        ctx.shutdown.request();
        Ok(())
    }
}
