use serenity::all::{CommandInteraction, CreateCommand, Http};

use crate::{commands::CommandHandler, util};

pub struct Handler;

#[serenity::async_trait]
impl CommandHandler for Handler {
    fn name(&self) -> &str {
        "hello"
    }

    fn descriptor(&self) -> CreateCommand {
        CreateCommand::new(self.name())
            .description("Replies concatenating the rest of the sentence")
    }

    async fn run(&self, http: &Http, cmd: &CommandInteraction) -> anyhow::Result<()> {
        // The reply really is this literal.
        util::reply(http, cmd, "+ ' World!'").await
    }
}
