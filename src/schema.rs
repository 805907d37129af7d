use teloxide::{dispatching::UpdateHandler, prelude::*, utils::command::BotCommands};

use crate::{
    commands::{help, start},
    errors::BotError,
    handlers::link_received,
};

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    /// Start the bot
    Start,
    /// How to use the bot
    Help,
}

pub fn schema() -> UpdateHandler<BotError> {
    use dptree::case;

    Update::filter_message()
        .branch(
            // Filter for commands
            teloxide::filter_command::<Command, _>()
                .branch(case![Command::Start].endpoint(start))
                .branch(case![Command::Help].endpoint(help)),
        )
        // Any other text, unknown commands are dropped
        .branch(
            Message::filter_text()
                .filter(|text: String| !text.starts_with('/'))
                .endpoint(link_received),
        )
}
