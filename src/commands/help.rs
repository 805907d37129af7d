use teloxide::{prelude::*, types::ParseMode};

use crate::errors::HandlerResult;

pub const HELP_TEXT: &str = "<b>How to use:</b>\n\n\
    1️⃣ Copy the link of any YouTube video\n\
    2️⃣ Paste it here\n\
    3️⃣ I will download the video and send it back\n\n\
    <b>Example:</b>\n\
    <code>https://www.youtube.com/watch?v=xxxxx</code>\n\
    <code>https://youtu.be/xxxxx</code>\n\n\
    That's it! 😊";

pub async fn help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, HELP_TEXT)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
