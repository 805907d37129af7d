use teloxide::{prelude::*, types::ParseMode};

use crate::errors::HandlerResult;

pub const START_TEXT: &str = "🎥 <b>YouTube Downloader Bot</b> 🎥\n\n\
    Send me any YouTube link and I will download the video for you!\n\n\
    <b>Commands:</b>\n\
    /start - Start the bot\n\
    /help - How to use the bot\n\n\
    <b>How to use:</b>\n\
    Just send a YouTube link and wait!";

pub async fn start(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, START_TEXT)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
