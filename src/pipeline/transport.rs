use std::path::Path;

use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{InputFile, MessageId, ParseMode},
};

use crate::errors::{BotError, BotResult};

/// Everything the request pipeline needs from the chat it is answering.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn reply_text(&self, text: &str) -> BotResult<()>;

    /// Send the editable status message and return its id.
    async fn send_status(&self, text: &str) -> BotResult<MessageId>;

    async fn edit_status(&self, status: MessageId, text: &str) -> BotResult<()>;

    async fn delete_status(&self, status: MessageId) -> BotResult<()>;

    /// Send a photo by URL. `caption` is HTML.
    async fn send_preview(&self, photo_url: &str, caption: &str) -> BotResult<()>;

    /// Upload a local video file. `caption` is HTML.
    async fn send_video(&self, path: &Path, caption: &str) -> BotResult<()>;
}

/// [`ChatTransport`] backed by the Telegram Bot API.
pub struct TelegramChat {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramChat {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }
}

#[async_trait]
impl ChatTransport for TelegramChat {
    async fn reply_text(&self, text: &str) -> BotResult<()> {
        self.bot.send_message(self.chat_id, text).await?;
        Ok(())
    }

    async fn send_status(&self, text: &str) -> BotResult<MessageId> {
        let msg = self.bot.send_message(self.chat_id, text).await?;
        Ok(msg.id)
    }

    async fn edit_status(&self, status: MessageId, text: &str) -> BotResult<()> {
        self.bot
            .edit_message_text(self.chat_id, status, text)
            .await?;
        Ok(())
    }

    async fn delete_status(&self, status: MessageId) -> BotResult<()> {
        self.bot.delete_message(self.chat_id, status).await?;
        Ok(())
    }

    async fn send_preview(&self, photo_url: &str, caption: &str) -> BotResult<()> {
        let url = reqwest::Url::parse(photo_url)
            .map_err(|e| BotError::general(format!("Invalid thumbnail URL {photo_url}: {e}")))?;

        self.bot
            .send_photo(self.chat_id, InputFile::url(url))
            .caption(caption)
            .parse_mode(ParseMode::Html)
            .await?;
        Ok(())
    }

    async fn send_video(&self, path: &Path, caption: &str) -> BotResult<()> {
        self.bot
            .send_video(self.chat_id, InputFile::file(path.to_path_buf()))
            .caption(caption)
            .parse_mode(ParseMode::Html)
            .supports_streaming(true)
            .await?;
        Ok(())
    }
}
