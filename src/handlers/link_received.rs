use std::sync::Arc;

use teloxide::prelude::*;

use crate::{
    errors::{BotError, HandlerResult},
    pipeline::{RequestPipeline, TelegramChat},
};

pub async fn link_received(
    bot: Bot,
    msg: Message,
    pipeline: Arc<RequestPipeline>,
) -> HandlerResult {
    let text = msg
        .text()
        .ok_or_else(|| BotError::general("Text should be here. It's invalid state"))?;

    let chat = TelegramChat::new(bot, msg.chat.id);
    let report = pipeline.handle(&chat, text).await;
    log::debug!(
        "Request {} in chat {} ended as {} after {:?}",
        report.request_id,
        msg.chat.id,
        report.outcome,
        report.stages
    );

    Ok(())
}
