//! Handling of a single link message, from validation to cleanup.
//!
//! The request walks through [`Stage`]s in a fixed order and ends in exactly
//! one [`Outcome`]. Each request gets its own id, which is part of the
//! temporary file name and of every log line for that request.

mod transport;

use std::path::PathBuf;

use log::{error, info, warn};
use strum::Display;
use teloxide::{types::MessageId, utils::html};

pub use transport::{ChatTransport, TelegramChat};

use crate::{
    config::BotConfig,
    errors::RequestError,
    temp_file::TempFile,
    utils::{is_youtube_link, temp_file_name},
    video::{DownloaderClient, LookupMedia},
};

pub const REJECT_MESSAGE: &str = "❌ Please send a valid YouTube link!";
pub const PROCESSING_MESSAGE: &str = "⏳ Processing your request... Please wait!";
pub const DOWNLOADING_MESSAGE: &str = "⬇️ Downloading video...";
pub const UPLOADING_MESSAGE: &str = "📤 Uploading to Telegram...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    Validating,
    Acknowledging,
    LookingUp,
    Previewing,
    Downloading,
    Uploading,
    CleaningUp,
}

/// Terminal state of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    /// Text was not a YouTube link
    Rejected,
    /// Non-200 from the API or media host, `success: false`, or no download URL
    UpstreamError,
    TimedOut,
    /// IO, transport or Telegram failure
    Failed,
    Completed,
}

/// What happened to the optional thumbnail preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Sent,
    NotProvided,
    SendFailed(String),
}

#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub request_id: String,
    pub outcome: Outcome,
    pub preview: Option<Preview>,
    pub stages: Vec<Stage>,
}

struct Trace {
    request_id: String,
    preview: Option<Preview>,
    stages: Vec<Stage>,
}

impl Trace {
    fn new() -> Self {
        Self {
            request_id: new_request_id(),
            preview: None,
            stages: Vec::new(),
        }
    }

    fn enter(&mut self, stage: Stage) {
        log::debug!("[{}] entering {}", self.request_id, stage);
        self.stages.push(stage);
    }

    fn finish(self, outcome: Outcome) -> PipelineReport {
        info!("[{}] finished: {}", self.request_id, outcome);
        PipelineReport {
            request_id: self.request_id,
            outcome,
            preview: self.preview,
            stages: self.stages,
        }
    }
}

fn new_request_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}

fn preview_caption(title: &str) -> String {
    format!("📹 <b>{}</b>\n\n⬇️ Downloading...", html::escape(title))
}

fn success_caption(title: &str) -> String {
    format!("📹 <b>{}</b>\n\n✅ Downloaded successfully!", html::escape(title))
}

/// Runs link messages through lookup, download and upload.
pub struct RequestPipeline {
    downloader: DownloaderClient,
    download_dir: PathBuf,
}

impl RequestPipeline {
    pub fn new(downloader: DownloaderClient, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            downloader,
            download_dir: download_dir.into(),
        }
    }

    pub fn from_config(config: &BotConfig) -> reqwest::Result<Self> {
        Ok(Self::new(
            DownloaderClient::from_config(config)?,
            config.download_dir.clone(),
        ))
    }

    pub fn download_dir(&self) -> &PathBuf {
        &self.download_dir
    }

    /// Handle one inbound text message. Every failure is reported to the chat
    /// and reflected in the returned report; nothing is propagated.
    pub async fn handle(&self, chat: &dyn ChatTransport, text: &str) -> PipelineReport {
        let mut trace = Trace::new();

        trace.enter(Stage::Validating);
        let url = text.trim();
        if !is_youtube_link(url) {
            if let Err(e) = chat.reply_text(REJECT_MESSAGE).await {
                warn!("[{}] failed to send rejection: {}", trace.request_id, e);
            }
            return trace.finish(Outcome::Rejected);
        }
        info!("[{}] processing {}", trace.request_id, url);

        trace.enter(Stage::Acknowledging);
        let status = match chat.send_status(PROCESSING_MESSAGE).await {
            Ok(id) => id,
            Err(e) => {
                error!("[{}] failed to send status message: {}", trace.request_id, e);
                return trace.finish(Outcome::Failed);
            }
        };

        let outcome = match self.process(chat, status, url, &mut trace).await {
            Ok(()) => Outcome::Completed,
            Err(err) => {
                let outcome = err.outcome();
                if outcome == Outcome::Failed {
                    error!("[{}] request failed: {}", trace.request_id, err);
                } else {
                    info!("[{}] request stopped: {}", trace.request_id, err);
                }

                if let Err(e) = chat.edit_status(status, &err.user_message()).await {
                    warn!("[{}] failed to report error: {}", trace.request_id, e);
                }
                outcome
            }
        };

        trace.finish(outcome)
    }

    async fn process(
        &self,
        chat: &dyn ChatTransport,
        status: MessageId,
        url: &str,
        trace: &mut Trace,
    ) -> Result<(), RequestError> {
        trace.enter(Stage::LookingUp);
        let media = self.downloader.lookup(url).await?;

        trace.enter(Stage::Previewing);
        trace.preview = Some(self.send_preview(chat, &media, &trace.request_id).await);

        trace.enter(Stage::Downloading);
        chat.edit_status(status, DOWNLOADING_MESSAGE).await?;

        let temp = TempFile::new(
            self.download_dir
                .join(temp_file_name(&media.title, &trace.request_id)),
        );
        let written = self
            .downloader
            .fetch_to_file(&media.download_url, temp.path())
            .await?;
        info!(
            "[{}] downloaded {} bytes to {}",
            trace.request_id,
            written,
            temp.path().display()
        );

        trace.enter(Stage::Uploading);
        chat.edit_status(status, UPLOADING_MESSAGE).await?;
        chat.send_video(temp.path(), &success_caption(&media.title))
            .await?;

        trace.enter(Stage::CleaningUp);
        drop(temp);
        if let Err(e) = chat.delete_status(status).await {
            warn!("[{}] failed to delete status message: {}", trace.request_id, e);
        }

        Ok(())
    }

    async fn send_preview(
        &self,
        chat: &dyn ChatTransport,
        media: &LookupMedia,
        request_id: &str,
    ) -> Preview {
        let Some(thumbnail) = media.thumbnail.as_deref() else {
            return Preview::NotProvided;
        };

        match chat.send_preview(thumbnail, &preview_caption(&media.title)).await {
            Ok(()) => Preview::Sent,
            Err(e) => {
                warn!("[{}] thumbnail preview skipped: {}", request_id, e);
                Preview::SendFailed(e.to_string())
            }
        }
    }
}
