use reqwest::StatusCode;
use thiserror::Error;

use crate::pipeline::Outcome;

pub const DEFAULT_UPSTREAM_MESSAGE: &str = "Unknown error occurred";

/// Errors bubbled up to the dispatcher from endpoints.
#[derive(Debug, Error)]
pub enum BotError {
    /// Telegram API errors
    #[error("Telegram API error: {0}")]
    TelegramError(#[from] teloxide::RequestError),
    /// Filesystem errors
    #[error("Filesystem error: {0}")]
    FileSystemError(#[from] std::io::Error),
    #[error("{0}")]
    General(String),
}

impl BotError {
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }
}

/// Everything that can end a single download request early.
///
/// Each variant maps to its own fixed user-facing text, see [`RequestError::user_message`].
#[derive(Debug, Error)]
pub enum RequestError {
    /// The downloader API answered with a non-200 status.
    #[error("downloader API responded with {status}")]
    UpstreamHttp { status: StatusCode },
    /// The media host answered with a non-200 status.
    #[error("media host responded with {status}")]
    MediaHttp { status: StatusCode },
    /// The downloader API reported `success: false`.
    #[error("downloader API reported failure: {0}")]
    Upstream(String),
    #[error("downloader API returned no download URL")]
    MissingDownloadUrl,
    #[error("request timed out")]
    Timeout,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("http error: {0}")]
    Http(reqwest::Error),
    #[error("telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),
    #[error("{0}")]
    General(String),
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

impl From<BotError> for RequestError {
    fn from(err: BotError) -> Self {
        match err {
            BotError::TelegramError(e) => Self::Telegram(e),
            BotError::FileSystemError(e) => Self::Io(e),
            BotError::General(msg) => Self::General(msg),
        }
    }
}

impl RequestError {
    /// Text shown to the user in place of the status message.
    pub fn user_message(&self) -> String {
        match self {
            Self::UpstreamHttp { .. } => "❌ API request failed. Please try again later!".into(),
            Self::MediaHttp { .. } => "❌ Failed to download video. Please try again!".into(),
            Self::Upstream(msg) => format!("❌ Error: {msg}"),
            Self::MissingDownloadUrl => "❌ Download URL not found!".into(),
            Self::Timeout => {
                "⏰ Request timeout! Video might be too large or slow connection.".into()
            }
            Self::Io(_) | Self::Http(_) | Self::Telegram(_) | Self::General(_) => {
                "❌ Something went wrong while processing your video. Please try again!".into()
            }
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self {
            Self::UpstreamHttp { .. }
            | Self::MediaHttp { .. }
            | Self::Upstream(_)
            | Self::MissingDownloadUrl => Outcome::UpstreamError,
            Self::Timeout => Outcome::TimedOut,
            Self::Io(_) | Self::Http(_) | Self::Telegram(_) | Self::General(_) => {
                Outcome::Failed
            }
        }
    }
}

pub type BotResult<T> = Result<T, BotError>;

/// Result for endpoints
pub type HandlerResult = BotResult<()>;
