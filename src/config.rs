use std::{path::PathBuf, time::Duration};

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.giftedtech.co.ke/downloader/";
pub const DEFAULT_DOWNLOAD_DIR: &str = "videos";
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("BOT_TOKEN environment variable not set")]
    MissingToken,
    #[error("{key} must be a positive number of seconds, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

/// Process configuration, built once at startup and handed to the bot.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: String,
    pub api_url: String,
    pub download_dir: PathBuf,
    pub lookup_timeout: Duration,
    pub download_timeout: Duration,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = non_empty("BOT_TOKEN")
            .or_else(|| non_empty("TELOXIDE_TOKEN"))
            .ok_or(ConfigError::MissingToken)?;

        let api_url = non_empty("DOWNLOADER_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into());
        let download_dir = non_empty("DOWNLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DOWNLOAD_DIR));

        let lookup_timeout = seconds(
            "LOOKUP_TIMEOUT_SECS",
            non_empty("LOOKUP_TIMEOUT_SECS"),
            DEFAULT_LOOKUP_TIMEOUT_SECS,
        )?;
        let download_timeout = seconds(
            "DOWNLOAD_TIMEOUT_SECS",
            non_empty("DOWNLOAD_TIMEOUT_SECS"),
            DEFAULT_DOWNLOAD_TIMEOUT_SECS,
        )?;

        Ok(Self {
            token,
            api_url,
            download_dir,
            lookup_timeout,
            download_timeout,
        })
    }
}

fn seconds(key: &'static str, raw: Option<String>, default: u64) -> Result<Duration, ConfigError> {
    let Some(raw) = raw else {
        return Ok(Duration::from_secs(default));
    };

    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidNumber { key, value: raw }),
    }
}
