pub mod download;
pub mod lookup;

use std::time::Duration;

pub use lookup::LookupMedia;

use crate::config::BotConfig;

/// HTTP side of a request: the downloader API lookup and the media fetch.
///
/// Both timeouts are idle timeouts: they bound connecting and each read, so a
/// body that keeps arriving is never cut off however long it takes overall.
#[derive(Debug, Clone)]
pub struct DownloaderClient {
    api: reqwest::Client,
    media: reqwest::Client,
    api_url: String,
}

fn idle_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(timeout)
        .read_timeout(timeout)
        .build()
}

impl DownloaderClient {
    pub fn new(
        api_url: impl Into<String>,
        lookup_timeout: Duration,
        download_timeout: Duration,
    ) -> reqwest::Result<Self> {
        Ok(Self {
            api: idle_client(lookup_timeout)?,
            media: idle_client(download_timeout)?,
            api_url: api_url.into(),
        })
    }

    pub fn from_config(config: &BotConfig) -> reqwest::Result<Self> {
        Self::new(
            config.api_url.clone(),
            config.lookup_timeout,
            config.download_timeout,
        )
    }
}
