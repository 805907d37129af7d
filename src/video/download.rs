use std::path::Path;

use futures_util::StreamExt;
use log::debug;
use reqwest::StatusCode;
use tokio::{fs, io::AsyncWriteExt};

use super::DownloaderClient;
use crate::errors::RequestError;

/// Largest single write to the output file.
pub const CHUNK_SIZE: usize = 8192;

impl DownloaderClient {
    /// Stream the body of `download_url` into `output_path`, returning the
    /// number of bytes written.
    pub async fn fetch_to_file(
        &self,
        download_url: &str,
        output_path: &Path,
    ) -> Result<u64, RequestError> {
        let response = self.media.get(download_url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(RequestError::MediaHttp { status });
        }

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(output_path).await?;
        let mut stream = response.bytes_stream();
        let mut written = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            for piece in chunk.chunks(CHUNK_SIZE) {
                file.write_all(piece).await?;
            }
            written += chunk.len() as u64;
        }
        file.flush().await?;

        debug!("Wrote {} bytes to {}", written, output_path.display());
        Ok(written)
    }
}
