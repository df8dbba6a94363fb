use futures_util::StreamExt;
use log::debug;
use reqwest::{Client, Response};
use std::{path::Path, time::Duration};
use tokio::{fs::File, io::AsyncWriteExt};

use super::{DownloadConfig, ProgressTracker};
use crate::utils::Result;

/// Generic HTTP downloader that streams response bodies to disk.
#[derive(Clone)]
pub struct HttpDownloader {
    client: Client,
    progress_interval: Duration,
}

impl HttpDownloader {
    /// Creates a downloader with a cookie-aware client built from `config`.
    pub fn new(config: &DownloadConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .cookie_store(true);

        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            progress_interval: Duration::from_millis(config.progress_interval_ms),
        })
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    /// Downloads `url` into `destination`, replacing any existing file.
    pub async fn download_file(&self, url: &str, destination: &Path) -> Result<()> {
        debug!("GET {url}");
        let response = self.client.get(url).send().await?.error_for_status()?;
        self.save_response(response, destination).await
    }

    /// Streams a successful response body into `destination`.
    ///
    /// Nothing is cleaned up on failure; a broken transfer leaves a partial file.
    pub(crate) async fn save_response(&self, response: Response, destination: &Path) -> Result<()> {
        let name = destination
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| destination.display().to_string());

        let mut tracker =
            ProgressTracker::new(name, response.content_length(), self.progress_interval);
        let mut file = File::create(destination).await?;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            tracker.advance(chunk.len() as u64);
        }

        file.flush().await?;
        tracker.complete();
        Ok(())
    }
}
