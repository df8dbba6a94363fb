//! Fetching remote files.
//!
//! URLs are classified into a [`Source`] and handed to the matching
//! downloader: Google Drive links go through [`DriveDownloader`], everything
//! else is a plain streamed GET.

pub mod config;
pub mod drive;
pub mod http;
pub mod progress;
pub mod source;

pub use config::DownloadConfig;
pub use drive::DriveDownloader;
pub use http::HttpDownloader;
pub use progress::ProgressTracker;
pub use source::Source;

use log::{debug, info};
use std::path::Path;

use crate::utils::Result;

/// Dispatches downloads to the HTTP or drive downloader.
pub struct Downloader {
    http: HttpDownloader,
    drive: DriveDownloader,
}

impl Downloader {
    /// Creates a downloader with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(&DownloadConfig::default())
    }

    pub fn with_config(config: &DownloadConfig) -> Result<Self> {
        let http = HttpDownloader::new(config)?;
        let drive = DriveDownloader::new(http.clone(), config);
        Ok(Self { http, drive })
    }

    /// Downloads `url` into `destination`.
    ///
    /// Drive links must be of the `https://drive.google.com/uc?id=<id>` form,
    /// otherwise this fails with [`Error::InvalidUrlFormat`](crate::Error::InvalidUrlFormat)
    /// before any request is made.
    pub async fn download<P: AsRef<Path>>(&self, url: &str, destination: P) -> Result<()> {
        let destination = destination.as_ref();
        info!("Downloading from {url} into {}", destination.display());

        match Source::parse(url)? {
            Source::Drive { id } => self.drive.download_file(&id, destination).await,
            Source::Http { url } => self.http.download_file(&url, destination).await,
        }
    }

    /// Downloads `url` into `check` unless `check` already exists.
    ///
    /// Returns whether a download happened.
    pub async fn download_if_missing<P: AsRef<Path>>(&self, url: &str, check: P) -> Result<bool> {
        let check = check.as_ref();
        if check.exists() {
            debug!("{} already exists, skipping {url}", check.display());
            return Ok(false);
        }

        self.download(url, check).await?;
        Ok(true)
    }
}

/// Downloads `url` into `destination` with a default [`Downloader`].
pub async fn download<P: AsRef<Path>>(url: &str, destination: P) -> Result<()> {
    Downloader::new()?.download(url, destination).await
}

/// Downloads `url` into `check` unless it already exists. Returns whether a download happened.
pub async fn download_if_missing<P: AsRef<Path>>(url: &str, check: P) -> Result<bool> {
    Downloader::new()?.download_if_missing(url, check).await
}
