//! Download-then-extract for dataset archives.

use log::info;
use std::path::{Path, PathBuf};

use crate::archive;
use crate::downloader::Downloader;
use crate::utils::Result;
use crate::utils::files::{ensure_parent_directory, parent_dir};

impl Downloader {
    /// Downloads `url` into `file_path`, extracts it beside itself and returns
    /// the directory holding the extracted contents.
    ///
    /// Missing parent directories are created first. Nothing is rolled back if
    /// a step fails.
    pub async fn download_unzip<P: AsRef<Path>>(&self, url: &str, file_path: P) -> Result<PathBuf> {
        let file_path = file_path.as_ref().to_path_buf();
        ensure_parent_directory(&file_path).await?;

        self.download(url, &file_path).await?;

        let archive_path = file_path.clone();
        let kind = tokio::task::spawn_blocking(move || archive::unzip(archive_path)).await??;
        info!("Dataset {} ready ({kind})", file_path.display());

        Ok(parent_dir(&file_path))
    }
}

/// Downloads and extracts `url` with a default [`Downloader`].
pub async fn download_unzip<P: AsRef<Path>>(url: &str, file_path: P) -> Result<PathBuf> {
    Downloader::new()?.download_unzip(url, file_path).await
}
