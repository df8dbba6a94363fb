//! File system utilities for common operations.

use crate::utils::Result;
use log::debug;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Ensures a directory exists, creating it and all parent directories if necessary.
pub async fn ensure_directory<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        fs::create_dir_all(path).await?;
        debug!("Created directory: {path:?}");
    }
    Ok(())
}

/// Ensures the parent directory of a file exists.
pub async fn ensure_parent_directory<P: AsRef<Path>>(file_path: P) -> Result<()> {
    ensure_directory(parent_dir(file_path)).await
}

/// Directory a file lives in. A bare file name resolves to `.`.
pub fn parent_dir<P: AsRef<Path>>(file_path: P) -> PathBuf {
    match file_path.as_ref().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
