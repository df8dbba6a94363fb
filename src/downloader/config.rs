use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::Result;

pub const DRIVE_BASE_URL: &str = "https://drive.google.com";

/// Settings for the HTTP and drive downloaders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    pub user_agent: String,
    pub connect_timeout_secs: Option<u64>,
    /// Whole-request timeout. Unset means the transfer may take as long as it takes.
    pub timeout_secs: Option<u64>,
    /// Where drive requests are sent. Only the request target changes;
    /// drive links are still recognized by their public prefix.
    pub drive_base_url: String,
    pub max_confirmations: usize,
    pub progress_interval_ms: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("dataset-fetch/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout_secs: None,
            timeout_secs: None,
            drive_base_url: DRIVE_BASE_URL.to_string(),
            max_confirmations: 3,
            progress_interval_ms: 500,
        }
    }
}

impl DownloadConfig {
    /// Reads a JSON config file. Missing fields keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn with_drive_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.drive_base_url = base_url.into();
        self
    }
}
