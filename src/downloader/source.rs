//! Classifies download URLs by provider.

use regex::Regex;
use std::sync::LazyLock;

use crate::utils::{Error, Result};

static DRIVE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https://drive\.google\.com/").expect("valid regex"));

static DRIVE_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://drive\.google\.com/uc\?id=([^&\s]+)").expect("valid regex")
});

/// Where a URL's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Google Drive file, addressed by its id.
    Drive { id: String },
    /// Anything served directly over HTTP(S).
    Http { url: String },
}

impl Source {
    /// Resolves the provider of `url`.
    ///
    /// Drive links must be of the form `https://drive.google.com/uc?id=<id>`;
    /// share links such as `.../open?id=<id>` are rejected.
    pub fn parse(url: &str) -> Result<Self> {
        if !DRIVE_PREFIX.is_match(url) {
            return Ok(Self::Http {
                url: url.to_string(),
            });
        }

        DRIVE_FILE
            .captures(url)
            .map(|caps| Self::Drive {
                id: caps[1].to_string(),
            })
            .ok_or_else(|| Error::InvalidUrlFormat {
                url: url.to_string(),
            })
    }

    pub fn is_drive(&self) -> bool {
        matches!(self, Self::Drive { .. })
    }
}
