//! Google Drive downloads.
//!
//! Small files are served straight from `uc?id=<id>`. Larger ones come back as
//! an HTML interstitial (virus-scan warning) that has to be confirmed before the
//! real bytes are sent; the confirmation target is scraped from that page.

use log::{debug, info};
use regex::Regex;
use reqwest::header::CONTENT_DISPOSITION;
use std::path::Path;
use std::sync::LazyLock;

use super::{DownloadConfig, HttpDownloader};
use crate::utils::{Error, Result};

static FORM_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<form[^>]*\sid="download-form"[^>]*>"#).expect("valid regex")
});
static FORM_ACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\saction="([^"]+)""#).expect("valid regex"));
static HIDDEN_INPUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<input[^>]*\stype="hidden"[^>]*>"#).expect("valid regex"));
static INPUT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\sname="([^"]*)""#).expect("valid regex"));
static INPUT_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\svalue="([^"]*)""#).expect("valid regex"));
static CONFIRM_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href="(/uc\?export=download[^"]+)""#).expect("valid regex"));
static DOWNLOAD_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""downloadUrl":"([^"]+)""#).expect("valid regex"));
static ERROR_CAPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<p class="uc-error-subcaption">(.*?)</p>"#).expect("valid regex")
});

/// Request to issue after an interstitial page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextRequest {
    pub url: String,
    pub params: Vec<(String, String)>,
}

pub struct DriveDownloader {
    http: HttpDownloader,
    base_url: String,
    max_confirmations: usize,
}

impl DriveDownloader {
    pub fn new(http: HttpDownloader, config: &DownloadConfig) -> Self {
        Self {
            http,
            base_url: config.drive_base_url.trim_end_matches('/').to_string(),
            max_confirmations: config.max_confirmations,
        }
    }

    /// Downloads drive file `id` into `destination`, following confirmation pages.
    pub async fn download_file(&self, id: &str, destination: &Path) -> Result<()> {
        let mut next = NextRequest {
            url: format!("{}/uc", self.base_url),
            params: vec![
                ("id".to_string(), id.to_string()),
                ("export".to_string(), "download".to_string()),
            ],
        };

        for attempt in 0..=self.max_confirmations {
            debug!("Drive request {} for {id}: {}", attempt + 1, next.url);
            let response = self
                .http
                .client()
                .get(&next.url)
                .query(&next.params)
                .send()
                .await?
                .error_for_status()?;

            if response.headers().contains_key(CONTENT_DISPOSITION) {
                return self.http.save_response(response, destination).await;
            }

            let page = response.text().await?;
            next = resolve_confirmation(&page, &self.base_url)?;
            info!("Drive file {id} needs confirmation, following {}", next.url);
        }

        Err(Error::Drive(format!(
            "no file for {id} after {} confirmation pages",
            self.max_confirmations
        )))
    }
}

/// Works out where an interstitial page wants us to go next.
pub fn resolve_confirmation(page: &str, base_url: &str) -> Result<NextRequest> {
    if let Some(form) = FORM_TAG.find(page) {
        if let Some(action) = FORM_ACTION.captures(form.as_str()) {
            let rest = &page[form.end()..];
            let body = rest.split("</form>").next().unwrap_or(rest);
            let params = HIDDEN_INPUT
                .find_iter(body)
                .filter_map(|input| {
                    let name = INPUT_NAME.captures(input.as_str())?;
                    let value = INPUT_VALUE
                        .captures(input.as_str())
                        .map(|caps| unescape_html(&caps[1]))
                        .unwrap_or_default();
                    Some((unescape_html(&name[1]), value))
                })
                .collect();

            return Ok(NextRequest {
                url: unescape_html(&action[1]),
                params,
            });
        }
    }

    if let Some(caps) = CONFIRM_HREF.captures(page) {
        return Ok(NextRequest {
            url: format!("{base_url}{}", unescape_html(&caps[1])),
            params: Vec::new(),
        });
    }

    if let Some(caps) = DOWNLOAD_URL.captures(page) {
        return Ok(NextRequest {
            url: unescape_json(&caps[1]),
            params: Vec::new(),
        });
    }

    if let Some(caps) = ERROR_CAPTION.captures(page) {
        return Err(Error::Drive(caps[1].trim().to_string()));
    }

    Err(Error::Drive(
        "cannot retrieve the public link of the file; \
         check that link sharing is on or try again later"
            .to_string(),
    ))
}

fn unescape_html(s: &str) -> String {
    s.replace("&amp;", "&")
}

fn unescape_json(s: &str) -> String {
    s.replace("\\u003d", "=")
        .replace("\\u0026", "&")
        .replace("\\/", "/")
}
