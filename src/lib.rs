//! Fetch remote dataset archives and unpack them locally.
//!
//! ```no_run
//! # async fn run() -> dataset_fetch::Result<()> {
//! let dir = dataset_fetch::download_unzip(
//!     "https://example.com/corpora/wikitext.zip",
//!     "data/wikitext/wikitext.zip",
//! )
//! .await?;
//! println!("extracted into {}", dir.display());
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod dataset;
pub mod downloader;
pub mod utils;

pub use archive::{ArchiveKind, unzip};
pub use dataset::download_unzip;
pub use downloader::{DownloadConfig, Downloader, Source, download, download_if_missing};
pub use utils::{Error, Result};
