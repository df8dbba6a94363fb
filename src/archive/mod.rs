//! Archive detection and extraction.
//!
//! The archive kind is decided from the file name alone; contents are always
//! extracted next to the archive.

pub mod extract;
pub mod suffix;

use log::{info, warn};
use std::fmt;
use std::path::Path;

use crate::utils::files::parent_dir;
use crate::utils::{Error, Result};

/// Archive formats `unzip` understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// `.zip`
    Zip,
    /// `.tgz` or `.tar.gz`
    TarGz,
    /// A single gzip-compressed file, `.gz` not preceded by `.tar`.
    Gzip,
}

impl ArchiveKind {
    /// Classifies `path` by its suffix chain.
    ///
    /// Only the last two extensions matter: `x.tar.gz` is a tarball while
    /// `x.txt.gz` is a single compressed file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let suffixes = suffix::suffixes(path);
        let (ext, inner) = match suffixes.as_slice() {
            [.., inner, ext] => (ext.clone(), Some(inner.as_str())),
            _ => (suffixes.concat(), None),
        };

        match (ext.as_str(), inner) {
            (".zip", _) => Ok(Self::Zip),
            (".tgz", _) | (".gz", Some(".tar")) => Ok(Self::TarGz),
            (".gz", _) => Ok(Self::Gzip),
            _ => Err(Error::UnsupportedExtension {
                file_name: path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string()),
            }),
        }
    }

    /// Whether this extraction path is well exercised. Callers get a warning otherwise.
    pub fn is_tested(self) -> bool {
        matches!(self, Self::Zip)
    }

    fn extension(self) -> &'static str {
        match self {
            Self::Zip => ".zip",
            Self::TarGz => ".tar.gz",
            Self::Gzip => ".gz",
        }
    }
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Extracts `file_path` into its parent directory and returns the kind it was treated as.
///
/// Blocking; run it on a blocking thread from async code.
pub fn unzip<P: AsRef<Path>>(file_path: P) -> Result<ArchiveKind> {
    let file_path = file_path.as_ref();
    let kind = ArchiveKind::from_path(file_path)?;
    let destination = parent_dir(file_path);

    if !kind.is_tested() {
        warn!("Unpacking of file with extension {kind} has not been tested");
    }

    match kind {
        ArchiveKind::Zip => {
            info!("extracting...");
            extract::extract_zip(file_path, &destination)?;
        }
        ArchiveKind::TarGz => extract::extract_tar_gz(file_path, &destination)?,
        ArchiveKind::Gzip => {
            let output = extract::gz_output_path(file_path, &destination);
            extract::extract_gz(file_path, &output)?;
        }
    }

    info!("Extracted {} into {}", file_path.display(), destination.display());
    Ok(kind)
}
