//! Error handling.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    /// A drive link that is not of the `uc?id=<id>` form.
    InvalidUrlFormat { url: String },
    /// `unzip` could not classify the file by its suffix chain.
    UnsupportedExtension { file_name: String },
    /// A tar member would land outside the extraction directory.
    PathTraversal { entry: PathBuf },
    /// The drive served a page we could not turn into a download.
    Drive(String),
    Config(serde_json::Error),
    Io(std::io::Error),
    Http(reqwest::Error),
    Zip(zip::result::ZipError),
    Task(tokio::task::JoinError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUrlFormat { url } => write!(
                f,
                "Google Drive link must be of the form \
                 'https://drive.google.com/uc?id=<id>' but the provided link is {url}"
            ),
            Self::UnsupportedExtension { file_name } => {
                write!(f, "{file_name} extension not supported")
            }
            Self::PathTraversal { entry } => {
                write!(f, "Attempted path traversal in tar file: {}", entry.display())
            }
            Self::Drive(message) => write!(f, "Drive error: {message}"),
            Self::Config(err) => write!(f, "Config error: {err}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
            Self::Http(err) => write!(f, "HTTP error: {err}"),
            Self::Zip(err) => write!(f, "ZIP error: {err}"),
            Self::Task(err) => write!(f, "Task error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Http(err) => Some(err),
            Self::Zip(err) => Some(err),
            Self::Task(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Zip(err)
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
