//! Error enum
use std::fmt;
use std::path::PathBuf;

use crate::download;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// archive is missing or unreadable.
    Source {
        path: PathBuf,
        err: std::io::Error,
    },
    /// archive content is malformed or truncated.
    Decompression {
        path: PathBuf,
        err: std::io::Error,
    },
    /// corpus file could not be created, written or moved into place.
    Output {
        path: PathBuf,
        err: std::io::Error,
    },
    PostProcess {
        step: &'static str,
        err: std::io::Error,
    },
    Download(download::Error),
    Regex(regex::Error),
    Custom(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "i/o error: {}", e),
            Error::Source { path, err } => {
                write!(f, "could not read archive {:?}: {}", path, err)
            }
            Error::Decompression { path, err } => {
                write!(f, "could not decompress archive {:?}: {}", path, err)
            }
            Error::Output { path, err } => {
                write!(f, "could not write corpus to {:?}: {}", path, err)
            }
            Error::PostProcess { step, err } => write!(f, "{} failed: {}", step, err),
            Error::Download(e) => write!(f, "download failed: {}", e),
            Error::Regex(e) => write!(f, "invalid pattern: {}", e),
            Error::Custom(s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err)
            | Error::Source { err, .. }
            | Error::Decompression { err, .. }
            | Error::Output { err, .. }
            | Error::PostProcess { err, .. } => Some(err),
            Error::Download(e) => Some(e),
            Error::Regex(e) => Some(e),
            Error::Custom(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<download::Error> for Error {
    fn from(e: download::Error) -> Error {
        Error::Download(e)
    }
}

impl From<regex::Error> for Error {
    fn from(e: regex::Error) -> Error {
        Error::Regex(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}
