use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CloudinaryError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid keep pattern: {0}")]
    KeepPattern(#[from] regex::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Remote(String),

    #[error("IO error on {}: {source}", path.display())]
    LocalIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CloudinaryError {
    pub(crate) fn local_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CloudinaryError::LocalIo {
            path: path.into(),
            source,
        }
    }
}

impl From<walkdir::Error> for CloudinaryError {
    fn from(e: walkdir::Error) -> Self {
        let path = e.path().map(PathBuf::from).unwrap_or_default();
        CloudinaryError::LocalIo {
            path,
            source: e.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CloudinaryError>;
