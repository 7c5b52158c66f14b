use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid alarm time `{0}` (expected something like `07:30 AM` or `19:30`)")]
    InvalidTime(String),
    #[error("couldn't access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("couldn't serialize alarms: {0}")]
    Json(#[from] serde_json::Error),
    #[error("couldn't parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("couldn't serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
    #[error("couldn't determine the user's config/data directories")]
    NoProjectDirs,
    #[error("audio error: {0}")]
    Audio(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
