use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while editing formulas or persisting settings.
///
/// Not finding a formula under the cursor and a stale replace are ordinary
/// outcomes and are reported as values, not through this type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Please enter a formula")]
    EmptyInput,

    #[error("line {line} does not exist in the document")]
    LineOutOfRange { line: usize },

    #[error("failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse settings file '{}': {source}", path.display())]
    ParseSettings {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("toml serialization error: {0}")]
    SerializeSettings(#[from] toml::ser::Error),

    #[error("failed to persist settings: {0}")]
    Persistence(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
