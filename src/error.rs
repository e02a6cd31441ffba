//! Error types shared across the crate.
//!
//! Nothing in the playback core is fatal; these errors surface at startup
//! (config, data file) or are logged and swallowed (audio, share).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DuabookError {
    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A dua data file could not be parsed.
    #[error("failed to parse {}: {source}", path.display())]
    DataParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The record set is structurally invalid (duplicate or empty ids, no records).
    #[error("invalid catalog: {0}")]
    Catalog(String),

    /// Configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The audio engine refused or failed a request.
    #[error("audio error: {0}")]
    Audio(String),

    /// The platform share capability failed.
    #[error("share failed: {0}")]
    Share(String),

    /// No clipboard helper accepted the text.
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}

impl From<::config::ConfigError> for DuabookError {
    fn from(e: ::config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DuabookError>;
