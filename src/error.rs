//! Crate error type
//!
//! Unanalyzable text is not an error; it resolves to the Unknown mood.
//! These variants cover configuration, terminal output and the server.

use std::path::PathBuf;

/// Errors raised outside the presentation core
#[derive(Debug, thiserror::Error)]
pub enum MoodError {
    /// Config file could not be read
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `Config`
    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Config parsed but a value is out of range
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Terminal I/O failed
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// State could not be encoded as JSON
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server could not bind or stopped with an I/O error
    #[error("server error on {addr}: {source}")]
    Server {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, MoodError>;
