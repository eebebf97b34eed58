/// Structured error types for coursework-core.
///
/// Binary crates (coursework-cli) wrap these with `anyhow`,
/// library consumers get the structured variants.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for coursework-core operations
#[derive(Error, Debug)]
pub enum CourseworkError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Config file is not valid TOML or has the wrong shape
    #[error("Failed to parse config {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Config could not be rendered back to TOML
    #[error("Failed to serialize config: {source}")]
    ConfigSerialize {
        #[from]
        source: toml::ser::Error,
    },

    /// A value in the config or environment is unusable
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for coursework-core operations
pub type Result<T> = std::result::Result<T, CourseworkError>;

impl CourseworkError {
    /// Create a config parse error
    pub fn config_parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
