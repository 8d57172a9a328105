use std::path::PathBuf;
use thiserror::Error;

/// Main errors for the `app-utils` crate.
#[derive(Error, Debug)]
pub enum Error {
    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// TOML configuration did not deserialize
    #[error("TOML parsing failed: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// YAML suite did not deserialize
    #[error("YAML parsing failed: {0}")]
    YamlParseError(#[from] serde_yaml::Error),

    /// Configuration deserialized but holds invalid values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Suite file is structurally valid but unusable
    #[error("Invalid suite: {0}")]
    InvalidSuite(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
