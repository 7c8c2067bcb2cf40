//! Error types for configuration loading and dithering.

use errdiff_core::BufferError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DitherError {
    #[error("Buffer error: {0}")]
    Buffer(#[from] BufferError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("No default strategy configured")]
    NoDefaultStrategy,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid strategy '{name}': {source}")]
    InvalidStrategy {
        name: String,
        #[source]
        source: BufferError,
    },

    #[error("Default strategy '{0}' is not defined")]
    UnknownDefault(String),
}
