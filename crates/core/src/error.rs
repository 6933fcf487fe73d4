//! Error types for the AuraWall core.

use thiserror::Error;

/// Errors produced by configuration and generation operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Width or height was zero when building a configuration.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A color string could not be parsed as hex or `hsl()`.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A requested engine id was not recognized by the registry.
    #[error("unknown engine: {0}")]
    UnknownEngine(String),
}
