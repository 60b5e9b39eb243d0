//! Custom error types for the common library
//!
//! This module defines the configuration error type shared by services.

use thiserror::Error;

/// Custom error type for configuration loading
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration sources could not be read or deserialized
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

/// Type alias for Result with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
