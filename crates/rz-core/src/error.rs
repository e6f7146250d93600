//! Error types for configuration and store records.

use thiserror::Error;

/// Errors that can occur when reading host-supplied configuration or
/// persisted size values.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The parameters document is not valid JSON for `ResizrParameters`.
    #[error("invalid resizr parameters: {0}")]
    Json(#[from] serde_json::Error),

    /// A persisted store value is neither `null` nor a non-negative integer.
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
