//! Error types for the TapTools client.

use thiserror::Error;

/// Result type for TapTools client operations.
pub type Result<T> = std::result::Result<T, TapToolsError>;

/// Errors that can occur while loading the API schema or calling the API.
///
/// Every error propagates to the caller immediately; the client never
/// retries and never downgrades a failure to a value.
#[derive(Error, Debug)]
pub enum TapToolsError {
    /// Missing or empty API key
    #[error("Configuration error: {0}")]
    Config(String),

    /// Endpoint absent from the API schema
    #[error("Endpoint '{0}' not found in API schema")]
    UnknownEndpoint(String),

    /// Malformed or ambiguous API schema
    #[error("Invalid API schema: {0}")]
    Schema(String),

    /// Invalid parameter value
    #[error("Invalid parameter value for '{0}': {1}")]
    InvalidParameter(String, String),

    /// Non-success HTTP status, with the response body
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Response body was not valid JSON
    #[error("Failed to decode response body: {0}")]
    Decode(serde_json::Error),

    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
