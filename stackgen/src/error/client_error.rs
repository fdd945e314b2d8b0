//! HTTP client and network errors.

use thiserror::Error;

/// Errors from the HTTP client layer.
///
/// These errors represent network-level failures, HTTP status errors that
/// did not carry a parsable error envelope, and configuration problems
/// detected while building requests.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed due to network or protocol error.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned a non-success HTTP status without an error envelope.
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: u16,
        /// Raw response body.
        message: String,
    },

    /// The configured base URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A required configuration value is missing.
    #[error("Missing configuration: {name}")]
    MissingConfig {
        /// The environment variable or setting that was absent.
        name: String,
    },

    /// The response body was not a JSON object envelope.
    #[error("Malformed response envelope: {0}")]
    MalformedEnvelope(String),

    /// The request signature could not be computed.
    #[error("Failed to sign request: {0}")]
    Signing(String),
}
