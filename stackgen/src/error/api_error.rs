//! Top-level API error type.

use super::{ClientError, JobError, LookupError, ServiceError};
use thiserror::Error;

/// Top-level error type for all API operations.
///
/// This enum aggregates all error categories, enabling unified error handling
/// while preserving the ability to match on specific error types when needed.
///
/// ## Examples
///
/// ```rust,ignore
/// use stackgen::ApiError;
///
/// fn handle_error(err: ApiError) {
///     match err {
///         ApiError::Client(e) => eprintln!("Network error: {e}"),
///         ApiError::Service(e) => eprintln!("Service rejected the call: {e}"),
///         ApiError::Job(e) if e.is_timeout() => eprintln!("Still running: {e}"),
///         ApiError::Job(e) => eprintln!("Job failed: {e}"),
///         ApiError::Lookup(e) => eprintln!("Lookup failed: {e}"),
///         ApiError::Decode(e) => eprintln!("Unexpected payload: {e}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP client errors (network, timeout, connection failures).
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The service answered with a structured error envelope.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Async job failure or polling timeout.
    #[error(transparent)]
    Job(#[from] JobError),

    /// A lookup helper found no match or an ambiguous match.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The response payload could not be decoded into the expected type.
    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Returns `true` if this is the async polling timeout.
    ///
    /// A timed out job is still running server side; its id stays valid.
    pub fn is_async_timeout(&self) -> bool {
        matches!(self, Self::Job(e) if e.is_timeout())
    }

    /// Returns the service error text, if the service produced one.
    pub fn service_text(&self) -> Option<&str> {
        match self {
            Self::Service(e) => Some(e.text.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_client_error() {
        let client_err = ClientError::HttpStatus {
            status: 502,
            message: "bad gateway".to_string(),
        };
        let api_err: ApiError = client_err.into();
        assert!(matches!(api_err, ApiError::Client(_)));
    }

    #[test]
    fn test_from_lookup_error() {
        let lookup_err = LookupError::NotFound {
            kind: "Zone".to_string(),
            key: "zone-1".to_string(),
        };
        let api_err: ApiError = lookup_err.into();
        assert!(matches!(api_err, ApiError::Lookup(_)));
    }

    #[test]
    fn test_is_async_timeout() {
        let err: ApiError = JobError::Timeout {
            job_id: "abc".to_string(),
            waited_secs: 300,
        }
        .into();
        assert!(err.is_async_timeout());

        let err: ApiError = JobError::Failed {
            job_id: "abc".to_string(),
            message: "boom".to_string(),
        }
        .into();
        assert!(!err.is_async_timeout());
    }

    #[test]
    fn test_service_text() {
        let err: ApiError = ServiceError {
            code: 431,
            cs_code: 4350,
            text: "Unable to find zone".to_string(),
        }
        .into();
        assert_eq!(err.service_text(), Some("Unable to find zone"));
    }
}
