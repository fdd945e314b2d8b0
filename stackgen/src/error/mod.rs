//! Layered error types for the runtime client.
//!
//! The error hierarchy is structured for actionable diagnostics:
//! - [`ApiError`] - Top-level error type returned by every generated call
//! - [`ClientError`] - HTTP client and network errors
//! - [`ServiceError`] - Structured error envelopes returned by the service
//! - [`JobError`] - Async job failures and polling timeouts
//! - [`LookupError`] - Failures of the generated lookup helpers

mod api_error;
mod client_error;
mod job_error;
mod lookup_error;
mod service_error;

pub use api_error::ApiError;
pub use client_error::ClientError;
pub use job_error::JobError;
pub use lookup_error::LookupError;
pub use service_error::ServiceError;
