//! Runtime client for generated CloudStack-style API bindings.
//!
//! The `stackgen` crate is the hand-written half of the generated clients
//! produced by `stackgen-gen`. Generated call sites build a [`QueryParams`]
//! set, hand it to [`CloudStackClient::request`], and decode the unwrapped
//! JSON payload into their response types.
//!
//! ## Features
//!
//! - **Signed requests**: every call carries an HMAC-SHA1 signature over the
//!   sorted, lowercased query string
//! - **Transport selection**: GET for read-only commands, POST otherwise, with
//!   a GET-only override
//! - **Envelope unwrapping**: strips the `<command>response` wrapper and turns
//!   error envelopes into [`ServiceError`]
//! - **Async jobs**: polls `queryAsyncJobResult` with a capped linear backoff
//! - **Lookup helpers**: shared arity policy for the generated
//!   `get_*_id` / `get_*_by_id` helpers
//!
//! ## Example
//!
//! ```rust,ignore
//! use stackgen::{CloudStackClient, QueryParams};
//!
//! let client = CloudStackClient::builder("https://cloud.example.com/client/api", "key", "secret")
//!     .build()?;
//!
//! let mut params = QueryParams::new();
//! params.set("name", "zone-1");
//! let raw = client.request("listZones", false, params).await?;
//! ```

pub mod client;
pub mod de;
pub mod envelope;
pub mod error;
pub mod lookup;
pub mod method;
pub mod options;
pub mod params;
pub mod types;

// Re-exports for generated code
pub use client::{CloudStackClient, CloudStackClientBuilder};
pub use envelope::decode;
pub use error::{ApiError, ClientError, JobError, LookupError, ServiceError};
pub use options::ListOption;
pub use params::{IndexMode, MapRole, QueryParams};
pub use types::AsyncJobResult;
