//! HTTP client module.
//!
//! This module provides the async client that signs commands, unwraps
//! response envelopes, and polls async jobs.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use stackgen::{CloudStackClient, ListOption};
//!
//! let client = CloudStackClient::builder("https://cloud.example.com/client/api", "key", "secret")
//!     .async_timeout(Duration::from_secs(600))
//!     .default_option(ListOption::Project("5e1f...".into()))
//!     .build()?;
//! ```

mod executor;
pub mod signing;

pub use executor::{
    CloudStackClient, CloudStackClientBuilder, ENV_API_KEY, ENV_API_URL, ENV_SECRET_KEY,
};
