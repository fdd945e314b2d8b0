//! Stackgen code generator library.
//!
//! This crate turns an API catalog (the JSON a CloudStack-style service
//! returns from `listApis`) into the source of a typed client crate built
//! on the `stackgen` runtime. The generated code includes:
//!
//! - A `<Op>Params` builder per operation, with a constructor taking the
//!   required parameters and `set_*`/`get_*`/`reset_*` accessors
//! - Response types for every operation, with shared types deduplicated
//! - One service module per layout entry, holding an async method per
//!   operation plus `get_<entity>_id` style lookup helpers
//! - A `CloudStack` facade with one accessor per service
//!
//! ## Modules
//!
//! - [`codegen`] - Token generation for params, types, services and crate files
//! - [`responses`] - Two-pass response type construction
//! - [`mapper`] - Wire type to Rust type mapping
//! - [`registry`] - Generated type name registry
//! - [`naming`] - Identifier conversion
//! - [`output`] - Final assembly, validation, and file writing
//! - [`cargo_gen`] - Cargo.toml generation for the output package
//! - [`config`] / [`validation`] - Run configuration and its checks
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use stackgen_define::Catalog;
//! use stackgen_gen::config::GeneratorConfig;
//! use stackgen_gen::output::generate_and_write;
//!
//! let catalog = Catalog::load("listApis.json").unwrap();
//! let config = GeneratorConfig::builtin();
//!
//! let report = generate_and_write(&catalog, &config, Path::new("cloudstack"), false).unwrap();
//! for error in &report.errors {
//!     eprintln!("{error}");
//! }
//! ```
//!
//! ## Generated Code Structure
//!
//! For a `Zone` service holding `listZones`:
//!
//! ```text
//! // zone.rs
//! pub struct ListZonesParams { ... }
//!
//! pub struct ZoneService<'a> { cs: &'a stackgen::CloudStackClient }
//!
//! impl<'a> ZoneService<'a> {
//!     pub async fn list_zones(&self, p: &ListZonesParams) -> Result<ListZonesResponse, stackgen::ApiError>;
//!     pub async fn get_zone_id(&self, name: &str, opts: &[stackgen::ListOption]) -> Result<String, stackgen::ApiError>;
//! }
//! ```

pub mod cargo_gen;
pub mod codegen;
pub mod config;
pub mod errors;
pub mod mapper;
pub mod naming;
pub mod output;
pub mod registry;
pub mod responses;
pub mod validation;

#[cfg(test)]
mod test_utils;
