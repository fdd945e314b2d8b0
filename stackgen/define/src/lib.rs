//! Stackgen Definition Library
//!
//! This crate provides the types consumed by the `stackgen-gen` binary:
//! the loaded API catalog, the override tables that carve exceptions out of
//! the generic generation rules, and the service layout that groups
//! operations into generated modules.
//!
//! ## Core Types
//!
//! ### Catalog
//!
//! - [`Catalog`] - Every operation a service exposes, loaded from `listApis` JSON
//! - [`Operation`] - A single command with its parameters and response tree
//! - [`Param`] - A request parameter (name, wire type token, required flag)
//! - [`Field`] - A response field, possibly with nested fields
//!
//! ### Overrides
//!
//! - [`OverrideTables`] - All per-operation and per-field exceptions
//! - [`ShapeOverride`] - Container shape forced for an (operation, field) pair
//! - [`WrapperOverride`] - Hand-specified list wrapper for irregular responses
//! - [`MapIndexing`] - Bucket indexing convention of a map parameter
//! - [`MapRoleKind`] - Bucket layout of a map parameter
//!
//! ### Layout
//!
//! - [`ServiceLayout`] - Ordered service → operations mapping
//!
//! ## Examples
//!
//! ```
//! use stackgen_define::Catalog;
//!
//! let catalog = Catalog::from_json_str(r#"{
//!     "count": 1,
//!     "api": [{
//!         "name": "listZones",
//!         "description": "Lists zones",
//!         "isasync": false,
//!         "params": [{"name": "name", "type": "string", "required": false}],
//!         "response": [{"name": "id", "type": "string"}, {"name": "name", "type": "string"}]
//!     }]
//! }"#).unwrap();
//!
//! let op = catalog.operation("listZones").unwrap();
//! assert!(!op.is_async);
//! assert_eq!(op.params.len(), 1);
//! ```
//!
//! ## Concrete Tables
//!
//! The actual override tables and service layout for CloudStack live in the
//! separate `stackgen-definitions` crate.

pub mod catalog;
pub mod error;
pub mod layout;
pub mod overrides;
pub mod prelude;

// Re-export main types at crate root
pub use catalog::{Catalog, Field, Operation, Param};
pub use error::CatalogError;
pub use layout::{Service, ServiceLayout};
pub use overrides::{
    MapIndexing, MapRoleKind, OverrideTables, ShapeOverride, WrapperOverride, WrapperShape,
};
