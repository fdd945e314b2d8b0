//! Convenient re-exports for working with stackgen definitions.
//!
//! ## Examples
//!
//! ```
//! use stackgen_define::prelude::*;
//!
//! let tables = OverrideTables::new()
//!     .with_index_mode("updateZone", "details", MapIndexing::ZeroCollapsed);
//! let layout = ServiceLayout::new().service("Zone", &["updateZone"]);
//!
//! assert_eq!(tables.index_mode("updateZone", "details"), MapIndexing::ZeroCollapsed);
//! assert!(layout.contains("updateZone"));
//! ```

pub use crate::catalog::{Catalog, Field, Operation, Param};
pub use crate::error::CatalogError;
pub use crate::layout::{Service, ServiceLayout};
pub use crate::overrides::{
    MapIndexing, MapRoleKind, OverrideTables, ShapeOverride, WrapperOverride, WrapperShape,
};
