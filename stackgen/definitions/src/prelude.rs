//! Convenient re-exports for working with the CloudStack definitions.
//!
//! ## Examples
//!
//! ```
//! use stackgen_definitions::prelude::*;
//!
//! let tables = cloudstack_overrides();
//! assert!(tables.recounts("listProjects"));
//! ```

pub use crate::layout::cloudstack_layout;
pub use crate::overrides::cloudstack_overrides;
