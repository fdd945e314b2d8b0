//! Stackgen CloudStack Definitions
//!
//! This crate contains the concrete data that specializes the generic
//! generator to the CloudStack API: the override tables and the service
//! layout. Both use the primitives from `stackgen-define`.
//!
//! ## Examples
//!
//! ```
//! use stackgen_definitions::{cloudstack_layout, cloudstack_overrides};
//! use stackgen_define::MapIndexing;
//!
//! let tables = cloudstack_overrides();
//! assert_eq!(
//!     tables.index_mode("deployVirtualMachine", "details"),
//!     MapIndexing::ZeroCollapsed
//! );
//!
//! let layout = cloudstack_layout();
//! assert_eq!(layout.service_for("listZones"), Some("Zone"));
//! ```

pub mod layout;
pub mod overrides;
pub mod prelude;

pub use layout::cloudstack_layout;
pub use overrides::cloudstack_overrides;
