//! Lookup helper errors.

use thiserror::Error;

/// Errors from the generated `get_*_id` and `get_*_by_id` helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No entity matched the name or id.
    #[error("No match found for {kind} {key}")]
    NotFound {
        /// Entity kind, e.g. `Zone`.
        kind: String,
        /// The name or id that was looked up.
        key: String,
    },

    /// More than one entity matched an id.
    #[error("There is more than one result for {kind} UUID: {id} ({count} results)")]
    MultipleResults {
        /// Entity kind, e.g. `Zone`.
        kind: String,
        /// The id that was looked up.
        id: String,
        /// Number of results the service reported.
        count: i64,
    },
}

impl LookupError {
    /// Returns `true` if nothing matched.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
