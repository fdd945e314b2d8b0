//! Catalog loading errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or parsing a catalog.
///
/// Either one aborts a generation run; every later failure is reported per
/// operation instead.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog is not valid `listApis` JSON.
    #[error("Failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),
}
