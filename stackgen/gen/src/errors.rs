//! Error types for the stackgen generator.

use std::fmt;

use stackgen_define::CatalogError;
use thiserror::Error;

/// Errors that abort a generation run.
///
/// Problems confined to a single operation are not errors of this kind;
/// they are collected in a [`GenerationReport`] instead.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Failed to read or parse the catalog
    #[error("Failed to load catalog: {0}")]
    ParseError(#[from] CatalogError),

    /// Failed to generate code
    #[error("Code generation failed: {0}")]
    CodeGenError(String),

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// One or more operations could not be generated.
    ///
    /// Raised after everything that did generate has been written.
    #[error("{count} operation(s) failed to generate")]
    OperationsFailed { count: usize },
}

/// Why a single operation was left out of the generated crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationErrorKind {
    /// Named by the service layout, absent from the catalog.
    MissingFromCatalog { service: String },
    /// A generated fragment did not parse as Rust.
    InvalidCode(String),
}

/// A per-operation generation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationError {
    pub operation: String,
    pub kind: OperationErrorKind,
}

impl OperationError {
    pub fn missing(operation: &str, service: &str) -> Self {
        Self {
            operation: operation.to_string(),
            kind: OperationErrorKind::MissingFromCatalog {
                service: service.to_string(),
            },
        }
    }

    pub fn invalid(operation: &str, reason: impl Into<String>) -> Self {
        Self {
            operation: operation.to_string(),
            kind: OperationErrorKind::InvalidCode(reason.into()),
        }
    }
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            OperationErrorKind::MissingFromCatalog { service } => write!(
                f,
                "{}: listed in service '{}' but not present in the catalog",
                self.operation, service
            ),
            OperationErrorKind::InvalidCode(reason) => {
                write!(f, "{}: generated code is invalid: {}", self.operation, reason)
            }
        }
    }
}

/// Outcome of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Operations that made it into the generated crate.
    pub generated: Vec<String>,
    /// Catalog operations that no service claims.
    pub skipped: Vec<String>,
    pub errors: Vec<OperationError>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Converts the report into a run-level result.
    ///
    /// ## Errors
    ///
    /// Returns [`GeneratorError::OperationsFailed`] if any operation failed.
    pub fn into_result(self) -> Result<Self, GeneratorError> {
        if self.errors.is_empty() {
            Ok(self)
        } else {
            Err(GeneratorError::OperationsFailed {
                count: self.errors.len(),
            })
        }
    }
}
