//! The API catalog: every callable operation and its schema.
//!
//! The catalog is the JSON document returned by the service's `listApis`
//! command, either bare (`{"count": N, "api": [...]}`) or still wrapped in
//! its `listapisresponse` envelope.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// A request parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    /// Wire type token, e.g. `string`, `long`, `map`, `list`.
    #[serde(rename = "type", default)]
    pub wire_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: String,
}

/// A response field. Fields with nested fields are structured members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type", default)]
    pub wire_type: String,
    #[serde(default)]
    pub description: String,
    /// Nested fields of a structured member.
    #[serde(rename = "response", default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
}

impl Field {
    /// Returns `true` if this field carries its own nested fields.
    pub fn is_nested(&self) -> bool {
        !self.fields.is_empty()
    }
}

/// A single callable operation (a "command").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Runs as an async job polled through `queryAsyncJobResult`.
    #[serde(rename = "isasync", default)]
    pub is_async: bool,
    #[serde(default)]
    pub params: Vec<Param>,
    /// Top-level response fields.
    #[serde(rename = "response", default)]
    pub fields: Vec<Field>,
}

impl Operation {
    /// Looks up a parameter by name.
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Looks up a top-level response field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of the parameters the schema marks required, sorted.
    pub fn required_params(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

/// The loaded catalog.
///
/// Operations are sorted by name on load so every consumer sees them in
/// one reproducible order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    operations: Vec<Operation>,
}

#[derive(Deserialize)]
struct CatalogBody {
    #[serde(default)]
    api: Vec<Operation>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Wrapped { listapisresponse: CatalogBody },
    Bare(CatalogBody),
}

impl Catalog {
    /// Builds a catalog from operations, sorting them by name.
    pub fn new(mut operations: Vec<Operation>) -> Self {
        operations.sort_by(|a, b| a.name.cmp(&b.name));
        Self { operations }
    }

    /// Parses `listApis` JSON.
    ///
    /// ## Errors
    ///
    /// Returns [`CatalogError::Json`] if the document is not valid JSON or
    /// does not have the expected shape.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let body = match serde_json::from_str::<CatalogDocument>(json)? {
            CatalogDocument::Wrapped { listapisresponse } => listapisresponse,
            CatalogDocument::Bare(body) => body,
        };
        Ok(Self::new(body.api))
    }

    /// Reads and parses a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Looks up an operation by name.
    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.operations
            .binary_search_by(|op| op.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.operations[i])
    }

    /// All operations, sorted by name.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
