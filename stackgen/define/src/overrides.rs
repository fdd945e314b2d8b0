//! Override tables: enumerable exceptions to the generic generation rules.
//!
//! Every table is consulted before generic inference; generic inference
//! never overrides an entry. Adding an exception means adding data here,
//! never adding a rule to the generator.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Bucket indexing convention of a map parameter.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum MapIndexing {
    /// One bucket per entry, `name[0]`, `name[1]`, ...
    #[default]
    Sequential,
    /// Every entry in bucket zero: `name[0].<key>=<value>`.
    ZeroCollapsed,
}

/// Bucket layout of a map parameter.
///
/// Each layout names the two sub-keys one bucket carries.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum MapRoleKind {
    /// `.key` / `.value`
    #[default]
    KeyValue,
    /// `.key` / `.value`, tags
    Tags,
    /// `.account` / `.group`
    AccountGroup,
    /// `.service` / `.provider`
    ServiceProvider,
    /// `.nic` / `.network`
    NicNetwork,
    /// `.nic` / `.ip`
    NicIp,
    /// `.disk` / `.diskOffering`
    DiskOffering,
}

/// Container shape forced onto an (operation, field) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeOverride {
    /// A list of string → string maps.
    MapList,
    /// A single string → string map.
    Map,
    /// A list of strings.
    StringList,
    /// A list of 64-bit floats.
    FloatList,
    /// A list of 64-bit integers.
    Int64List,
    /// Opaque JSON.
    Raw,
    /// A named generated entity type, optionally a sequence of it.
    Entity { name: String, many: bool },
}

/// How a custom list wrapper holds its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WrapperShape {
    /// `count` plus a sequence of entities.
    Sequence,
    /// A single nested object, no count.
    Object,
    /// A scalar payload of the given wire type token, no count.
    Scalar(String),
}

/// A hand-specified response wrapper for an irregular enumeration response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapperOverride {
    /// JSON key the payload sits under.
    pub payload_key: String,
    /// Name of the payload entity type. `None` keeps the derived singular.
    pub type_name: Option<String>,
    pub shape: WrapperShape,
}

impl WrapperOverride {
    /// A sequence under an irregular key.
    pub fn sequence(payload_key: &str, type_name: &str) -> Self {
        Self {
            payload_key: payload_key.to_string(),
            type_name: Some(type_name.to_string()),
            shape: WrapperShape::Sequence,
        }
    }

    /// A single nested object.
    pub fn object(payload_key: &str, type_name: &str) -> Self {
        Self {
            payload_key: payload_key.to_string(),
            type_name: Some(type_name.to_string()),
            shape: WrapperShape::Object,
        }
    }

    /// A scalar value.
    pub fn scalar(payload_key: &str, wire_type: &str) -> Self {
        Self {
            payload_key: payload_key.to_string(),
            type_name: None,
            shape: WrapperShape::Scalar(wire_type.to_string()),
        }
    }
}

/// Every override table consulted during one generation run.
///
/// Keys are operation names as they appear in the catalog, and field or
/// parameter names as they appear on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTables {
    /// Operation → parameters that are required even though the schema
    /// says optional.
    pub forced_required: BTreeMap<String, BTreeSet<String>>,
    /// (operation, parameter) → bucket indexing of a map parameter.
    pub index_modes: BTreeMap<(String, String), MapIndexing>,
    /// Map parameter name → bucket layout. Absent names use
    /// [`MapRoleKind::KeyValue`].
    pub map_roles: BTreeMap<String, MapRoleKind>,
    /// Operations whose tag maps omit empty values.
    pub drop_empty_tag_values: BTreeSet<String>,
    /// Operations always sent with POST.
    pub force_post: BTreeSet<String>,
    /// Operation → extra key the payload is nested under.
    pub nesting_keys: BTreeMap<String, String>,
    /// Field names decoded as UUIDs whatever their declared type.
    pub field_coercions: BTreeSet<String>,
    /// Operation → root response type name.
    pub custom_response_names: BTreeMap<String, String>,
    /// (operation, field) → forced container shape.
    pub shape_overrides: BTreeMap<(String, String), ShapeOverride>,
    /// Operation → `map` parameters that are really lists of maps.
    pub map_lists: BTreeMap<String, BTreeSet<String>>,
    /// Operation → hand-specified list wrapper.
    pub custom_wrappers: BTreeMap<String, WrapperOverride>,
    /// Operations wrapped like `list*` operations despite their name.
    pub list_exceptions: BTreeSet<String>,
    /// Operation → parameters every lookup helper exposes.
    pub helper_extra_params: BTreeMap<String, Vec<String>>,
    /// Operations whose declared `count` is unreliable.
    pub recount_entities: BTreeSet<String>,
}

impl OverrideTables {
    /// Empty tables: every decision falls through to generic inference.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters forced required for an operation.
    pub fn forced_required(&self, op: &str) -> impl Iterator<Item = &str> {
        self.forced_required
            .get(op)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    pub fn index_mode(&self, op: &str, param: &str) -> MapIndexing {
        self.index_modes
            .get(&(op.to_string(), param.to_string()))
            .copied()
            .unwrap_or_default()
    }

    pub fn map_role(&self, param: &str) -> MapRoleKind {
        self.map_roles.get(param).copied().unwrap_or_default()
    }

    pub fn drops_empty_tag_values(&self, op: &str) -> bool {
        self.drop_empty_tag_values.contains(op)
    }

    pub fn is_forced_post(&self, op: &str) -> bool {
        self.force_post.contains(op)
    }

    pub fn nesting_key(&self, op: &str) -> Option<&str> {
        self.nesting_keys.get(op).map(String::as_str)
    }

    pub fn is_coerced_uuid(&self, field: &str) -> bool {
        self.field_coercions.contains(field)
    }

    pub fn custom_response_name(&self, op: &str) -> Option<&str> {
        self.custom_response_names.get(op).map(String::as_str)
    }

    pub fn shape_override(&self, op: &str, field: &str) -> Option<&ShapeOverride> {
        self.shape_overrides.get(&(op.to_string(), field.to_string()))
    }

    pub fn is_map_list(&self, op: &str, param: &str) -> bool {
        self.map_lists
            .get(op)
            .is_some_and(|fields| fields.contains(param))
    }

    pub fn custom_wrapper(&self, op: &str) -> Option<&WrapperOverride> {
        self.custom_wrappers.get(op)
    }

    /// Returns `true` if the operation gets a count + sequence wrapper.
    pub fn is_list_operation(&self, op: &str) -> bool {
        op.starts_with("list") || self.list_exceptions.contains(op)
    }

    pub fn helper_extra_params(&self, op: &str) -> &[String] {
        self.helper_extra_params
            .get(op)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn recounts(&self, op: &str) -> bool {
        self.recount_entities.contains(op)
    }

    /// Builder-style insert into [`forced_required`](Self::forced_required).
    pub fn with_forced_required(mut self, op: &str, params: &[&str]) -> Self {
        self.forced_required
            .entry(op.to_string())
            .or_default()
            .extend(params.iter().map(|p| p.to_string()));
        self
    }

    /// Builder-style insert into [`index_modes`](Self::index_modes).
    pub fn with_index_mode(mut self, op: &str, param: &str, mode: MapIndexing) -> Self {
        self.index_modes
            .insert((op.to_string(), param.to_string()), mode);
        self
    }

    /// Builder-style insert into [`shape_overrides`](Self::shape_overrides).
    pub fn with_shape(mut self, op: &str, field: &str, shape: ShapeOverride) -> Self {
        self.shape_overrides
            .insert((op.to_string(), field.to_string()), shape);
        self
    }

    /// Builder-style insert into [`map_lists`](Self::map_lists).
    pub fn with_map_list(mut self, op: &str, param: &str) -> Self {
        self.map_lists
            .entry(op.to_string())
            .or_default()
            .insert(param.to_string());
        self
    }

    /// Builder-style insert into [`custom_wrappers`](Self::custom_wrappers).
    pub fn with_wrapper(mut self, op: &str, wrapper: WrapperOverride) -> Self {
        self.custom_wrappers.insert(op.to_string(), wrapper);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_empty_tables_fall_through() {
        let tables = OverrideTables::new();
        assert_eq!(tables.index_mode("updateZone", "details"), MapIndexing::Sequential);
        assert_eq!(tables.map_role("details"), MapRoleKind::KeyValue);
        assert!(tables.shape_override("listZones", "tags").is_none());
        assert!(tables.helper_extra_params("listIsos").is_empty());
        assert_eq!(tables.forced_required("createTags").count(), 0);
    }

    #[test]
    fn test_list_operation_detection() {
        let mut tables = OverrideTables::new();
        tables.list_exceptions.insert("registerTemplate".into());
        assert!(tables.is_list_operation("listZones"));
        assert!(tables.is_list_operation("registerTemplate"));
        assert!(!tables.is_list_operation("createZone"));
    }

    #[test]
    fn test_builder_inserts() {
        let tables = OverrideTables::new()
            .with_forced_required("createTags", &["tags"])
            .with_index_mode("updateZone", "details", MapIndexing::ZeroCollapsed)
            .with_map_list("deployVirtualMachine", "iptonetworklist")
            .with_shape(
                "listVirtualMachines",
                "details",
                ShapeOverride::Map,
            );

        assert_eq!(tables.forced_required("createTags").collect::<Vec<_>>(), ["tags"]);
        assert_eq!(
            tables.index_mode("updateZone", "details"),
            MapIndexing::ZeroCollapsed
        );
        assert!(tables.is_map_list("deployVirtualMachine", "iptonetworklist"));
        assert!(!tables.is_map_list("deployVirtualMachine", "details"));
        assert_eq!(
            tables.shape_override("listVirtualMachines", "details"),
            Some(&ShapeOverride::Map)
        );
    }

    #[test]
    fn test_enum_strings() {
        assert_eq!(MapIndexing::ZeroCollapsed.to_string(), "zero_collapsed");
        assert_eq!(MapRoleKind::iter().count(), 7);
    }
}
