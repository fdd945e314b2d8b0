//! Wire type token → target type resolution.
//!
//! Resolution runs in a fixed priority order:
//!
//! 1. Field coercions (`field_coercions`) force a UUID string
//! 2. (operation, field) shape overrides and map-list entries
//! 3. A closed set of wire tokens with hand-written runtime types
//! 4. Generic token rules
//!
//! Unknown tokens fall through to `String`; mapping never fails.

use stackgen_define::{OverrideTables, ShapeOverride};

/// A response type shipped by the runtime crate rather than generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    OutOfBandManagement,
    HostHa,
    ConsoleEndpointWebsocket,
}

impl BuiltinType {
    /// Type name under the runtime's `types` module.
    pub fn type_name(self) -> &'static str {
        match self {
            BuiltinType::OutOfBandManagement => "OutOfBandManagementResponse",
            BuiltinType::HostHa => "HaForHostResponse",
            BuiltinType::ConsoleEndpointWebsocket => "ConsoleEndpointWebsocketResponse",
        }
    }
}

/// The resolved target type of a parameter or response field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MappedType {
    String,
    Bool,
    Int32,
    Int64,
    Float64,
    /// A string identifier that may arrive as a JSON number.
    Uuid,
    StringList,
    FloatList,
    Int64List,
    StringMap,
    StringMapList,
    /// Opaque JSON.
    Raw,
    /// A generated response type, optionally a sequence of it.
    Entity { name: String, many: bool },
    Builtin(BuiltinType),
}

impl MappedType {
    /// Returns `true` for types passed and returned by value.
    pub fn is_copy(&self) -> bool {
        matches!(
            self,
            MappedType::Bool | MappedType::Int32 | MappedType::Int64 | MappedType::Float64
        )
    }

    pub fn is_string_like(&self) -> bool {
        matches!(self, MappedType::String | MappedType::Uuid)
    }

    /// Returns `true` for the scalar types a lookup helper can take as a
    /// plain argument.
    pub fn is_scalar(&self) -> bool {
        self.is_copy() || self.is_string_like()
    }

    /// Returns `true` if a query string can carry this type.
    pub fn is_encodable(&self) -> bool {
        !matches!(
            self,
            MappedType::Raw | MappedType::Entity { .. } | MappedType::Builtin(_)
        )
    }
}

/// Resolves wire type tokens against one set of override tables.
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper<'a> {
    tables: &'a OverrideTables,
}

impl<'a> TypeMapper<'a> {
    pub fn new(tables: &'a OverrideTables) -> Self {
        Self { tables }
    }

    /// Resolves a response field.
    pub fn map(&self, op: &str, field: &str, wire: &str) -> MappedType {
        self.override_for(op, field, wire)
            .unwrap_or_else(|| Self::generic(wire))
    }

    /// Resolves a request parameter.
    ///
    /// Anything a query string cannot carry degrades to `String`.
    pub fn map_param(&self, op: &str, param: &str, wire: &str) -> MappedType {
        match self.map(op, param, wire) {
            ty if ty.is_encodable() => ty,
            _ => MappedType::String,
        }
    }

    /// Rules 1 to 3. `None` means generic inference (or nested structure)
    /// decides.
    pub fn override_for(&self, op: &str, field: &str, wire: &str) -> Option<MappedType> {
        if self.tables.is_coerced_uuid(field) {
            return Some(MappedType::Uuid);
        }

        if let Some(shape) = self.tables.shape_override(op, field) {
            return Some(match shape {
                ShapeOverride::MapList => MappedType::StringMapList,
                ShapeOverride::Map => MappedType::StringMap,
                ShapeOverride::StringList => MappedType::StringList,
                ShapeOverride::FloatList => MappedType::FloatList,
                ShapeOverride::Int64List => MappedType::Int64List,
                ShapeOverride::Raw => MappedType::Raw,
                ShapeOverride::Entity { name, many } => MappedType::Entity {
                    name: name.clone(),
                    many: *many,
                },
            });
        }

        if self.tables.is_map_list(op, field) {
            return Some(MappedType::StringMapList);
        }

        match wire.to_ascii_lowercase().as_str() {
            "outofbandmanagementresponse" => {
                Some(MappedType::Builtin(BuiltinType::OutOfBandManagement))
            }
            "hostharesponse" => Some(MappedType::Builtin(BuiltinType::HostHa)),
            "consoleendpointwebsocketresponse" => {
                Some(MappedType::Builtin(BuiltinType::ConsoleEndpointWebsocket))
            }
            "uservmresponse" => Some(MappedType::Entity {
                name: "VirtualMachine".to_string(),
                many: true,
            }),
            _ => None,
        }
    }

    /// Rule 4: generic token rules.
    pub fn generic(wire: &str) -> MappedType {
        match wire.to_ascii_lowercase().as_str() {
            "boolean" => MappedType::Bool,
            "short" | "int" | "integer" => MappedType::Int32,
            "long" => MappedType::Int64,
            "float" | "double" => MappedType::Float64,
            "uuid" => MappedType::Uuid,
            "list" | "set" => MappedType::StringList,
            "map" => MappedType::StringMap,
            "responseobject" | "object" => MappedType::Raw,
            _ => MappedType::String,
        }
    }
}
