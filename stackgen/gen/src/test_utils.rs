//! Shared test utilities for stackgen-gen tests.
//!
//! Fixture builders for catalog operations plus the format helpers the
//! codegen tests assert against.

use proc_macro2::TokenStream;
use stackgen_define::{Field, Operation, Param};

/// Creates a parameter.
pub fn make_param(name: &str, wire_type: &str, required: bool) -> Param {
    Param {
        name: name.to_string(),
        wire_type: wire_type.to_string(),
        required,
        description: format!("the {name}"),
    }
}

/// Creates a flat response field.
pub fn make_field(name: &str, wire_type: &str) -> Field {
    Field {
        name: name.to_string(),
        wire_type: wire_type.to_string(),
        description: String::new(),
        fields: vec![],
    }
}

/// Creates a response field with nested fields.
pub fn make_nested(name: &str, wire_type: &str, fields: Vec<Field>) -> Field {
    Field {
        fields,
        ..make_field(name, wire_type)
    }
}

/// Creates an operation.
pub fn make_op(name: &str, is_async: bool, params: Vec<Param>, fields: Vec<Field>) -> Operation {
    Operation {
        name: name.to_string(),
        description: format!("{name} description"),
        is_async,
        params,
        fields,
    }
}

/// `listZones` with `id`/`name`/`keyword` filters and an `id`/`name` entity.
pub fn make_list_zones() -> Operation {
    make_op(
        "listZones",
        false,
        vec![
            make_param("id", "uuid", false),
            make_param("keyword", "string", false),
            make_param("name", "string", false),
            make_param("available", "boolean", false),
        ],
        vec![
            make_field("id", "string"),
            make_field("name", "string"),
            make_nested(
                "tags",
                "set",
                vec![make_field("key", "string"), make_field("value", "string")],
            ),
        ],
    )
}

/// `deployVirtualMachine`: async, required params, maps.
pub fn make_deploy_vm() -> Operation {
    make_op(
        "deployVirtualMachine",
        true,
        vec![
            make_param("zoneid", "uuid", true),
            make_param("templateid", "uuid", true),
            make_param("serviceofferingid", "uuid", true),
            make_param("details", "map", false),
            make_param("iptonetworklist", "map", false),
            make_param("size", "long", false),
            make_param("startvm", "boolean", false),
            make_param("securitygroupids", "list", false),
        ],
        vec![make_field("id", "string"), make_field("name", "string")],
    )
}

/// Validates that generated code is syntactically correct.
///
/// ## Errors
///
/// Returns an error string if the generated code fails to parse.
pub fn validate_generated_code(tokens: &TokenStream) -> Result<(), String> {
    syn::parse2::<syn::File>(tokens.clone()).map_err(|e| e.to_string())?;
    Ok(())
}

/// Formats generated code using prettyplease.
///
/// ## Errors
///
/// Returns an error string if the code fails to parse.
pub fn format_generated_code(tokens: &TokenStream) -> Result<String, String> {
    let file = syn::parse2::<syn::File>(tokens.clone()).map_err(|e| e.to_string())?;
    Ok(prettyplease::unparse(&file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_list_zones_has_filters() {
        let op = make_list_zones();
        assert!(op.param("name").is_some());
        assert!(op.param("id").is_some());
        assert!(op.required_params().is_empty());
    }

    #[test]
    fn make_deploy_vm_is_async() {
        let op = make_deploy_vm();
        assert!(op.is_async);
        assert_eq!(
            op.required_params(),
            vec!["serviceofferingid", "templateid", "zoneid"]
        );
    }
}
