//! Per-operation parameter builders.
//!
//! Each operation gets an `<Op>Params` struct with one optional field per
//! catalog parameter, a `new` constructor taking exactly the required
//! parameters, `set_*` / `get_*` / `reset_*` accessors, `add_*` for
//! list-of-map parameters, and `to_query()` producing the runtime's
//! `QueryParams`.
//!
//! ## Example Output
//!
//! ```ignore
//! #[derive(Debug, Clone, Default, PartialEq)]
//! pub struct ListZonesParams {
//!     available: Option<bool>,
//!     name: Option<String>,
//! }
//!
//! impl ListZonesParams {
//!     pub fn new() -> Self {
//!         Self::default()
//!     }
//!
//!     pub fn set_name(&mut self, value: impl Into<String>) -> &mut Self {
//!         self.name = Some(value.into());
//!         self
//!     }
//!
//!     pub fn to_query(&self) -> stackgen::QueryParams {
//!         let mut params = stackgen::QueryParams::new();
//!         if let Some(value) = &self.name {
//!             params.set("name", value.as_str());
//!         }
//!         params
//!     }
//! }
//! ```

use std::collections::BTreeSet;

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use stackgen_define::{MapIndexing, MapRoleKind, Operation, OverrideTables};
use tracing::warn;

use super::{doc_attrs, ident, value_type};
use crate::mapper::{MappedType, TypeMapper};
use crate::naming::{field_ident, ident_fragment, type_name};

/// One parameter of a builder.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamField {
    /// Name on the wire.
    pub wire: String,
    /// Struct field and argument identifier.
    pub ident: String,
    /// Accessor suffix: `set_<method>`.
    pub method: String,
    pub ty: MappedType,
    pub required: bool,
    pub doc: String,
    /// Bucket layout for map parameters.
    pub role: MapRoleKind,
    pub indexing: MapIndexing,
    /// Drop empty tag values when encoding.
    pub drop_empty: bool,
}

/// The resolved builder of one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamsDef {
    pub name: String,
    pub operation: String,
    /// Sorted by wire name.
    pub fields: Vec<ParamField>,
}

impl ParamsDef {
    pub fn field(&self, wire: &str) -> Option<&ParamField> {
        self.fields.iter().find(|f| f.wire == wire)
    }

    /// Constructor parameters, sorted by wire name.
    pub fn required(&self) -> impl Iterator<Item = &ParamField> {
        self.fields.iter().filter(|f| f.required)
    }
}

/// Resolves an operation's parameters against the override tables.
///
/// Required parameters are the schema's required set plus the
/// operation's forced-required entries. Forced entries naming a parameter
/// the operation does not have are ignored with a warning.
pub fn build_params(op: &Operation, tables: &OverrideTables) -> ParamsDef {
    let mapper = TypeMapper::new(tables);

    let mut required: BTreeSet<&str> = op.required_params().into_iter().collect();
    for forced in tables.forced_required(&op.name) {
        if op.param(forced).is_some() {
            required.insert(forced);
        } else {
            warn!(operation = %op.name, param = forced, "forced-required parameter not in catalog");
        }
    }

    let mut params: Vec<_> = op.params.iter().collect();
    params.sort_by(|a, b| a.name.cmp(&b.name));
    params.dedup_by(|a, b| a.name == b.name);

    let mut seen_ident = BTreeSet::new();
    let fields = params
        .into_iter()
        .map(|p| {
            let base = field_ident(&p.name);
            let mut ident = base.clone();
            let mut marker = 2;
            while !seen_ident.insert(ident.clone()) {
                ident = format!("{base}{marker}");
                marker += 1;
            }
            let method = if ident == base {
                ident_fragment(&p.name)
            } else {
                ident.clone()
            };

            let ty = mapper.map_param(&op.name, &p.name, &p.wire_type);
            let role = tables.map_role(&p.name);
            ParamField {
                wire: p.name.clone(),
                ident,
                method,
                required: required.contains(p.name.as_str()),
                doc: p.description.clone(),
                drop_empty: role == MapRoleKind::Tags && tables.drops_empty_tag_values(&op.name),
                indexing: tables.index_mode(&op.name, &p.name),
                role,
                ty,
            }
        })
        .collect();

    ParamsDef {
        name: format!("{}Params", type_name(&op.name)),
        operation: op.name.clone(),
        fields,
    }
}

/// Generates the builder struct and its impl.
pub fn generate_params(def: &ParamsDef, rt: &Ident) -> TokenStream {
    let name = ident(&def.name);
    let doc = format!(" Parameters for `{}`.", def.operation);

    let fields = def.fields.iter().map(|f| {
        let field = ident(&f.ident);
        let ty = value_type(&f.ty);
        quote! { #field: Option<#ty> }
    });

    let constructor = generate_new(def);
    let accessors = def.fields.iter().map(generate_accessors);
    let to_query = generate_to_query(def, rt);

    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct #name {
            #(#fields),*
        }

        impl #name {
            #constructor

            #(#accessors)*

            #to_query
        }
    }
}

/// Argument type taken by `new` and `set_*`.
fn argument_type(ty: &MappedType) -> TokenStream {
    if ty.is_string_like() {
        quote! { impl Into<String> }
    } else {
        value_type(ty)
    }
}

/// Expression converting an argument named `value` into the stored value.
fn store_expr(ty: &MappedType, value: &Ident) -> TokenStream {
    if ty.is_string_like() {
        quote! { #value.into() }
    } else {
        quote! { #value }
    }
}

fn generate_new(def: &ParamsDef) -> TokenStream {
    let required: Vec<&ParamField> = def.required().collect();
    if required.is_empty() {
        return quote! {
            pub fn new() -> Self {
                Self::default()
            }
        };
    }

    let args = required.iter().map(|f| {
        let arg = ident(&f.ident);
        let ty = argument_type(&f.ty);
        quote! { #arg: #ty }
    });
    let inits = required.iter().map(|f| {
        let field = ident(&f.ident);
        let value = store_expr(&f.ty, &field);
        quote! { #field: Some(#value) }
    });
    let all_required = required.len() == def.fields.len();
    let rest = if all_required {
        quote! {}
    } else {
        quote! { ..Default::default() }
    };

    quote! {
        pub fn new(#(#args),*) -> Self {
            Self {
                #(#inits,)*
                #rest
            }
        }
    }
}

fn generate_accessors(f: &ParamField) -> TokenStream {
    let field = ident(&f.ident);
    let set = format_ident!("set_{}", f.method);
    let get = format_ident!("get_{}", f.method);
    let reset = format_ident!("reset_{}", f.method);
    let doc = doc_attrs(&f.doc);

    let value = ident("value");
    let arg_ty = argument_type(&f.ty);
    let stored = store_expr(&f.ty, &value);

    let (get_ty, get_body) = match &f.ty {
        ty if ty.is_string_like() => (quote! { Option<&str> }, quote! { self.#field.as_deref() }),
        ty if ty.is_copy() => {
            let ty = value_type(ty);
            (quote! { Option<#ty> }, quote! { self.#field })
        }
        MappedType::StringList => (quote! { Option<&[String]> }, quote! { self.#field.as_deref() }),
        MappedType::FloatList => (quote! { Option<&[f64]> }, quote! { self.#field.as_deref() }),
        MappedType::Int64List => (quote! { Option<&[i64]> }, quote! { self.#field.as_deref() }),
        MappedType::StringMapList => (
            quote! { Option<&[std::collections::BTreeMap<String, String>]> },
            quote! { self.#field.as_deref() },
        ),
        other => {
            let ty = value_type(other);
            (quote! { Option<&#ty> }, quote! { self.#field.as_ref() })
        }
    };

    let add = if f.ty == MappedType::StringMapList {
        let add = format_ident!("add_{}", f.method);
        quote! {
            /// Appends one entry, keeping the ones already set.
            pub fn #add(&mut self, item: std::collections::BTreeMap<String, String>) -> &mut Self {
                self.#field.get_or_insert_with(Vec::new).push(item);
                self
            }
        }
    } else {
        quote! {}
    };

    quote! {
        #doc
        pub fn #set(&mut self, #value: #arg_ty) -> &mut Self {
            self.#field = Some(#stored);
            self
        }

        pub fn #get(&self) -> #get_ty {
            #get_body
        }

        pub fn #reset(&mut self) {
            self.#field = None;
        }

        #add
    }
}

fn generate_to_query(def: &ParamsDef, rt: &Ident) -> TokenStream {
    let sets = def.fields.iter().map(|f| {
        let field = ident(&f.ident);
        let key = &f.wire;
        match &f.ty {
            ty if ty.is_string_like() => quote! {
                if let Some(value) = &self.#field {
                    params.set(#key, value.as_str());
                }
            },
            MappedType::Bool => quote! {
                if let Some(value) = self.#field {
                    params.set_bool(#key, value);
                }
            },
            MappedType::Int32 => quote! {
                if let Some(value) = self.#field {
                    params.set_int(#key, i64::from(value));
                }
            },
            MappedType::Int64 => quote! {
                if let Some(value) = self.#field {
                    params.set_int(#key, value);
                }
            },
            MappedType::Float64 => quote! {
                if let Some(value) = self.#field {
                    params.set_float(#key, value);
                }
            },
            MappedType::StringMap => {
                let role = map_role_tokens(f.role, f.drop_empty, rt);
                let mode = match f.indexing {
                    MapIndexing::Sequential => quote! { #rt::IndexMode::Sequential },
                    MapIndexing::ZeroCollapsed => quote! { #rt::IndexMode::ZeroCollapsed },
                };
                quote! {
                    if let Some(value) = &self.#field {
                        params.set_map(#key, value, #role, #mode);
                    }
                }
            }
            MappedType::StringMapList => quote! {
                if let Some(value) = &self.#field {
                    params.set_map_list(#key, value);
                }
            },
            _ => quote! {
                if let Some(value) = &self.#field {
                    params.set_list(#key, value);
                }
            },
        }
    });

    let params_mut = if def.fields.is_empty() {
        quote! { let params = #rt::QueryParams::new(); }
    } else {
        quote! { let mut params = #rt::QueryParams::new(); }
    };

    quote! {
        /// Encodes the set parameters as query parameters.
        pub fn to_query(&self) -> #rt::QueryParams {
            #params_mut
            #(#sets)*
            params
        }
    }
}

fn map_role_tokens(role: MapRoleKind, drop_empty: bool, rt: &Ident) -> TokenStream {
    match role {
        MapRoleKind::KeyValue => quote! { #rt::MapRole::KeyValue },
        MapRoleKind::Tags => quote! { #rt::MapRole::Tags { drop_empty_values: #drop_empty } },
        MapRoleKind::AccountGroup => quote! { #rt::MapRole::AccountGroup },
        MapRoleKind::ServiceProvider => quote! { #rt::MapRole::ServiceProvider },
        MapRoleKind::NicNetwork => quote! { #rt::MapRole::NicNetwork },
        MapRoleKind::NicIp => quote! { #rt::MapRole::NicIp },
        MapRoleKind::DiskOffering => quote! { #rt::MapRole::DiskOffering },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{format_generated_code, make_deploy_vm, make_list_zones, make_op, make_param};

    fn rt() -> Ident {
        ident("stackgen")
    }

    fn deploy_tables() -> OverrideTables {
        OverrideTables::new()
            .with_index_mode("deployVirtualMachine", "details", MapIndexing::ZeroCollapsed)
            .with_map_list("deployVirtualMachine", "iptonetworklist")
    }

    #[test]
    fn constructor_takes_exactly_required() {
        let def = build_params(&make_deploy_vm(), &OverrideTables::new());
        let required: Vec<_> = def.required().map(|f| f.wire.as_str()).collect();
        assert_eq!(required, vec!["serviceofferingid", "templateid", "zoneid"]);

        let code = format_generated_code(&generate_params(&def, &rt())).unwrap();
        assert!(code.contains("pub fn new("));
        assert!(code.contains("serviceofferingid: impl Into<String>,"));
        assert!(code.contains("templateid: impl Into<String>,"));
        assert!(code.contains("serviceofferingid: Some(serviceofferingid.into())"));
        assert!(!code.contains("size: Some(size)"));
        assert!(code.contains("..Default::default()"));
    }

    #[test]
    fn forced_required_joins_constructor() {
        let op = make_op(
            "updateAccount",
            false,
            vec![
                make_param("id", "uuid", true),
                make_param("newname", "string", false),
                make_param("networkdomain", "string", false),
            ],
            vec![],
        );
        let tables = OverrideTables::new().with_forced_required("updateAccount", &["newname", "bogus"]);
        let def = build_params(&op, &tables);
        let required: Vec<_> = def.required().map(|f| f.wire.as_str()).collect();
        assert_eq!(required, vec!["id", "newname"]);
    }

    #[test]
    fn no_required_params() {
        let def = build_params(&make_list_zones(), &OverrideTables::new());
        let code = format_generated_code(&generate_params(&def, &rt())).unwrap();
        assert!(code.contains("pub fn new() -> Self"));
        assert!(code.contains("Self::default()"));
        assert!(code.contains("pub struct ListZonesParams"));
    }

    #[test]
    fn accessors_per_field() {
        let def = build_params(&make_list_zones(), &OverrideTables::new());
        let code = format_generated_code(&generate_params(&def, &rt())).unwrap();
        assert!(code.contains("pub fn set_name(&mut self, value: impl Into<String>) -> &mut Self"));
        assert!(code.contains("pub fn get_name(&self) -> Option<&str>"));
        assert!(code.contains("pub fn reset_name(&mut self)"));
        assert!(code.contains("pub fn set_available(&mut self, value: bool) -> &mut Self"));
        assert!(code.contains("pub fn get_available(&self) -> Option<bool>"));
    }

    #[test]
    fn map_encoding_modes() {
        let def = build_params(&make_deploy_vm(), &deploy_tables());
        let code = format_generated_code(&generate_params(&def, &rt())).unwrap();
        assert!(code.contains("params.set_map("));
        assert!(code.contains("stackgen::MapRole::KeyValue"));
        assert!(code.contains("stackgen::IndexMode::ZeroCollapsed"));
        assert!(code.contains("params.set_map_list(\"iptonetworklist\", value)"));
        assert!(code.contains("pub fn add_iptonetworklist("));
        assert!(code.contains("params.set_list(\"securitygroupids\", value)"));
        assert!(code.contains("params.set_int(\"size\", value)"));
    }

    #[test]
    fn delete_tags_drops_empty_values() {
        let op = make_op(
            "deleteTags",
            true,
            vec![make_param("tags", "map", false), make_param("resourceids", "list", true)],
            vec![],
        );
        let mut tables = OverrideTables::new();
        tables.map_roles.insert("tags".to_string(), MapRoleKind::Tags);
        tables.drop_empty_tag_values.insert("deleteTags".to_string());
        let def = build_params(&op, &tables);
        let code = format_generated_code(&generate_params(&def, &rt())).unwrap();
        assert!(code.contains("stackgen::MapRole::Tags"));
        assert!(code.contains("drop_empty_values: true"));
    }

    #[test]
    fn keyword_params() {
        let op = make_op("createZone", false, vec![make_param("type", "string", true)], vec![]);
        let def = build_params(&op, &OverrideTables::new());
        let code = format_generated_code(&generate_params(&def, &rt())).unwrap();
        assert!(code.contains("type_: Option<String>"));
        assert!(code.contains("pub fn set_type("));
        assert!(code.contains("pub fn new(type_: impl Into<String>) -> Self"));
        assert!(code.contains("params.set(\"type\", value.as_str())"));
    }
}
