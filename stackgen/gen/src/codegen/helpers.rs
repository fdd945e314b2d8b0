//! Lookup helpers for list operations.
//!
//! A list operation whose entity exposes `id` and `name`, and whose
//! parameters include a `name` (preferred) or `keyword` filter, gets:
//!
//! - `get_<entity>_id(name, ..)`: the id of the entity with that name
//! - `get_<entity>_by_id(id, ..)`: the entity with that id, when the
//!   operation takes an `id` filter
//! - `get_<entity>_by_name(name, ..)`: both of the above in sequence
//!
//! Every other required parameter, plus the operation's entries in
//! `helper_extra_params`, becomes an extra argument. All helpers take a
//! slice of list options applied after the client's defaults. The arity
//! policy lives in the runtime's `lookup` module.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use stackgen_define::{Operation, OverrideTables};

use super::ident;
use super::params::ParamsDef;
use crate::mapper::MappedType;
use crate::responses::{OperationTypes, ResponseShape, entity_fragment};

/// An extra helper argument.
#[derive(Debug, Clone, PartialEq)]
pub struct HelperArg {
    pub wire: String,
    pub ident: String,
    pub ty: MappedType,
}

/// Everything needed to generate one operation's helpers.
#[derive(Debug, Clone, PartialEq)]
pub struct HelperPlan {
    pub operation: String,
    pub post: bool,
    /// Entity type name, also the `kind` in lookup errors.
    pub entity: String,
    /// Method name fragment: `get_<fragment>_id`.
    pub fragment: String,
    /// List response type.
    pub response: String,
    /// Field holding the entity sequence.
    pub list_field: String,
    /// `name` or `keyword`.
    pub filter: String,
    /// Whether the filter is itself required, so fetching by id needs it.
    pub filter_required: bool,
    /// Sorted by wire name; excludes the filter and `id`.
    pub extra_args: Vec<HelperArg>,
    pub by_id: bool,
    pub recount: bool,
}

/// Decides whether an operation gets helpers, and which.
///
/// Returns `None` when:
/// - the response is not a count + sequence wrapper
/// - the entity lacks a string `id` or `name`
/// - there is no string `name` or `keyword` filter
/// - `id` is a required parameter
/// - an extra argument is not a scalar
pub fn plan_helpers(
    op: &Operation,
    types: &OperationTypes,
    params: &ParamsDef,
    tables: &OverrideTables,
) -> Option<HelperPlan> {
    let ResponseShape::List { entity, field } = &types.shape else {
        return None;
    };

    let entity_def = types.entity_def()?;
    let string_field = |name: &str| entity_def.field(name).is_some_and(|f| f.ty.is_string_like());
    if !string_field("id") || !string_field("name") {
        return None;
    }

    let string_param = |name: &str| params.field(name).filter(|f| f.ty.is_string_like());
    let filter = string_param("name").or_else(|| string_param("keyword"))?;

    if params.field("id").is_some_and(|f| f.required) {
        return None;
    }
    let by_id = string_param("id").is_some();

    let mut extra_args = Vec::new();
    for p in &params.fields {
        let wanted = p.required
            || tables
                .helper_extra_params(&op.name)
                .iter()
                .any(|extra| *extra == p.wire);
        if !wanted || p.wire == filter.wire || p.wire == "id" {
            continue;
        }
        if !p.ty.is_scalar() {
            return None;
        }
        extra_args.push(HelperArg {
            wire: p.wire.clone(),
            ident: p.ident.clone(),
            ty: p.ty.clone(),
        });
    }

    Some(HelperPlan {
        operation: op.name.clone(),
        post: tables.is_forced_post(&op.name),
        entity: entity.clone(),
        fragment: entity_fragment(entity),
        response: types.root.clone(),
        list_field: field.clone(),
        filter: filter.wire.clone(),
        filter_required: filter.required,
        extra_args,
        by_id,
        recount: tables.recounts(&op.name),
    })
}

/// Generates the helper methods for a service impl block.
pub fn generate_helpers(plan: &HelperPlan, rt: &Ident) -> TokenStream {
    let get_id = generate_get_id(plan, rt);
    if !plan.by_id {
        return get_id;
    }
    let get_by_id = generate_get_by_id(plan, rt);
    let get_by_name = generate_get_by_name(plan, rt);

    quote! {
        #get_id
        #get_by_id
        #get_by_name
    }
}

fn arg_type(ty: &MappedType) -> TokenStream {
    match ty {
        MappedType::Bool => quote! { bool },
        MappedType::Int32 => quote! { i32 },
        MappedType::Int64 => quote! { i64 },
        MappedType::Float64 => quote! { f64 },
        _ => quote! { &str },
    }
}

fn set_expr(key: &str, value: &Ident, ty: &MappedType) -> TokenStream {
    match ty {
        MappedType::Bool => quote! { params.set_bool(#key, #value); },
        MappedType::Int32 => quote! { params.set_int(#key, i64::from(#value)); },
        MappedType::Int64 => quote! { params.set_int(#key, #value); },
        MappedType::Float64 => quote! { params.set_float(#key, #value); },
        _ => quote! { params.set(#key, #value); },
    }
}

/// `(declarations, encodings, forwarded names)` of the extra arguments.
fn extra_parts(plan: &HelperPlan) -> (Vec<TokenStream>, Vec<TokenStream>, Vec<Ident>) {
    let mut decls = Vec::new();
    let mut sets = Vec::new();
    let mut names = Vec::new();
    for arg in &plan.extra_args {
        let name = ident(&arg.ident);
        let ty = arg_type(&arg.ty);
        decls.push(quote! { #name: #ty });
        sets.push(set_expr(&arg.wire, &name, &arg.ty));
        names.push(name);
    }
    (decls, sets, names)
}

fn count_expr(plan: &HelperPlan) -> TokenStream {
    let list = ident(&plan.list_field);
    if plan.recount {
        quote! { let count = resp.#list.len() as i64; }
    } else {
        quote! { let count = resp.count; }
    }
}

fn generate_get_id(plan: &HelperPlan, rt: &Ident) -> TokenStream {
    let method = format_ident!("get_{}_id", plan.fragment);
    let command = &plan.operation;
    let post = plan.post;
    let kind = &plan.entity;
    let filter = &plan.filter;
    let response = ident(&plan.response);
    let list = ident(&plan.list_field);
    let (decls, sets, _) = extra_parts(plan);
    let count = count_expr(plan);
    let doc = format!(" Resolves the id of the `{kind}` named `name`.");

    quote! {
        #[doc = #doc]
        pub async fn #method(
            &self,
            name: &str,
            #(#decls,)*
            opts: &[#rt::ListOption],
        ) -> Result<String, #rt::ApiError> {
            let mut params = #rt::QueryParams::new();
            params.set(#filter, name);
            #(#sets)*
            params.apply(self.cs.default_options());
            params.apply(opts);

            let raw = self.cs.request(#command, #post, params).await?;
            let resp: #response = #rt::decode(raw)?;
            #count
            let candidates = resp.#list.iter().map(|e| (e.id.as_str(), e.name.as_str()));
            #rt::lookup::resolve_id(#kind, name, count, candidates).map_err(#rt::ApiError::from)
        }
    }
}

fn generate_get_by_id(plan: &HelperPlan, rt: &Ident) -> TokenStream {
    let method = format_ident!("get_{}_by_id", plan.fragment);
    let command = &plan.operation;
    let post = plan.post;
    let kind = &plan.entity;
    let entity = ident(&plan.entity);
    let response = ident(&plan.response);
    let list = ident(&plan.list_field);
    let (mut decls, mut sets, _) = extra_parts(plan);
    if plan.filter_required {
        let filter = &plan.filter;
        decls.insert(0, quote! { name: &str });
        sets.insert(0, quote! { params.set(#filter, name); });
    }
    let count = count_expr(plan);
    let doc = format!(" Fetches the `{kind}` with the given id.");

    quote! {
        #[doc = #doc]
        pub async fn #method(
            &self,
            id: &str,
            #(#decls,)*
            opts: &[#rt::ListOption],
        ) -> Result<#entity, #rt::ApiError> {
            let mut params = #rt::QueryParams::new();
            params.set("id", id);
            #(#sets)*
            params.apply(self.cs.default_options());
            params.apply(opts);

            let raw = match self.cs.request(#command, #post, params).await {
                Ok(raw) => raw,
                Err(err) => return Err(#rt::lookup::translate_invalid_id(err, #kind, id)),
            };
            let resp: #response = #rt::decode(raw)?;
            #count
            #rt::lookup::single_by_id(#kind, id, count, resp.#list).map_err(#rt::ApiError::from)
        }
    }
}

fn generate_get_by_name(plan: &HelperPlan, rt: &Ident) -> TokenStream {
    let method = format_ident!("get_{}_by_name", plan.fragment);
    let get_id = format_ident!("get_{}_id", plan.fragment);
    let get_by_id = format_ident!("get_{}_by_id", plan.fragment);
    let kind = &plan.entity;
    let entity = ident(&plan.entity);
    let (decls, _, names) = extra_parts(plan);
    let forwarded_name = if plan.filter_required {
        quote! { name, }
    } else {
        quote! {}
    };
    let doc = format!(" Fetches the `{kind}` named `name`.");

    quote! {
        #[doc = #doc]
        pub async fn #method(
            &self,
            name: &str,
            #(#decls,)*
            opts: &[#rt::ListOption],
        ) -> Result<#entity, #rt::ApiError> {
            let id = self.#get_id(name, #(#names,)* opts).await?;
            self.#get_by_id(&id, #forwarded_name #(#names,)* opts).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::params::build_params;
    use crate::responses::ResponseTypeBuilder;
    use crate::test_utils::{
        format_generated_code, make_field, make_list_zones, make_op, make_param,
    };

    fn plan_for(op: &Operation, tables: &OverrideTables) -> Option<HelperPlan> {
        let types = ResponseTypeBuilder::new(tables).build(op);
        let params = build_params(op, tables);
        plan_helpers(op, &types, &params, tables)
    }

    fn render(plan: &HelperPlan) -> String {
        let tokens = generate_helpers(plan, &ident("stackgen"));
        format_generated_code(&quote! { impl ZoneService<'_> { #tokens } }).unwrap()
    }

    #[test]
    fn list_zones_gets_all_helpers() {
        let tables = OverrideTables::new();
        let plan = plan_for(&make_list_zones(), &tables).unwrap();
        assert_eq!(plan.entity, "Zone");
        assert_eq!(plan.filter, "name");
        assert!(plan.by_id);
        assert!(plan.extra_args.is_empty());

        let code = render(&plan);
        assert!(code.contains("pub async fn get_zone_id("));
        assert!(code.contains("pub async fn get_zone_by_id("));
        assert!(code.contains("pub async fn get_zone_by_name("));
        assert!(code.contains("stackgen::lookup::resolve_id(\"Zone\", name, count, candidates)"));
        assert!(code.contains("stackgen::lookup::translate_invalid_id(err, \"Zone\", id)"));
        assert!(code.contains("let count = resp.count;"));
        assert!(code.contains("params.apply(self.cs.default_options());"));
        assert!(code.contains("params.apply(opts);"));
    }

    #[test]
    fn keyword_filter_fallback() {
        let op = make_op(
            "listRouters",
            false,
            vec![make_param("keyword", "string", false)],
            vec![make_field("id", "string"), make_field("name", "string")],
        );
        let plan = plan_for(&op, &OverrideTables::new()).unwrap();
        assert_eq!(plan.filter, "keyword");
        assert!(!plan.by_id);
        let code = render(&plan);
        assert!(code.contains("params.set(\"keyword\", name);"));
        assert!(!code.contains("get_router_by_id"));
    }

    #[test]
    fn required_id_skips_helpers() {
        let op = make_op(
            "listZoneThings",
            false,
            vec![make_param("id", "uuid", true), make_param("name", "string", false)],
            vec![make_field("id", "string"), make_field("name", "string")],
        );
        assert!(plan_for(&op, &OverrideTables::new()).is_none());
    }

    #[test]
    fn entity_without_name_skips_helpers() {
        let op = make_op(
            "listEvents",
            false,
            vec![make_param("keyword", "string", false)],
            vec![make_field("id", "string"), make_field("description", "string")],
        );
        assert!(plan_for(&op, &OverrideTables::new()).is_none());
    }

    #[test]
    fn required_and_extra_params_become_arguments() {
        let op = make_op(
            "listTemplates",
            false,
            vec![
                make_param("id", "uuid", false),
                make_param("name", "string", false),
                make_param("templatefilter", "string", true),
                make_param("zoneid", "uuid", false),
                make_param("showremoved", "boolean", false),
            ],
            vec![make_field("id", "string"), make_field("name", "string")],
        );
        let mut tables = OverrideTables::new();
        tables
            .helper_extra_params
            .insert("listTemplates".to_string(), vec!["zoneid".to_string()]);
        let plan = plan_for(&op, &tables).unwrap();
        let args: Vec<_> = plan.extra_args.iter().map(|a| a.wire.as_str()).collect();
        assert_eq!(args, vec!["templatefilter", "zoneid"]);

        let code = render(&plan);
        assert!(code.contains("templatefilter: &str,"));
        assert!(code.contains("params.set(\"zoneid\", zoneid);"));
        assert!(code.contains("self.get_template_id(name, templatefilter, zoneid, opts)"));
    }

    #[test]
    fn recount_uses_returned_length() {
        let op = make_op(
            "listProjects",
            false,
            vec![make_param("id", "uuid", false), make_param("name", "string", false)],
            vec![make_field("id", "string"), make_field("name", "string")],
        );
        let mut tables = OverrideTables::new();
        tables.recount_entities.insert("listProjects".to_string());
        let plan = plan_for(&op, &tables).unwrap();
        assert!(plan.recount);
        let code = render(&plan);
        assert!(code.contains("let count = resp.projects.len() as i64;"));
        assert!(!code.contains("let count = resp.count;"));
    }
}
