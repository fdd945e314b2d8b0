//! Service structs and call methods.
//!
//! Each service module holds the params builders of its operations and a
//! borrowed `<Name>Service<'a>` handle with one async method per operation:
//!
//! ```ignore
//! pub async fn list_zones(&self, p: &ListZonesParams) -> Result<ListZonesResponse, stackgen::ApiError> {
//!     let raw = self.cs.request("listZones", false, p.to_query()).await?;
//!     stackgen::decode(raw)
//! }
//! ```
//!
//! Asynchronous operations finish through the client's job poller instead
//! of decoding directly.

use std::collections::BTreeSet;

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use stackgen_define::{Operation, OverrideTables};

use super::{doc_attrs, ident};
use super::params::ParamsDef;
use crate::naming::{field_ident, to_pascal_case, to_snake_case};
use crate::responses::OperationTypes;

/// Names derived for one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDef {
    /// Name as written in the layout, e.g. `APIDiscovery`.
    pub name: String,
    /// `api_discovery`
    pub module: String,
    /// `ApiDiscoveryService`
    pub struct_name: String,
}

impl ServiceDef {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            module: to_snake_case(name),
            struct_name: format!("{}Service", to_pascal_case(name)),
        }
    }
}

/// Everything generated for one operation inside its service module.
#[derive(Debug, Clone)]
pub struct OperationCode {
    pub operation: String,
    /// The params builder, at module level.
    pub items: TokenStream,
    /// Call method and helpers, inside the service impl.
    pub methods: TokenStream,
    /// Response types the methods name.
    pub imports: BTreeSet<String>,
}

/// Generates the call method of one operation.
pub fn generate_call_method(
    op: &Operation,
    types: &OperationTypes,
    params: &ParamsDef,
    tables: &OverrideTables,
    rt: &Ident,
) -> TokenStream {
    let method = format_ident!("{}", field_ident(&op.name));
    let params_ty = ident(&params.name);
    let response = ident(&types.root);
    let command = &op.name;
    let post = tables.is_forced_post(&op.name);
    let doc = doc_attrs(&op.description);

    let finish = if op.is_async {
        let unwrap_result = !types.root_def().has_field("success");
        quote! { self.cs.finish_async(raw, #unwrap_result).await }
    } else {
        let nested = tables.nesting_key(&op.name).map(|key| {
            quote! { let raw = #rt::envelope::nested(raw, #key)?; }
        });
        quote! {
            #nested
            #rt::decode(raw)
        }
    };

    quote! {
        #doc
        pub async fn #method(&self, p: &#params_ty) -> Result<#response, #rt::ApiError> {
            let raw = self.cs.request(#command, #post, p.to_query()).await?;
            #finish
        }
    }
}

/// Generates a complete service module.
///
/// `docs` are the module's inner doc attributes.
pub fn generate_service(
    service: &ServiceDef,
    operations: &[OperationCode],
    docs: TokenStream,
    rt: &Ident,
) -> TokenStream {
    let struct_name = ident(&service.struct_name);
    let struct_doc = format!(" Operations of the `{}` service.", service.name);

    let imports: BTreeSet<&str> = operations
        .iter()
        .flat_map(|op| op.imports.iter().map(String::as_str))
        .collect();
    let use_types = if imports.is_empty() {
        quote! {}
    } else {
        let names = imports.iter().map(|name| ident(name));
        quote! { use crate::types::{#(#names),*}; }
    };

    let items = operations.iter().map(|op| &op.items);
    let methods = operations.iter().map(|op| &op.methods);

    quote! {
        #docs

        #use_types

        #(#items)*

        #[doc = #struct_doc]
        #[derive(Debug, Clone, Copy)]
        pub struct #struct_name<'a> {
            cs: &'a #rt::CloudStackClient,
        }

        impl<'a> #struct_name<'a> {
            pub fn new(cs: &'a #rt::CloudStackClient) -> Self {
                Self { cs }
            }

            #(#methods)*
        }
    }
}
