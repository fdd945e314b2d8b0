//! Code generation modules for stackgen.
//!
//! This module contains generators that produce Rust source code from the
//! resolved catalog model. Each submodule handles a specific component of
//! the generated client crate.
//!
//! ## Submodules
//!
//! - [`types`] - Emits response types in post-order
//! - [`params`] - Generates per-operation `<Op>Params` builders
//! - [`service`] - Generates service structs and their call methods
//! - [`helpers`] - Generates `get_<entity>_id` style lookup helpers
//! - [`crate_files`] - Generates `lib.rs` (with the `CloudStack` facade) and `prelude.rs`
//! - [`module_docs`] - Generates module-level documentation for each service
//!
//! ## Output Format
//!
//! All generators return `proc_macro2::TokenStream`, which is then:
//! - Validated with `syn::parse2` to ensure correctness
//! - Formatted with `prettyplease` for consistent style
//!
//! See [`crate::output`] for the assembly and file writing logic.

pub mod crate_files;
pub mod helpers;
pub mod module_docs;
pub mod params;
pub mod service;
pub mod types;

pub use crate_files::{generate_lib_rs, generate_prelude};
pub use helpers::{HelperPlan, generate_helpers, plan_helpers};
pub use module_docs::ServiceDocBuilder;
pub use params::{ParamsDef, build_params, generate_params};
pub use service::{OperationCode, ServiceDef, generate_call_method, generate_service};
pub use types::{generate_type, generate_types_module};

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use crate::mapper::MappedType;

/// Creates an identifier from an already-sanitized name.
pub(crate) fn ident(name: &str) -> Ident {
    format_ident!("{}", name)
}

/// Splits free text into `#[doc]` lines, each with the leading space that
/// renders as `/// text`.
pub(crate) fn doc_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim_end)
        .map(|line| format!(" {line}"))
        .collect()
}

/// Renders `#[doc = ...]` attributes; empty text renders nothing.
pub(crate) fn doc_attrs(text: &str) -> TokenStream {
    let lines = doc_lines(text);
    quote! { #(#[doc = #lines])* }
}

/// Rust type of a response field.
pub(crate) fn response_type(ty: &MappedType, rt: &Ident) -> TokenStream {
    match ty {
        MappedType::Entity { name, many } => {
            let name = ident(name);
            if *many {
                quote! { Vec<#name> }
            } else {
                quote! { Option<#name> }
            }
        }
        MappedType::Builtin(builtin) => {
            let name = ident(builtin.type_name());
            quote! { #rt::types::#name }
        }
        MappedType::Raw => quote! { serde_json::Value },
        other => value_type(other),
    }
}

/// Rust type of a parameter value (without the `Option` wrapper).
pub(crate) fn value_type(ty: &MappedType) -> TokenStream {
    match ty {
        MappedType::Bool => quote! { bool },
        MappedType::Int32 => quote! { i32 },
        MappedType::Int64 => quote! { i64 },
        MappedType::Float64 => quote! { f64 },
        MappedType::StringList => quote! { Vec<String> },
        MappedType::FloatList => quote! { Vec<f64> },
        MappedType::Int64List => quote! { Vec<i64> },
        MappedType::StringMap => quote! { std::collections::BTreeMap<String, String> },
        MappedType::StringMapList => {
            quote! { Vec<std::collections::BTreeMap<String, String>> }
        }
        _ => quote! { String },
    }
}
