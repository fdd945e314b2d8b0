//! Response type emission.
//!
//! Every generated type derives `Debug`, `Clone`, `Default`, `PartialEq`,
//! `Serialize` and `Deserialize`, and every field is `#[serde(default)]`:
//! the service omits empty fields rather than sending nulls.
//!
//! Three fields need elastic decoding through the runtime's `de` module:
//! - UUID-typed fields use `string_or_number`
//! - `success` uses `bool_or_string`
//! - sequences of nested types use `one_or_many`

use proc_macro2::{Ident, TokenStream};
use quote::quote;

use super::{doc_attrs, ident, response_type};
use crate::mapper::MappedType;
use crate::responses::{FieldDef, OperationTypes, TypeDef};

/// Generates one response struct.
pub fn generate_type(def: &TypeDef, rt: &Ident) -> TokenStream {
    let name = ident(&def.name);
    let doc = doc_attrs(&def.doc);
    let fields = def.fields.iter().map(|f| generate_field(f, rt));

    quote! {
        #doc
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct #name {
            #(#fields),*
        }
    }
}

fn generate_field(field: &FieldDef, rt: &Ident) -> TokenStream {
    let name = ident(&field.ident);
    let ty = response_type(&field.ty, rt);
    let doc = doc_attrs(&field.doc);

    let mut serde_args = Vec::new();
    if field.ident != field.wire {
        let wire = &field.wire;
        serde_args.push(quote! { rename = #wire });
    }
    serde_args.push(quote! { default });

    let deserializer = match &field.ty {
        MappedType::Uuid => Some("string_or_number"),
        MappedType::Bool if field.wire == "success" => Some("bool_or_string"),
        MappedType::Entity { many: true, .. } => Some("one_or_many"),
        _ => None,
    };
    if let Some(deserializer) = deserializer {
        let path = format!("{rt}::de::{deserializer}");
        serde_args.push(quote! { deserialize_with = #path });
    }

    quote! {
        #doc
        #[serde(#(#serde_args),*)]
        pub #name: #ty
    }
}

/// Generates `types.rs`: every operation's types, each tree in post-order.
pub fn generate_types_module(types: &[OperationTypes], rt: &Ident) -> TokenStream {
    let defs = types
        .iter()
        .flat_map(|t| t.tree.post_order())
        .map(|def| generate_type(def, rt));

    quote! {
        //! Response types for every generated operation.

        use serde::{Deserialize, Serialize};

        #(#defs)*
    }
}
