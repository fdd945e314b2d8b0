//! Module documentation generation for service modules.
//!
//! This module provides the [`ServiceDocBuilder`] struct for generating
//! module-level documentation for each generated service module: an
//! introduction, the operations grouped by sync/async, and a usage example.

use proc_macro2::TokenStream;
use quote::quote;
use stackgen_define::Operation;

use crate::naming::{field_ident, type_name};

/// Builds module-level documentation for a generated service module.
///
/// ## Examples
///
/// ```ignore
/// use stackgen_gen::codegen::ServiceDocBuilder;
///
/// let builder = ServiceDocBuilder::new("Zone", "zone", &operations);
/// let doc_tokens = builder.build();
/// ```
pub struct ServiceDocBuilder<'a> {
    service: &'a str,
    module: &'a str,
    operations: &'a [&'a Operation],
}

impl<'a> ServiceDocBuilder<'a> {
    pub fn new(service: &'a str, module: &'a str, operations: &'a [&'a Operation]) -> Self {
        Self {
            service,
            module,
            operations,
        }
    }

    /// Builds the complete module documentation as `#![doc = "..."]`
    /// attributes.
    pub fn build(&self) -> TokenStream {
        let intro = self.intro_paragraph();
        let operations_section = self.operations_section();
        let example_section = self.example_section();

        quote! {
            #![doc = #intro]
            //!
            #![doc = #operations_section]
            //!
            #![doc = #example_section]
        }
    }

    fn intro_paragraph(&self) -> String {
        format!(
            " Generated bindings for the `{}` service ({} operations).",
            self.service,
            self.operations.len()
        )
    }

    /// Lists operations, synchronous first.
    fn operations_section(&self) -> String {
        if self.operations.is_empty() {
            return " ## Operations\n\n No operations generated.".to_string();
        }

        let mut lines = vec![" ## Operations".to_string(), String::new()];
        for (heading, is_async) in [("Synchronous", false), ("Asynchronous", true)] {
            let ops: Vec<_> = self
                .operations
                .iter()
                .filter(|op| op.is_async == is_async)
                .collect();
            if ops.is_empty() {
                continue;
            }
            lines.push(format!(" **{heading}**:"));
            for op in ops {
                let summary = op.description.split_whitespace().collect::<Vec<_>>().join(" ");
                lines.push(format!(" - `{}` - {}", op.name, summary));
            }
            lines.push(String::new());
        }
        lines.join("\n")
    }

    /// Uses the first `list` operation, or the first operation.
    fn example_section(&self) -> String {
        let op = self
            .operations
            .iter()
            .find(|op| op.name.starts_with("list"))
            .or_else(|| self.operations.first());

        let Some(op) = op else {
            return " ## Example\n\n No operations available for example.".to_string();
        };

        let method = field_ident(&op.name);
        let params = type_name(&op.name);

        format!(
            r#" ## Example

 ```ignore
 use stackgen::CloudStackClient;

 let client = CloudStackClient::from_env()?;
 let cs = crate::CloudStack::new(client);
 let params = {}::{}Params::new(/* required parameters */);
 let response = cs.{}().{}(&params).await?;
 ```"#,
            self.module, params, self.module, method
        )
    }
}
