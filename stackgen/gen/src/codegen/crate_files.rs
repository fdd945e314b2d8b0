//! `lib.rs` and `prelude.rs` of the generated crate.
//!
//! `lib.rs` declares one module per service and defines the `CloudStack`
//! facade, which owns the runtime client and hands out borrowed service
//! handles:
//!
//! ```ignore
//! let cs = cloudstack::CloudStack::from_env()?;
//! let zones = cs.zone().list_zones(&ListZonesParams::new()).await?;
//! ```

use proc_macro2::{Ident, TokenStream};
use quote::quote;

use super::ident;
use super::service::ServiceDef;

/// Generates `lib.rs` for the given services, in layout order.
pub fn generate_lib_rs(services: &[ServiceDef], rt: &Ident) -> TokenStream {
    let modules = services.iter().map(|s| ident(&s.module));

    let accessors = services.iter().map(|s| {
        let module = ident(&s.module);
        let struct_name = ident(&s.struct_name);
        let doc = format!(" Operations of the `{}` service.", s.name);
        quote! {
            #[doc = #doc]
            pub fn #module(&self) -> #module::#struct_name<'_> {
                #module::#struct_name::new(&self.client)
            }
        }
    });

    let service_list = services
        .iter()
        .map(|s| format!(" - [`{}`] - `{}`", s.module, s.name))
        .collect::<Vec<_>>()
        .join("\n");
    let service_list = if service_list.is_empty() {
        " No services generated.".to_string()
    } else {
        service_list
    };

    quote! {
        //! Generated CloudStack API bindings.
        //!
        //! ## Services
        //!
        #![doc = #service_list]
        //!
        //! ## Quick Start
        //!
        //! ```ignore
        //! use crate::prelude::*;
        //!
        //! let cs = CloudStack::from_env()?;
        //! ```

        pub mod prelude;
        pub mod types;

        #(pub mod #modules;)*

        /// Entry point owning the runtime client.
        #[derive(Debug, Clone)]
        pub struct CloudStack {
            client: #rt::CloudStackClient,
        }

        impl CloudStack {
            pub fn new(client: #rt::CloudStackClient) -> Self {
                Self { client }
            }

            /// Builds the client from `CLOUDSTACK_API_URL`, `CLOUDSTACK_API_KEY`
            /// and `CLOUDSTACK_SECRET_KEY`.
            pub fn from_env() -> Result<Self, #rt::ApiError> {
                Ok(Self::new(#rt::CloudStackClient::from_env()?))
            }

            pub fn client(&self) -> &#rt::CloudStackClient {
                &self.client
            }

            #(#accessors)*
        }
    }
}

/// Generates `prelude.rs`: the facade, the runtime's public types and every
/// service handle.
pub fn generate_prelude(services: &[ServiceDef], rt: &Ident) -> TokenStream {
    let reexports = services.iter().map(|s| {
        let module = ident(&s.module);
        let struct_name = ident(&s.struct_name);
        quote! { pub use crate::#module::#struct_name; }
    });

    quote! {
        //! Convenient re-exports for working with the generated bindings.

        pub use crate::CloudStack;
        pub use #rt::{ApiError, CloudStackClient, ListOption};

        #(#reexports)*
    }
}
