//! Generator configuration.

use proc_macro2::Ident;
use quote::format_ident;
use stackgen_define::{Catalog, OverrideTables, ServiceLayout};
use stackgen_definitions::{cloudstack_layout, cloudstack_overrides};

/// Everything one generation run needs besides the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Package name of the generated crate.
    pub crate_name: String,
    /// Crate name generated code uses to reach the runtime.
    pub runtime_crate: String,
    /// TOML dependency spec for the runtime in the generated `Cargo.toml`.
    pub runtime_dependency: String,
    pub layout: ServiceLayout,
    pub overrides: OverrideTables,
}

impl GeneratorConfig {
    /// The CloudStack layout and override tables.
    pub fn builtin() -> Self {
        Self {
            crate_name: "cloudstack".to_string(),
            runtime_crate: "stackgen".to_string(),
            runtime_dependency: r#"{ path = "../stackgen" }"#.to_string(),
            layout: cloudstack_layout(),
            overrides: cloudstack_overrides(),
        }
    }

    /// Every catalog operation in one service, with the CloudStack
    /// override tables.
    pub fn flat(catalog: &Catalog) -> Self {
        Self {
            layout: ServiceLayout::flat(catalog, "CloudStack"),
            ..Self::builtin()
        }
    }

    pub fn with_layout(mut self, layout: ServiceLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_overrides(mut self, overrides: OverrideTables) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_crate_name(mut self, name: &str) -> Self {
        self.crate_name = name.to_string();
        self
    }

    pub fn with_runtime_dependency(mut self, spec: &str) -> Self {
        self.runtime_dependency = spec.to_string();
        self
    }

    /// The runtime crate as a path root in generated code.
    pub fn runtime_ident(&self) -> Ident {
        format_ident!("{}", self.runtime_crate.replace('-', "_"))
    }
}
