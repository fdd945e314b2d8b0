//! Pre-generation validation of a [`GeneratorConfig`].
//!
//! Catches configuration problems that would otherwise surface as
//! confusing compile errors in the generated crate.
//!
//! ## Validation Checks
//!
//! - **Crate names**: the generated package name and the runtime crate name
//!   must be usable in `Cargo.toml` and as a path root
//! - **Service names**: non-empty, and no two services may map to the same
//!   module or struct
//! - **Reserved modules**: a service cannot shadow `types` or `prelude`
//! - **Ownership**: each operation belongs to at most one service
//!
//! ## Examples
//!
//! ```
//! use stackgen_gen::config::GeneratorConfig;
//! use stackgen_gen::validation::validate_config;
//!
//! assert!(validate_config(&GeneratorConfig::builtin()).is_ok());
//! ```

use std::collections::BTreeMap;

use crate::config::GeneratorConfig;
use crate::errors::GeneratorError;
use crate::naming::{is_keyword, to_snake_case};

/// Module names the generated crate already uses, and the facade's own
/// methods that a service accessor would shadow.
const RESERVED_MODULES: &[&str] = &["lib", "types", "prelude", "client", "new", "from_env"];

/// Validates a generator configuration.
///
/// ## Errors
///
/// Returns `GeneratorError::ConfigError` describing the first problem found.
pub fn validate_config(config: &GeneratorConfig) -> Result<(), GeneratorError> {
    validate_crate_name("crate name", &config.crate_name)?;
    validate_crate_name("runtime crate", &config.runtime_crate)?;

    let mut modules: BTreeMap<String, &str> = BTreeMap::new();
    let mut owners: BTreeMap<&str, &str> = BTreeMap::new();

    for service in config.layout.services() {
        let module = to_snake_case(&service.name);
        if module.is_empty() || !module.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(GeneratorError::ConfigError(format!(
                "service name '{}' does not form a valid module name",
                service.name
            )));
        }

        if RESERVED_MODULES.contains(&module.as_str()) || is_keyword(&module) {
            return Err(GeneratorError::ConfigError(format!(
                "service '{}' maps to reserved module name '{}'",
                service.name, module
            )));
        }

        if let Some(other) = modules.insert(module.clone(), &service.name) {
            return Err(GeneratorError::ConfigError(format!(
                "services '{}' and '{}' both map to module '{}'",
                other, service.name, module
            )));
        }

        for op in &service.operations {
            if let Some(other) = owners.insert(op, &service.name) {
                return Err(GeneratorError::ConfigError(format!(
                    "operation '{}' is listed in both '{}' and '{}'",
                    op, other, service.name
                )));
            }
        }
    }

    Ok(())
}

fn validate_crate_name(what: &str, name: &str) -> Result<(), GeneratorError> {
    if name.is_empty() {
        return Err(GeneratorError::ConfigError(format!("{what} cannot be empty")));
    }

    let valid = name.starts_with(|c: char| c.is_ascii_alphabetic())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(GeneratorError::ConfigError(format!(
            "{what} '{name}' must start with a letter and contain only letters, digits, '-' or '_'"
        )));
    }

    Ok(())
}
