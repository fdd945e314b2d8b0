//! `Cargo.toml` generation for the output crate.
//!
//! The generated crate depends on `serde` (derive), `serde_json` and the
//! runtime crate; the runtime dependency line comes from
//! [`GeneratorConfig::runtime_dependency`] so it can point at a path, a
//! registry version or a git checkout.

use std::path::Path;

use crate::config::GeneratorConfig;
use crate::errors::GeneratorError;
use crate::output::write_atomic;

/// Renders the generated crate's manifest.
pub fn generate_cargo_toml(config: &GeneratorConfig) -> String {
    format!(
        r#"# This file was automatically generated by stackgen-gen. Do not edit manually.

[package]
name = "{name}"
version = "0.1.0"
edition = "2024"
description = "Generated CloudStack API bindings"
publish = false

[dependencies]
serde = {{ version = "1.0", features = ["derive"] }}
serde_json = "1.0"
{runtime} = {dependency}
"#,
        name = config.crate_name,
        runtime = config.runtime_crate,
        dependency = config.runtime_dependency,
    )
}

/// Writes `Cargo.toml` into `crate_dir`, or prints it on a dry run.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if the file cannot be written.
pub fn write_cargo_toml(
    crate_dir: &Path,
    config: &GeneratorConfig,
    dry_run: bool,
) -> Result<(), GeneratorError> {
    let content = generate_cargo_toml(config);
    if dry_run {
        println!("=== Cargo.toml ===\n{content}");
        return Ok(());
    }
    write_atomic(&crate_dir.join("Cargo.toml"), &content)
}
