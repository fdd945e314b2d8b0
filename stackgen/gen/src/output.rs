//! Output assembly and file writing for generated code.
//!
//! This module handles the final phase of code generation: assembling the
//! generated pieces into complete Rust files, validating the output,
//! formatting it, and writing it to disk atomically.
//!
//! ## Output Structure
//!
//! ```text
//! <output>/
//! ├── Cargo.toml
//! └── src/
//!     ├── lib.rs         # Service modules and the `CloudStack` facade
//!     ├── prelude.rs     # Common re-exports for consumers
//!     ├── types.rs       # Every response type, deduplicated
//!     └── <service>.rs   # Params builders, service struct and helpers
//! ```
//!
//! ## Failure Isolation
//!
//! Operations named by the layout but missing from the catalog, and
//! operations whose generated code does not parse, are recorded in the
//! [`GenerationReport`] and left out. Every other operation is generated
//! and written.
//!
//! ## Safety Guarantees
//!
//! - **Validation**: All generated code is validated with `syn` before writing
//! - **Formatting**: Output is formatted with `prettyplease` for consistent style
//! - **Atomic writes**: Uses temp file + rename pattern to prevent partial writes

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use proc_macro2::{Ident, TokenStream};
use quote::quote;
use stackgen_define::{Catalog, Operation};
use tracing::{info, warn};

use crate::cargo_gen::generate_cargo_toml;
use crate::codegen::{
    OperationCode, ServiceDef, ServiceDocBuilder, build_params, generate_call_method,
    generate_helpers, generate_lib_rs, generate_params, generate_prelude, generate_service,
    generate_types_module, plan_helpers,
};
use crate::config::GeneratorConfig;
use crate::errors::{GenerationReport, GeneratorError, OperationError};
use crate::responses::{OperationTypes, ResponseTypeBuilder};
use crate::validation::validate_config;

/// Notice placed at the top of every generated Rust file.
pub const GENERATED_NOTICE: &str =
    "// This code was automatically generated by stackgen-gen. Do not edit manually.";

/// One generated file, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub content: String,
}

/// All files of one run plus the per-operation report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCrate {
    pub files: Vec<GeneratedFile>,
    pub report: GenerationReport,
}

impl GeneratedCrate {
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == Path::new(path))
    }
}

/// Generates the complete crate in memory.
///
/// ## Errors
///
/// Returns an error if the configuration is invalid or a whole-crate file
/// (`lib.rs`, `types.rs`, `prelude.rs`, a service module) fails to
/// validate. Per-operation failures go to the report instead.
pub fn generate(catalog: &Catalog, config: &GeneratorConfig) -> Result<GeneratedCrate, GeneratorError> {
    validate_config(config)?;

    let rt = config.runtime_ident();
    let tables = &config.overrides;
    let mut report = GenerationReport::default();

    // Resolve the layout against the catalog.
    let mut resolved: Vec<(ServiceDef, Vec<&Operation>)> = Vec::new();
    for service in config.layout.services() {
        let mut ops = Vec::new();
        for name in &service.operations {
            match catalog.operation(name) {
                Some(op) => ops.push(op),
                None => {
                    warn!(operation = %name, service = %service.name, "operation missing from catalog");
                    report.errors.push(OperationError::missing(name, &service.name));
                }
            }
        }
        resolved.push((ServiceDef::new(&service.name), ops));
    }

    for op in catalog.operations() {
        if !config.layout.contains(&op.name) {
            warn!(operation = %op.name, "operation not in any service, skipping");
            report.skipped.push(op.name.clone());
        }
    }

    let all_ops: Vec<&Operation> = resolved.iter().flat_map(|(_, ops)| ops.iter().copied()).collect();
    let types = ResponseTypeBuilder::new(tables).build_all(&all_ops);
    let types_by_op: BTreeMap<&str, &OperationTypes> =
        types.iter().map(|t| (t.operation.as_str(), t)).collect();

    let mut files = Vec::new();
    let mut services = Vec::new();
    for (service, ops) in &resolved {
        let mut code = Vec::new();
        let mut generated_ops = Vec::new();
        for op in ops {
            let Some(op_types) = types_by_op.get(op.name.as_str()) else {
                continue;
            };
            match generate_operation(op, op_types, service, config, &rt) {
                Ok(op_code) => {
                    report.generated.push(op.name.clone());
                    generated_ops.push(*op);
                    code.push(op_code);
                }
                Err(err) => {
                    warn!(operation = %op.name, error = %err, "generated code is invalid");
                    report.errors.push(err);
                }
            }
        }

        let docs = ServiceDocBuilder::new(&service.name, &service.module, &generated_ops).build();
        let tokens = generate_service(service, &code, docs, &rt);
        files.push(GeneratedFile {
            path: PathBuf::from("src").join(format!("{}.rs", service.module)),
            content: render(&tokens)?,
        });
        info!(service = %service.name, operations = code.len(), "generated service");
        services.push(service.clone());
    }

    let lib = GeneratedFile {
        path: PathBuf::from("src/lib.rs"),
        content: render(&generate_lib_rs(&services, &rt))?,
    };
    let prelude = GeneratedFile {
        path: PathBuf::from("src/prelude.rs"),
        content: render(&generate_prelude(&services, &rt))?,
    };
    let types_file = GeneratedFile {
        path: PathBuf::from("src/types.rs"),
        content: render(&generate_types_module(&types, &rt))?,
    };
    let manifest = GeneratedFile {
        path: PathBuf::from("Cargo.toml"),
        content: generate_cargo_toml(config),
    };

    let mut all = vec![manifest, lib, prelude, types_file];
    all.append(&mut files);

    report.generated.sort();
    report.skipped.sort();
    Ok(GeneratedCrate { files: all, report })
}

/// Generates and checks one operation's params builder, call method and
/// helpers.
fn generate_operation(
    op: &Operation,
    types: &OperationTypes,
    service: &ServiceDef,
    config: &GeneratorConfig,
    rt: &Ident,
) -> Result<OperationCode, OperationError> {
    let tables = &config.overrides;
    let params = build_params(op, tables);
    let items = generate_params(&params, rt);

    let mut imports = BTreeSet::from([types.root.clone()]);
    let call = generate_call_method(op, types, &params, tables, rt);
    let helpers = plan_helpers(op, types, &params, tables).map(|plan| {
        if plan.by_id {
            imports.insert(plan.entity.clone());
        }
        generate_helpers(&plan, rt)
    });
    let methods = quote! {
        #call
        #helpers
    };

    let struct_name = crate::codegen::ident(&service.struct_name);
    let fragment = quote! {
        #items
        impl #struct_name<'_> {
            #methods
        }
    };
    validate_code(&fragment).map_err(|e| OperationError::invalid(&op.name, e.to_string()))?;

    Ok(OperationCode {
        operation: op.name.clone(),
        items,
        methods,
        imports,
    })
}

fn render(tokens: &TokenStream) -> Result<String, GeneratorError> {
    validate_code(tokens).map(|file| format_code(&file))
}

/// Validates generated code using syn.
///
/// Parses the token stream as a complete Rust file to ensure it's
/// syntactically valid before writing to disk.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if the code fails to parse.
pub fn validate_code(tokens: &TokenStream) -> Result<syn::File, GeneratorError> {
    syn::parse2(tokens.clone())
        .map_err(|e| GeneratorError::CodeGenError(format!("Generated code is invalid: {}", e)))
}

/// Formats generated code using prettyplease, prepending the
/// auto-generated notice as a regular comment.
pub fn format_code(file: &syn::File) -> String {
    let formatted = prettyplease::unparse(file);
    format!("{GENERATED_NOTICE}\n\n{formatted}")
}

/// Writes content to a file atomically using temp file + rename.
///
/// This pattern ensures that:
/// - The file is never left in a partially-written state
/// - Other processes see either the old or new content, never a mix
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if parent directories cannot be
/// created, the temp file cannot be written, or the rename fails.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Writes every generated file under `output_dir`, or prints them on a
/// dry run.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` on the first file that cannot be
/// written.
pub fn write_crate(generated: &GeneratedCrate, output_dir: &Path, dry_run: bool) -> Result<(), GeneratorError> {
    for file in &generated.files {
        if dry_run {
            println!("=== {} ===\n{}\n", file.path.display(), file.content);
        } else {
            write_atomic(&output_dir.join(&file.path), &file.content)?;
        }
    }
    Ok(())
}

/// Generates the crate and writes it to `output_dir`.
///
/// Everything that generated is written even when some operations failed;
/// check the returned report.
///
/// ## Errors
///
/// Returns an error if generation as a whole fails or a file cannot be
/// written.
pub fn generate_and_write(
    catalog: &Catalog,
    config: &GeneratorConfig,
    output_dir: &Path,
    dry_run: bool,
) -> Result<GenerationReport, GeneratorError> {
    let generated = generate(catalog, config)?;
    write_crate(&generated, output_dir, dry_run)?;
    Ok(generated.report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{make_deploy_vm, make_list_zones};
    use stackgen_define::{OverrideTables, ServiceLayout};
    use tempfile::TempDir;

    fn config() -> GeneratorConfig {
        GeneratorConfig::builtin()
            .with_overrides(OverrideTables::new())
            .with_layout(
                ServiceLayout::new()
                    .service("Zone", &["listZones"])
                    .service("VirtualMachine", &["deployVirtualMachine"]),
            )
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![make_list_zones(), make_deploy_vm()])
    }

    // === validate_code / format_code ===

    #[test]
    fn validate_code_rejects_invalid_code() {
        let tokens = quote! { fn broken() };
        assert!(matches!(validate_code(&tokens), Err(GeneratorError::CodeGenError(_))));
    }

    #[test]
    fn format_code_prepends_notice() {
        let file = validate_code(&quote! { pub struct Zone; }).unwrap();
        let code = format_code(&file);
        assert!(code.starts_with(GENERATED_NOTICE));
        assert!(code.contains("pub struct Zone;"));
    }

    // === write_atomic ===

    #[test]
    fn write_atomic_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("nested/deep/test.rs");

        write_atomic(&file_path, "// Nested content").unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "// Nested content");
    }

    #[test]
    fn write_atomic_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("existing.rs");
        fs::write(&file_path, "// Old content").unwrap();

        write_atomic(&file_path, "// New content").unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "// New content");
    }

    #[test]
    fn write_atomic_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("clean.rs");

        write_atomic(&file_path, "// Content").unwrap();
        assert!(!file_path.with_extension("tmp").exists());
    }

    // === generate ===

    #[test]
    fn generates_every_file() {
        let generated = generate(&catalog(), &config()).unwrap();
        let paths: Vec<_> = generated.files.iter().map(|f| f.path.display().to_string()).collect();
        assert_eq!(
            paths,
            vec![
                "Cargo.toml",
                "src/lib.rs",
                "src/prelude.rs",
                "src/types.rs",
                "src/zone.rs",
                "src/virtual_machine.rs",
            ]
        );
        assert!(generated.report.is_success());
        assert_eq!(
            generated.report.generated,
            vec!["deployVirtualMachine".to_string(), "listZones".to_string()]
        );
    }

    #[test]
    fn service_module_contents() {
        let generated = generate(&catalog(), &config()).unwrap();
        let zone = &generated.file("src/zone.rs").unwrap().content;
        assert!(zone.starts_with(GENERATED_NOTICE));
        assert!(zone.contains("pub struct ListZonesParams"));
        assert!(zone.contains("pub struct ZoneService<'a>"));
        assert!(zone.contains("pub async fn list_zones("));
        assert!(zone.contains("pub async fn get_zone_id("));
        assert!(zone.contains("use crate::types::{ListZonesResponse, Zone};"));
    }

    #[test]
    fn missing_operation_is_reported_not_fatal() {
        let config = config().with_layout(
            ServiceLayout::new().service("Zone", &["listZones", "listPods"]),
        );
        let generated = generate(&catalog(), &config).unwrap();

        assert_eq!(generated.report.errors, vec![OperationError::missing("listPods", "Zone")]);
        assert_eq!(generated.report.generated, vec!["listZones".to_string()]);
        assert_eq!(generated.report.skipped, vec!["deployVirtualMachine".to_string()]);
        assert!(generated.file("src/zone.rs").is_some());
    }

    #[test]
    fn invalid_config_aborts() {
        let config = config().with_layout(ServiceLayout::new().service("Types", &["listZones"]));
        assert!(matches!(
            generate(&catalog(), &config),
            Err(GeneratorError::ConfigError(_))
        ));
    }

    #[test]
    fn dry_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        generate_and_write(&catalog(), &config(), temp_dir.path(), true).unwrap();
        assert!(!temp_dir.path().join("src/lib.rs").exists());
        assert!(!temp_dir.path().join("Cargo.toml").exists());
    }

    #[test]
    fn writes_crate_layout() {
        let temp_dir = TempDir::new().unwrap();
        let report = generate_and_write(&catalog(), &config(), temp_dir.path(), false).unwrap();
        assert!(report.is_success());
        for path in ["Cargo.toml", "src/lib.rs", "src/prelude.rs", "src/types.rs", "src/zone.rs"] {
            assert!(temp_dir.path().join(path).exists(), "{path} missing");
        }
    }
}
