//! End-to-end generation over the fixture catalog.

use std::fs;
use std::path::Path;

use stackgen_define::{Catalog, ServiceLayout};
use stackgen_gen::config::GeneratorConfig;
use stackgen_gen::errors::{GeneratorError, OperationError};
use stackgen_gen::output::{GENERATED_NOTICE, GeneratedCrate, generate, generate_and_write};
use tempfile::TempDir;

fn catalog() -> Catalog {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/catalog.json");
    Catalog::load(path).unwrap()
}

fn layout() -> ServiceLayout {
    ServiceLayout::new()
        .service("Account", &["updateAccount"])
        .service("Resourcetags", &["createTags"])
        .service(
            "VirtualMachine",
            &["deployVirtualMachine", "listVirtualMachines", "recoverVirtualMachine"],
        )
        .service("Zone", &["listZones"])
}

fn generated() -> GeneratedCrate {
    let config = GeneratorConfig::builtin().with_layout(layout());
    generate(&catalog(), &config).unwrap()
}

fn content<'a>(generated: &'a GeneratedCrate, path: &str) -> &'a str {
    &generated
        .file(path)
        .unwrap_or_else(|| panic!("{path} not generated"))
        .content
}

#[test]
fn generation_is_reproducible() {
    let first = generated();
    let second = generated();
    assert_eq!(first.files, second.files);
}

#[test]
fn input_order_does_not_change_output() {
    let mut ops = catalog().operations().to_vec();
    ops.reverse();
    let reversed = Catalog::new(ops);
    let config = GeneratorConfig::builtin().with_layout(layout());

    assert_eq!(generate(&reversed, &config).unwrap().files, generated().files);
}

#[test]
fn missing_and_skipped_operations_are_reported() {
    let generated = generated();
    let report = &generated.report;

    assert_eq!(
        report.errors,
        vec![OperationError::missing("recoverVirtualMachine", "VirtualMachine")]
    );
    assert_eq!(report.skipped, vec!["listPods".to_string()]);
    assert_eq!(
        report.generated,
        vec![
            "createTags".to_string(),
            "deployVirtualMachine".to_string(),
            "listVirtualMachines".to_string(),
            "listZones".to_string(),
            "updateAccount".to_string(),
        ]
    );
    assert!(matches!(
        report.clone().into_result(),
        Err(GeneratorError::OperationsFailed { count: 1 })
    ));
}

#[test]
fn constructor_takes_required_parameters_in_sorted_order() {
    let generated = generated();
    let vm = content(&generated, "src/virtual_machine.rs");

    let start = vm.find("impl DeployVirtualMachineParams").unwrap();
    let new = &vm[start..];
    let new = &new[new.find("pub fn new(").unwrap()..new.find("-> Self").unwrap()];
    let service = new.find("serviceofferingid").unwrap();
    let template = new.find("templateid").unwrap();
    let zone = new.find("zoneid").unwrap();
    assert!(service < template && template < zone);
    assert!(!new.contains("startvm"));
    assert!(!new.contains("details"));
}

#[test]
fn forced_required_parameter_joins_constructor() {
    let generated = generated();
    let account = content(&generated, "src/account.rs");

    let start = account.find("impl UpdateAccountParams").unwrap();
    let new = &account[start..];
    let new = &new[new.find("pub fn new(").unwrap()..new.find("-> Self").unwrap()];
    assert!(new.contains("newname"));
    assert!(!new.contains("domainid"));
}

#[test]
fn shared_types_are_emitted_once() {
    let generated = generated();
    let types = content(&generated, "src/types.rs");

    assert_eq!(types.matches("pub struct Tags {").count(), 1);
    assert_eq!(types.matches("pub struct Nic {").count(), 1);
    assert!(types.contains("pub struct ListVirtualMachinesResponse"));
    assert!(types.contains("pub struct VirtualMachine {"));
    assert!(types.contains("pub struct Zone {"));
}

#[test]
fn async_operations_poll_and_forced_post_is_honoured() {
    let generated = generated();
    let vm = content(&generated, "src/virtual_machine.rs");
    assert!(vm.contains("\"deployVirtualMachine\", true"));
    assert!(vm.contains("finish_async(raw, true)"));

    let tags = content(&generated, "src/resourcetags.rs");
    assert!(tags.contains("finish_async(raw, false)"));
}

#[test]
fn lookup_helpers_for_list_operations() {
    let generated = generated();
    let vm = content(&generated, "src/virtual_machine.rs");
    assert!(vm.contains("pub async fn get_virtual_machine_id("));
    assert!(vm.contains("pub async fn get_virtual_machine_by_id("));
    assert!(vm.contains("pub async fn get_virtual_machine_by_name("));

    let zone = content(&generated, "src/zone.rs");
    assert!(zone.contains("pub async fn get_zone_by_name("));
}

#[test]
fn facade_covers_every_service() {
    let generated = generated();
    let lib = content(&generated, "src/lib.rs");
    for module in ["account", "resourcetags", "virtual_machine", "zone"] {
        assert!(lib.contains(&format!("pub mod {module};")), "{module} not declared");
        assert!(lib.contains(&format!("pub fn {module}(&self)")), "{module} has no accessor");
    }
}

#[test]
fn every_rust_file_carries_the_notice() {
    let generated = generated();
    for file in &generated.files {
        if file.path.extension().is_some_and(|e| e == "rs") {
            assert!(
                file.content.starts_with(GENERATED_NOTICE),
                "{} lacks the notice",
                file.path.display()
            );
        }
    }
}

#[test]
fn writes_crate_to_disk() {
    let dir = TempDir::new().unwrap();
    let config = GeneratorConfig::builtin().with_layout(layout());
    let report = generate_and_write(&catalog(), &config, dir.path(), false).unwrap();
    assert_eq!(report.errors.len(), 1);

    let lib = fs::read_to_string(dir.path().join("src/lib.rs")).unwrap();
    assert!(lib.contains("pub struct CloudStack"));

    let manifest: toml::Value =
        toml::from_str(&fs::read_to_string(dir.path().join("Cargo.toml")).unwrap()).unwrap();
    assert_eq!(manifest["package"]["name"].as_str(), Some("cloudstack"));
    assert!(manifest["dependencies"].get("stackgen").is_some());
}

#[test]
fn flat_layout_generates_one_service() {
    let catalog = catalog();
    let generated = generate(&catalog, &GeneratorConfig::flat(&catalog)).unwrap();

    assert!(generated.report.is_success());
    assert!(generated.report.skipped.is_empty());
    assert_eq!(generated.report.generated.len(), catalog.len());
    assert!(generated.file("src/cloud_stack.rs").is_some());
}
