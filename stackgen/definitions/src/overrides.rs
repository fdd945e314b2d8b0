//! CloudStack exceptions to the generic generation rules.

use stackgen_define::{MapIndexing, MapRoleKind, OverrideTables, ShapeOverride, WrapperOverride};

fn set(items: &[&str]) -> std::collections::BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Builds the override tables for the CloudStack API.
///
/// ## Examples
///
/// ```
/// use stackgen_definitions::cloudstack_overrides;
///
/// let tables = cloudstack_overrides();
/// assert_eq!(tables.nesting_key("getUserKeys"), Some("userkeys"));
/// assert!(tables.is_list_operation("findHostsForMigration"));
/// ```
pub fn cloudstack_overrides() -> OverrideTables {
    let mut tables = OverrideTables::new()
        // Schema lists these as optional, the server rejects calls without them.
        .with_forced_required("updateAccount", &["newname"])
        .with_forced_required("createNetworkOffering", &["displaytext"])
        .with_forced_required("createDiskOffering", &["displaytext"]);

    // Endpoints that embed a single nested object rather than an array.
    for (op, param) in [
        ("changeServiceForVirtualMachine", "details"),
        ("createServiceOffering", "serviceofferingdetails"),
        ("deployVirtualMachine", "details"),
        ("registerTemplate", "details"),
        ("scaleVirtualMachine", "details"),
        ("updateTemplate", "details"),
        ("updateVirtualMachine", "details"),
    ] {
        tables = tables.with_index_mode(op, param, MapIndexing::ZeroCollapsed);
    }

    tables.map_roles.extend(
        [
            ("tags", MapRoleKind::Tags),
            ("usersecuritygrouplist", MapRoleKind::AccountGroup),
            ("serviceproviderlist", MapRoleKind::ServiceProvider),
            ("nicnetworklist", MapRoleKind::NicNetwork),
            ("nicipaddresslist", MapRoleKind::NicIp),
            ("datadiskofferinglist", MapRoleKind::DiskOffering),
        ]
        .map(|(name, role)| (name.to_string(), role)),
    );

    tables.drop_empty_tag_values = set(&["deleteTags"]);

    tables.force_post = set(&[
        "deployVirtualMachine",
        "getUploadParamsForIso",
        "getUploadParamsForTemplate",
        "getUploadParamsForVolume",
        "registerSSHKeyPair",
        "registerUserData",
        "updateVirtualMachine",
        "uploadCustomCertificate",
    ]);

    tables.nesting_keys.extend(
        [
            ("createSSHKeyPair", "keypair"),
            ("getApiLimit", "apilimit"),
            ("getCloudIdentifier", "cloudidentifier"),
            ("getKubernetesClusterConfig", "clusterconfig"),
            ("getUploadParamsForIso", "getuploadparams"),
            ("getUploadParamsForTemplate", "getuploadparams"),
            ("getUploadParamsForVolume", "getuploadparams"),
            ("getUserKeys", "userkeys"),
            ("getVMPassword", "password"),
            ("registerSSHKeyPair", "keypair"),
        ]
        .map(|(op, key)| (op.to_string(), key.to_string())),
    );

    // Sent as numbers by older management servers.
    tables.field_coercions = set(&["jobid", "ostypeid"]);

    tables.custom_response_names.extend(
        [
            ("getApiLimit", "ApiLimit"),
            ("getCloudIdentifier", "CloudIdentifier"),
            ("getUserKeys", "UserKeys"),
            ("getVMPassword", "VmPassword"),
        ]
        .map(|(op, name)| (op.to_string(), name.to_string())),
    );

    for (op, field, shape) in [
        ("listAsyncJobs", "jobresult", ShapeOverride::Raw),
        ("listNetworkOfferings", "details", ShapeOverride::Map),
        ("listServiceOfferings", "serviceofferingdetails", ShapeOverride::Map),
        ("listVirtualMachines", "details", ShapeOverride::Map),
        ("listVirtualMachines", "readonlydetails", ShapeOverride::StringList),
        ("queryAsyncJobResult", "jobresult", ShapeOverride::Raw),
    ] {
        tables = tables.with_shape(op, field, shape);
    }

    tables = tables
        .with_map_list("deployVirtualMachine", "iptonetworklist")
        .with_map_list("importUnmanagedInstance", "datadiskofferinglist");

    tables = tables
        .with_wrapper("listApis", WrapperOverride::sequence("api", "Api"))
        .with_wrapper(
            "findHostsForMigration",
            WrapperOverride::sequence("host", "HostForMigration"),
        )
        .with_wrapper(
            "registerTemplate",
            WrapperOverride::sequence("template", "RegisterTemplate"),
        )
        .with_wrapper(
            "listCapabilities",
            WrapperOverride::object("capability", "Capability"),
        )
        .with_wrapper(
            "listInfrastructure",
            WrapperOverride::object("infrastructure", "Infrastructure"),
        )
        .with_wrapper(
            "listNetworkIsolationMethods",
            WrapperOverride::sequence("isolationmethod", "IsolationMethod"),
        )
        .with_wrapper(
            "listSupportedNetworkServices",
            WrapperOverride::sequence("networkservice", "SupportedNetworkService"),
        )
        .with_wrapper(
            "listVirtualMachinesMetrics",
            WrapperOverride::sequence("virtualmachine", "VirtualMachinesMetric"),
        )
        .with_wrapper(
            "isAccountAllowedToCreateOfferingsWithTags",
            WrapperOverride::scalar("isallowed", "boolean"),
        );

    tables.list_exceptions = set(&["findHostsForMigration", "registerTemplate"]);

    tables.helper_extra_params.extend(
        [
            ("listIsos", vec!["isofilter", "zoneid"]),
            ("listTemplates", vec!["zoneid"]),
        ]
        .map(|(op, params)| (op.to_string(), params.into_iter().map(String::from).collect::<Vec<_>>())),
    );

    // Reports the total across all pages, not the returned page.
    tables.recount_entities = set(&["listProjects"]);

    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackgen_define::WrapperShape;

    #[test]
    fn test_zero_collapsed_details() {
        let tables = cloudstack_overrides();
        assert_eq!(
            tables.index_mode("registerTemplate", "details"),
            MapIndexing::ZeroCollapsed
        );
        assert_eq!(
            tables.index_mode("updateZone", "details"),
            MapIndexing::Sequential
        );
    }

    #[test]
    fn test_map_roles() {
        let tables = cloudstack_overrides();
        assert_eq!(tables.map_role("usersecuritygrouplist"), MapRoleKind::AccountGroup);
        assert_eq!(tables.map_role("details"), MapRoleKind::KeyValue);
        assert!(tables.drops_empty_tag_values("deleteTags"));
        assert!(!tables.drops_empty_tag_values("createTags"));
    }

    #[test]
    fn test_wrappers() {
        let tables = cloudstack_overrides();
        let apis = tables.custom_wrapper("listApis").unwrap();
        assert_eq!(apis.payload_key, "api");
        assert_eq!(apis.shape, WrapperShape::Sequence);
        assert!(matches!(
            tables.custom_wrapper("isAccountAllowedToCreateOfferingsWithTags").map(|w| &w.shape),
            Some(WrapperShape::Scalar(t)) if t == "boolean"
        ));
    }

    #[test]
    fn test_single_recount_entity() {
        let tables = cloudstack_overrides();
        assert!(tables.recounts("listProjects"));
        assert_eq!(tables.recount_entities.len(), 1);
    }
}
