//! CloudStack service layout.

use stackgen_define::ServiceLayout;

/// The builtin grouping of CloudStack commands into service modules.
///
/// Operations named here but missing from a loaded catalog are reported per
/// operation; use the flat layout for catalogs from other API versions.
pub fn cloudstack_layout() -> ServiceLayout {
    ServiceLayout::new()
        .service(
            "Account",
            &[
                "createAccount",
                "deleteAccount",
                "disableAccount",
                "enableAccount",
                "listAccounts",
                "lockAccount",
                "markDefaultZoneForAccount",
                "updateAccount",
            ],
        )
        .service("Address", &["associateIpAddress", "disassociateIpAddress", "listPublicIpAddresses", "updateIpAddress"])
        .service("AffinityGroup", &["createAffinityGroup", "deleteAffinityGroup", "listAffinityGroupTypes", "listAffinityGroups", "updateVMAffinityGroup"])
        .service("APIDiscovery", &["listApis"])
        .service("Asyncjob", &["listAsyncJobs", "queryAsyncJobResult"])
        .service("Configuration", &["listCapabilities", "listConfigurations", "updateConfiguration"])
        .service(
            "DiskOffering",
            &["createDiskOffering", "deleteDiskOffering", "listDiskOfferings", "updateDiskOffering"],
        )
        .service("Domain", &["createDomain", "deleteDomain", "listDomainChildren", "listDomains", "updateDomain"])
        .service(
            "Firewall",
            &[
                "createEgressFirewallRule",
                "createFirewallRule",
                "createPortForwardingRule",
                "deleteEgressFirewallRule",
                "deleteFirewallRule",
                "deletePortForwardingRule",
                "listEgressFirewallRules",
                "listFirewallRules",
                "listPortForwardingRules",
                "updatePortForwardingRule",
            ],
        )
        .service(
            "Host",
            &[
                "addHost",
                "cancelHostMaintenance",
                "deleteHost",
                "findHostsForMigration",
                "listHosts",
                "prepareHostForMaintenance",
                "reconnectHost",
                "updateHost",
            ],
        )
        .service("Hypervisor", &["listHypervisors", "updateHypervisorCapabilities"])
        .service(
            "ISO",
            &["attachIso", "copyIso", "deleteIso", "detachIso", "listIsos", "registerIso", "updateIso"],
        )
        .service("Limit", &["getApiLimit", "listResourceLimits", "updateResourceLimit"])
        .service(
            "LoadBalancer",
            &[
                "assignToLoadBalancerRule",
                "createLoadBalancerRule",
                "deleteLoadBalancerRule",
                "listLoadBalancerRules",
                "removeFromLoadBalancerRule",
                "updateLoadBalancerRule",
            ],
        )
        .service("Metrics", &["listInfrastructure", "listVirtualMachinesMetrics"])
        .service(
            "Network",
            &[
                "createNetwork",
                "deleteNetwork",
                "listNetworkIsolationMethods",
                "listNetworks",
                "listSupportedNetworkServices",
                "restartNetwork",
                "updateNetwork",
            ],
        )
        .service(
            "NetworkOffering",
            &["createNetworkOffering", "deleteNetworkOffering", "listNetworkOfferings", "updateNetworkOffering"],
        )
        .service("Nic", &["addIpToNic", "listNics", "removeIpFromNic", "updateVmNicIp"])
        .service("OutofbandManagement", &["configureOutOfBandManagement", "issueOutOfBandManagementPowerAction"])
        .service("Pod", &["createPod", "deletePod", "listPods", "updatePod"])
        .service("Project", &["activateProject", "createProject", "deleteProject", "listProjects", "suspendProject", "updateProject"])
        .service("Resourcetags", &["createTags", "deleteTags", "listTags"])
        .service(
            "SecurityGroup",
            &[
                "authorizeSecurityGroupEgress",
                "authorizeSecurityGroupIngress",
                "createSecurityGroup",
                "deleteSecurityGroup",
                "listSecurityGroups",
                "revokeSecurityGroupEgress",
                "revokeSecurityGroupIngress",
            ],
        )
        .service(
            "ServiceOffering",
            &["createServiceOffering", "deleteServiceOffering", "isAccountAllowedToCreateOfferingsWithTags", "listServiceOfferings", "updateServiceOffering"],
        )
        .service(
            "Snapshot",
            &["createSnapshot", "deleteSnapshot", "listSnapshots", "revertSnapshot"],
        )
        .service(
            "SSH",
            &["createSSHKeyPair", "deleteSSHKeyPair", "listSSHKeyPairs", "registerSSHKeyPair", "resetSSHKeyForVirtualMachine"],
        )
        .service(
            "Template",
            &[
                "copyTemplate",
                "deleteTemplate",
                "getUploadParamsForTemplate",
                "listTemplates",
                "registerTemplate",
                "updateTemplate",
            ],
        )
        .service("User", &["createUser", "deleteUser", "getUserKeys", "listUsers", "registerUserKeys", "updateUser"])
        .service(
            "VirtualMachine",
            &[
                "addNicToVirtualMachine",
                "changeServiceForVirtualMachine",
                "deployVirtualMachine",
                "destroyVirtualMachine",
                "expungeVirtualMachine",
                "getVMPassword",
                "listVirtualMachines",
                "migrateVirtualMachine",
                "rebootVirtualMachine",
                "recoverVirtualMachine",
                "removeNicFromVirtualMachine",
                "resetPasswordForVirtualMachine",
                "restoreVirtualMachine",
                "scaleVirtualMachine",
                "startVirtualMachine",
                "stopVirtualMachine",
                "updateDefaultNicForVirtualMachine",
                "updateVirtualMachine",
            ],
        )
        .service(
            "Volume",
            &[
                "attachVolume",
                "createVolume",
                "deleteVolume",
                "detachVolume",
                "getUploadParamsForVolume",
                "listVolumes",
                "migrateVolume",
                "resizeVolume",
                "updateVolume",
                "uploadVolume",
            ],
        )
        .service(
            "VPC",
            &["createVPC", "deleteVPC", "listVPCOfferings", "listVPCs", "restartVPC", "updateVPC"],
        )
        .service("Zone", &["createZone", "deleteZone", "listZones", "updateZone"])
}
