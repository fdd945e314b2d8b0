//! Service layout: which generated module each operation lives in.

use crate::catalog::Catalog;

/// One generated service module and the operations it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    /// Service name, e.g. `VirtualMachine`. Becomes `VirtualMachineService`
    /// and the module `virtual_machine`.
    pub name: String,
    pub operations: Vec<String>,
}

/// An ordered mapping of services to operation names.
///
/// ## Examples
///
/// ```
/// use stackgen_define::ServiceLayout;
///
/// let layout = ServiceLayout::new()
///     .service("Zone", &["createZone", "listZones"])
///     .service("Pod", &["listPods"]);
///
/// assert_eq!(layout.service_for("listPods"), Some("Pod"));
/// assert_eq!(layout.services().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceLayout {
    services: Vec<Service>,
}

impl ServiceLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a service. Operation order is kept as given.
    pub fn service(mut self, name: &str, operations: &[&str]) -> Self {
        self.services.push(Service {
            name: name.to_string(),
            operations: operations.iter().map(|o| o.to_string()).collect(),
        });
        self
    }

    /// A layout that puts every catalog operation into one service.
    pub fn flat(catalog: &Catalog, name: &str) -> Self {
        let operations = catalog
            .operations()
            .iter()
            .map(|op| op.name.clone())
            .collect();
        Self {
            services: vec![Service {
                name: name.to_string(),
                operations,
            }],
        }
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Name of the service owning an operation.
    pub fn service_for(&self, op: &str) -> Option<&str> {
        self.services
            .iter()
            .find(|s| s.operations.iter().any(|o| o == op))
            .map(|s| s.name.as_str())
    }

    pub fn contains(&self, op: &str) -> bool {
        self.service_for(op).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Operation;

    fn op(name: &str) -> Operation {
        Operation {
            name: name.to_string(),
            description: String::new(),
            is_async: false,
            params: vec![],
            fields: vec![],
        }
    }

    #[test]
    fn test_flat_layout_holds_every_operation() {
        let catalog = Catalog::new(vec![op("listZones"), op("createZone")]);
        let layout = ServiceLayout::flat(&catalog, "Api");
        assert_eq!(layout.services().len(), 1);
        assert_eq!(layout.services()[0].operations, ["createZone", "listZones"]);
    }

    #[test]
    fn test_service_for() {
        let layout = ServiceLayout::new()
            .service("Zone", &["listZones"])
            .service("Pod", &["listPods", "createPod"]);
        assert_eq!(layout.service_for("createPod"), Some("Pod"));
        assert_eq!(layout.service_for("listZones"), Some("Zone"));
        assert!(!layout.contains("listHosts"));
    }
}
