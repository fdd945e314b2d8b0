//! Generated type name registry.
//!
//! One registry is threaded through a whole generation pass so every
//! response type name is unique across the generated crate.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::naming::type_name;

/// Names reserved before any operation is processed.
const SEEDED: &[&str] = &["AsyncJobResult"];

/// Outcome of claiming a canonical name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Canonical {
    /// First occurrence; the caller emits the type.
    Claimed(String),
    /// Already emitted elsewhere; the caller only references it.
    Shared(String),
}

impl Canonical {
    pub fn name(&self) -> &str {
        match self {
            Canonical::Claimed(name) | Canonical::Shared(name) => name,
        }
    }
}

/// Tracks every claimed type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistry {
    claimed: BTreeSet<String>,
    /// Canonical key to the name it was claimed under.
    canonical: BTreeMap<String, String>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self {
            claimed: SEEDED.iter().map(|s| s.to_string()).collect(),
            canonical: BTreeMap::new(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.claimed.contains(name)
    }

    /// Claims `candidate`, appending `2`, `3`, ... until an unclaimed name
    /// is found.
    pub fn claim(&mut self, candidate: &str) -> String {
        let mut name = candidate.to_string();
        let mut marker = 2;
        while self.claimed.contains(&name) {
            name = format!("{candidate}{marker}");
            marker += 1;
        }
        debug!(name = %name, "claimed type name");
        self.claimed.insert(name.clone());
        name
    }

    /// Claims a canonical name. The first claim goes through the usual
    /// collision policy, so a canonical type never aliases a non-canonical
    /// one that took the name earlier. Later claims for the same key
    /// resolve to that first name.
    pub fn claim_canonical(&mut self, key: &str) -> Canonical {
        if let Some(name) = self.canonical.get(key) {
            return Canonical::Shared(name.clone());
        }
        let name = self.claim(key);
        debug!(key, name = %name, "claimed canonical type name");
        self.canonical.insert(key.to_string(), name.clone());
        Canonical::Claimed(name)
    }
}

/// Returns `true` for field names whose nested type is shared catalog-wide.
pub fn is_canonical_field(field: &str) -> bool {
    field.ends_with("rule") || field == "nic" || field == "tags"
}

/// Type name for a canonical field: `egressrule` becomes `EgressRule`,
/// other fields are capitalized as usual.
pub fn canonical_type_name(field: &str) -> String {
    match field.strip_suffix("rule") {
        Some(prefix) if !prefix.is_empty() => format!("{}Rule", type_name(prefix)),
        _ => type_name(field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collisions_get_numeric_markers() {
        let mut registry = TypeRegistry::new();
        assert_eq!(registry.claim("ListZonesResponse"), "ListZonesResponse");
        assert_eq!(registry.claim("ListZonesResponse"), "ListZonesResponse2");
        assert_eq!(registry.claim("ListZonesResponse"), "ListZonesResponse3");
    }

    #[test]
    fn seeded_names_are_taken() {
        let mut registry = TypeRegistry::new();
        assert!(registry.contains("AsyncJobResult"));
        assert_eq!(registry.claim("AsyncJobResult"), "AsyncJobResult2");
    }

    #[test]
    fn canonical_names_are_shared() {
        let mut registry = TypeRegistry::new();
        assert_eq!(registry.claim_canonical("Tags"), Canonical::Claimed("Tags".into()));
        assert_eq!(registry.claim_canonical("Tags"), Canonical::Shared("Tags".into()));
        assert_eq!(registry.claim_canonical("Tags").name(), "Tags");
    }

    #[test]
    fn canonical_claim_never_aliases_an_unrelated_type() {
        let mut registry = TypeRegistry::new();
        assert_eq!(registry.claim("Nic"), "Nic");
        assert_eq!(registry.claim_canonical("Nic"), Canonical::Claimed("Nic2".into()));
        assert_eq!(registry.claim_canonical("Nic"), Canonical::Shared("Nic2".into()));
        assert_eq!(registry.claim("Nic"), "Nic3");
    }

    #[test]
    fn canonical_type_names() {
        assert_eq!(canonical_type_name("egressrule"), "EgressRule");
        assert_eq!(canonical_type_name("ingressrule"), "IngressRule");
        assert_eq!(canonical_type_name("rule"), "Rule");
        assert_eq!(canonical_type_name("nic"), "Nic");
        assert_eq!(canonical_type_name("tags"), "Tags");
    }

    #[test]
    fn canonical_fields() {
        assert!(is_canonical_field("egressrule"));
        assert!(is_canonical_field("ingressrule"));
        assert!(is_canonical_field("nic"));
        assert!(is_canonical_field("tags"));
        assert!(!is_canonical_field("nics"));
        assert!(!is_canonical_field("details"));
    }
}
