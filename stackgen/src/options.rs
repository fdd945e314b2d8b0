//! Scoping options applied to lookup helper calls.

use crate::params::QueryParams;

/// A scoping option added to a listing query.
///
/// Options configured on the client with
/// [`default_option`](crate::CloudStackClientBuilder::default_option) are
/// applied first, then the options passed to the helper call, so a caller
/// can override a default by passing the same key again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOption {
    /// Restrict to a project id (`projectid`).
    Project(String),
    /// Restrict to a domain id (`domainid`).
    Domain(String),
    /// Restrict to a zone id (`zoneid`).
    Zone(String),
    /// Restrict to an account name (`account`).
    Account(String),
    /// Any other key/value pair.
    Custom(String, String),
}

impl ListOption {
    /// The query key this option sets.
    pub fn key(&self) -> &str {
        match self {
            Self::Project(_) => "projectid",
            Self::Domain(_) => "domainid",
            Self::Zone(_) => "zoneid",
            Self::Account(_) => "account",
            Self::Custom(key, _) => key,
        }
    }

    /// The value this option sets.
    pub fn value(&self) -> &str {
        match self {
            Self::Project(v) | Self::Domain(v) | Self::Zone(v) | Self::Account(v) => v,
            Self::Custom(_, v) => v,
        }
    }

    /// Writes this option into a query.
    pub fn apply_to(&self, params: &mut QueryParams) {
        params.set(self.key(), self.value());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys() {
        assert_eq!(ListOption::Project("p".into()).key(), "projectid");
        assert_eq!(ListOption::Domain("d".into()).key(), "domainid");
        assert_eq!(ListOption::Zone("z".into()).key(), "zoneid");
        assert_eq!(ListOption::Account("a".into()).key(), "account");
        assert_eq!(ListOption::Custom("listall".into(), "true".into()).key(), "listall");
    }

    #[test]
    fn test_later_option_overrides_earlier() {
        let mut params = QueryParams::new();
        params.apply(&[
            ListOption::Zone("z1".into()),
            ListOption::Custom("zoneid".into(), "z2".into()),
        ]);
        assert_eq!(params.get("zoneid"), Some("z2"));
    }
}
