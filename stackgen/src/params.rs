//! Query parameter sets and their flat encoding rules.
//!
//! Every command is sent as a flat set of `key=value` pairs. Structured
//! values are flattened here so generated builders and hand-written callers
//! share one encoder:
//!
//! - scalars are stringified canonically
//! - lists are comma-joined
//! - maps become positional buckets whose key layout depends on a [`MapRole`]
//! - lists of maps become one bucket per element

use std::collections::BTreeMap;
use std::fmt::Display;

use crate::options::ListOption;

/// Semantic role of a key/value map parameter.
///
/// Each role writes a bucket with its own fixed pair of sub-keys, so the
/// server can decode the flattened form unambiguously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapRole {
    /// Generic `name[i].key` / `name[i].value` pairs.
    KeyValue,
    /// Resource tags. Same layout as [`MapRole::KeyValue`]; with
    /// `drop_empty_values` an empty value is omitted so the server matches
    /// by key alone.
    Tags {
        /// Omit `.value` when the value is empty.
        drop_empty_values: bool,
    },
    /// `name[i].account` / `name[i].group`.
    AccountGroup,
    /// `name[i].service` / `name[i].provider`.
    ServiceProvider,
    /// `name[i].nic` / `name[i].network`.
    NicNetwork,
    /// `name[i].nic` / `name[i].ip`.
    NicIp,
    /// `name[i].disk` / `name[i].diskOffering`.
    DiskOffering,
}

impl MapRole {
    /// The sub-keys used for the entry key and entry value in each bucket.
    pub fn sub_keys(&self) -> (&'static str, &'static str) {
        match self {
            Self::KeyValue | Self::Tags { .. } => ("key", "value"),
            Self::AccountGroup => ("account", "group"),
            Self::ServiceProvider => ("service", "provider"),
            Self::NicNetwork => ("nic", "network"),
            Self::NicIp => ("nic", "ip"),
            Self::DiskOffering => ("disk", "diskOffering"),
        }
    }
}

/// Bucket indexing convention for map parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexMode {
    /// One bucket per entry, indexed `0..n`.
    #[default]
    Sequential,
    /// Every entry shares bucket `0` and is written `name[0].<key>=<value>`.
    ZeroCollapsed,
}

/// A flat, sorted set of query parameters.
///
/// Keys are unique; setting an existing key replaces its value. Iteration
/// and [`encode`](QueryParams::encode) are always in sorted key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: BTreeMap<String, String>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a string value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Sets a boolean as `true` / `false`.
    pub fn set_bool(&mut self, key: impl Into<String>, value: bool) {
        self.set(key, value.to_string());
    }

    /// Sets an integer in decimal.
    pub fn set_int(&mut self, key: impl Into<String>, value: i64) {
        self.set(key, value.to_string());
    }

    /// Sets a float using its shortest round-trip form.
    pub fn set_float(&mut self, key: impl Into<String>, value: f64) {
        self.set(key, value.to_string());
    }

    /// Sets a list as a comma-joined string.
    ///
    /// An empty list is not written.
    pub fn set_list<T: Display>(&mut self, key: impl Into<String>, values: &[T]) {
        if values.is_empty() {
            return;
        }
        let joined = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.set(key, joined);
    }

    /// Flattens a map into positional buckets.
    ///
    /// Entries are written in sorted key order.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use stackgen::{IndexMode, MapRole, QueryParams};
    ///
    /// let details = BTreeMap::from([("a".to_string(), "1".to_string())]);
    /// let mut params = QueryParams::new();
    /// params.set_map("details", &details, MapRole::KeyValue, IndexMode::Sequential);
    /// assert_eq!(params.encode(), "details[0].key=a&details[0].value=1");
    /// ```
    pub fn set_map(
        &mut self,
        name: &str,
        map: &BTreeMap<String, String>,
        role: MapRole,
        mode: IndexMode,
    ) {
        match mode {
            IndexMode::ZeroCollapsed => {
                for (k, v) in map {
                    self.set(format!("{name}[0].{k}"), v.as_str());
                }
            }
            IndexMode::Sequential => {
                let (key_field, value_field) = role.sub_keys();
                for (i, (k, v)) in map.iter().enumerate() {
                    self.set(format!("{name}[{i}].{key_field}"), k.as_str());
                    if v.is_empty() && matches!(role, MapRole::Tags { drop_empty_values: true }) {
                        continue;
                    }
                    self.set(format!("{name}[{i}].{value_field}"), v.as_str());
                }
            }
        }
    }

    /// Flattens a list of maps, one bucket per element.
    pub fn set_map_list(&mut self, name: &str, items: &[BTreeMap<String, String>]) {
        for (i, item) in items.iter().enumerate() {
            for (k, v) in item {
                self.set(format!("{name}[{i}].{k}"), v.as_str());
            }
        }
    }

    /// Applies list options in order; later options win.
    pub fn apply(&mut self, options: &[ListOption]) {
        for option in options {
            option.apply_to(self);
        }
    }

    /// Returns the value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Removes a key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Returns `true` if the key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates parameters in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serializes as `k=escape(v)` pairs in sorted key order joined by `&`.
    ///
    /// Keys are written verbatim; only values are escaped.
    pub fn encode(&self) -> String {
        self.values
            .iter()
            .map(|(k, v)| format!("{k}={}", escape(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.set(k, v);
        }
        params
    }
}

/// Form-escapes a value with spaces written as `%20`.
pub fn escape(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_scalars() {
        let mut params = QueryParams::new();
        params.set_bool("forced", true);
        params.set_int("size", -20);
        params.set_float("ratio", 0.1);
        params.set_float("whole", 2.0);
        assert_eq!(params.get("forced"), Some("true"));
        assert_eq!(params.get("size"), Some("-20"));
        assert_eq!(params.get("ratio"), Some("0.1"));
        assert_eq!(params.get("whole"), Some("2"));
    }

    #[test]
    fn test_list_is_comma_joined() {
        let mut params = QueryParams::new();
        params.set_list("ids", &["a", "b", "c"]);
        params.set_list("nums", &[1_i64, 2]);
        params.set_list::<String>("empty", &[]);
        assert_eq!(params.get("ids"), Some("a,b,c"));
        assert_eq!(params.get("nums"), Some("1,2"));
        assert!(!params.contains("empty"));
    }

    #[test]
    fn test_details_sequential() {
        let mut params = QueryParams::new();
        params.set_map(
            "details",
            &map(&[("b", "2"), ("a", "1")]),
            MapRole::KeyValue,
            IndexMode::Sequential,
        );
        assert_eq!(
            params.encode(),
            "details[0].key=a&details[0].value=1&details[1].key=b&details[1].value=2"
        );
    }

    #[test]
    fn test_details_zero_collapsed() {
        let mut params = QueryParams::new();
        params.set_map(
            "details",
            &map(&[("b", "2"), ("a", "1")]),
            MapRole::KeyValue,
            IndexMode::ZeroCollapsed,
        );
        assert_eq!(params.encode(), "details[0].a=1&details[0].b=2");
    }

    #[test]
    fn test_role_layouts() {
        let cases = [
            (MapRole::AccountGroup, "account", "group"),
            (MapRole::ServiceProvider, "service", "provider"),
            (MapRole::NicNetwork, "nic", "network"),
            (MapRole::NicIp, "nic", "ip"),
            (MapRole::DiskOffering, "disk", "diskOffering"),
        ];
        for (role, key_field, value_field) in cases {
            let mut params = QueryParams::new();
            params.set_map("l", &map(&[("k", "v")]), role, IndexMode::Sequential);
            assert_eq!(params.get(&format!("l[0].{key_field}")), Some("k"));
            assert_eq!(params.get(&format!("l[0].{value_field}")), Some("v"));
            assert_eq!(params.len(), 2);
        }
    }

    #[test]
    fn test_delete_tags_drops_empty_value() {
        let tags = map(&[("env", ""), ("owner", "ops")]);

        let mut params = QueryParams::new();
        params.set_map(
            "tags",
            &tags,
            MapRole::Tags { drop_empty_values: true },
            IndexMode::Sequential,
        );
        assert_eq!(params.get("tags[0].key"), Some("env"));
        assert!(!params.contains("tags[0].value"));
        assert_eq!(params.get("tags[1].value"), Some("ops"));

        let mut params = QueryParams::new();
        params.set_map(
            "tags",
            &tags,
            MapRole::Tags { drop_empty_values: false },
            IndexMode::Sequential,
        );
        assert_eq!(params.get("tags[0].value"), Some(""));
    }

    #[test]
    fn test_map_list() {
        let mut params = QueryParams::new();
        params.set_map_list(
            "iptonetworklist",
            &[
                map(&[("networkid", "n1"), ("ip", "10.0.0.5")]),
                map(&[("networkid", "n2")]),
            ],
        );
        assert_eq!(
            params.encode(),
            "iptonetworklist[0].ip=10.0.0.5&iptonetworklist[0].networkid=n1&iptonetworklist[1].networkid=n2"
        );
    }

    #[test]
    fn test_encode_escapes_values_only() {
        let params: QueryParams = [("displaytext", "my vm+1"), ("name", "a/b")]
            .into_iter()
            .collect();
        assert_eq!(params.encode(), "displaytext=my%20vm%2B1&name=a%2Fb");
    }
}
