//! Tolerant field decoders used by generated response types.
//!
//! Some fields changed JSON shape over the protocol's history. Generated
//! types attach these with `#[serde(deserialize_with = "...")]`.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Decodes a string field that may be sent as a JSON number.
///
/// `null` decodes to an empty string.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "expected a string or number, got: {other}"
        ))),
    }
}

/// Decodes a boolean that may be sent as the string `"true"` / `"false"`.
///
/// Synchronous responses send `success` as a string, async job results send
/// a native boolean.
pub fn bool_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(b) => Ok(b),
        Value::String(s) => s
            .parse::<bool>()
            .map_err(|_| de::Error::custom(format!("invalid boolean string: {s:?}"))),
        Value::Null => Ok(false),
        other => Err(de::Error::custom(format!(
            "expected a boolean or string, got: {other}"
        ))),
    }
}

/// Decodes a sequence that may be sent as a single object.
pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(de::Error::custom))
            .collect(),
        single => serde_json::from_value(single)
            .map(|item| vec![item])
            .map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "string_or_number")]
        ostypeid: String,
        #[serde(default, deserialize_with = "bool_or_string")]
        success: bool,
        #[serde(default, deserialize_with = "one_or_many")]
        nic: Vec<Nic>,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Nic {
        id: String,
    }

    #[test]
    fn test_ostypeid_number_or_string() {
        let a: Sample = serde_json::from_value(json!({"ostypeid": 142})).unwrap();
        let b: Sample = serde_json::from_value(json!({"ostypeid": "142"})).unwrap();
        assert_eq!(a.ostypeid, "142");
        assert_eq!(a.ostypeid, b.ostypeid);
    }

    #[test]
    fn test_success_string_or_bool() {
        let a: Sample = serde_json::from_value(json!({"success": "true"})).unwrap();
        let b: Sample = serde_json::from_value(json!({"success": true})).unwrap();
        let c: Sample = serde_json::from_value(json!({"success": "false"})).unwrap();
        assert!(a.success);
        assert!(b.success);
        assert!(!c.success);
        assert!(serde_json::from_value::<Sample>(json!({"success": "yes"})).is_err());
    }

    #[test]
    fn test_missing_fields_default() {
        let s: Sample = serde_json::from_value(json!({})).unwrap();
        assert_eq!(s.ostypeid, "");
        assert!(!s.success);
        assert!(s.nic.is_empty());
    }

    #[test]
    fn test_single_object_becomes_vec() {
        let s: Sample = serde_json::from_value(json!({"nic": {"id": "n1"}})).unwrap();
        assert_eq!(s.nic, vec![Nic { id: "n1".into() }]);
        let s: Sample = serde_json::from_value(json!({"nic": [{"id": "n1"}, {"id": "n2"}]})).unwrap();
        assert_eq!(s.nic.len(), 2);
    }
}
