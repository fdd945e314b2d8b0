//! Response envelope unwrapping.
//!
//! Every response body is wrapped in an object keyed by the command, e.g.
//! `{"listzonesresponse": {"count": 1, "zone": [...]}}`. Enumeration-style
//! payloads carry a sibling `count` key next to the payload array.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ApiError, ClientError, ServiceError};

/// Strips one envelope level.
///
/// If the object has a `count` key, the first non-`count` key's array is
/// taken and its first element returned. Otherwise the first value is
/// returned as is. An empty object unwraps to an empty object.
///
/// ## Errors
///
/// Returns [`ClientError::MalformedEnvelope`] if the value is not an object
/// or a counted payload is not a non-empty array.
pub fn unwrap(value: Value) -> Result<Value, ClientError> {
    let mut map = match value {
        Value::Object(map) => map,
        other => {
            return Err(ClientError::MalformedEnvelope(format!(
                "expected a JSON object, got: {other}"
            )));
        }
    };

    if map.contains_key("count") {
        let key = map
            .keys()
            .find(|k| k.as_str() != "count")
            .cloned()
            .ok_or_else(|| ClientError::MalformedEnvelope("counted envelope has no payload".into()))?;
        return match map.remove(&key) {
            Some(Value::Array(mut items)) if !items.is_empty() => Ok(items.swap_remove(0)),
            Some(other) => Err(ClientError::MalformedEnvelope(format!(
                "expected a non-empty array under '{key}', got: {other}"
            ))),
            None => Err(ClientError::MalformedEnvelope(format!("missing '{key}'"))),
        };
    }

    match map.keys().next().cloned() {
        Some(key) => map
            .remove(&key)
            .ok_or_else(|| ClientError::MalformedEnvelope(format!("missing '{key}'"))),
        None => Ok(Value::Object(Map::new())),
    }
}

/// Unwraps one additional level by key, for commands whose payload sits
/// under a fixed nested key.
pub fn nested(value: Value, key: &str) -> Result<Value, ClientError> {
    match value {
        Value::Object(mut map) => map.remove(key).ok_or_else(|| {
            ClientError::MalformedEnvelope(format!("nested key '{key}' not found in response"))
        }),
        other => Err(ClientError::MalformedEnvelope(format!(
            "expected an object holding '{key}', got: {other}"
        ))),
    }
}

/// Parses the body of a non-2xx response.
///
/// Returns the structured service error when the body is an error envelope,
/// otherwise a raw HTTP status error carrying the body.
pub fn error_from_body(status: u16, body: &str) -> ApiError {
    let parsed = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| unwrap(v).ok())
        .and_then(|v| serde_json::from_value::<ServiceError>(v).ok());

    match parsed {
        Some(err) => err.into(),
        None => ClientError::HttpStatus {
            status,
            message: body.to_string(),
        }
        .into(),
    }
}

/// Decodes an unwrapped payload into a response type.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    Ok(serde_json::from_value(value)?)
}
