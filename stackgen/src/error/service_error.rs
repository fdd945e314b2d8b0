//! Structured errors reported by the remote service.

use serde::Deserialize;
use thiserror::Error;

/// An error envelope returned with a non-2xx status.
///
/// The service reports failures as `{"errorcode": 431, "cserrorcode": 4350,
/// "errortext": "..."}` inside the usual `<command>response` wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Error)]
#[error("CloudStack API error {code} (CSExceptionErrorCode: {cs_code}): {text}")]
pub struct ServiceError {
    /// HTTP-like error code (e.g. 431 for invalid parameters).
    #[serde(rename = "errorcode")]
    pub code: i32,
    /// Service specific exception code.
    #[serde(rename = "cserrorcode", default)]
    pub cs_code: i32,
    /// Human readable error text.
    #[serde(rename = "errortext", default)]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_envelope_body() {
        let err: ServiceError = serde_json::from_str(
            r#"{"uuidList":[],"errorcode":431,"cserrorcode":4350,"errortext":"Unable to execute API command"}"#,
        )
        .unwrap();
        assert_eq!(err.code, 431);
        assert_eq!(err.cs_code, 4350);
        assert_eq!(err.text, "Unable to execute API command");
    }

    #[test]
    fn test_display() {
        let err = ServiceError {
            code: 530,
            cs_code: 9999,
            text: "Internal error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "CloudStack API error 530 (CSExceptionErrorCode: 9999): Internal error"
        );
    }
}
