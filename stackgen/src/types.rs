//! Hand-written response types shared by every generated client.
//!
//! These shapes appear as field types in several commands but are never
//! derived from the catalog.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status of an async job, as returned by `queryAsyncJobResult`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AsyncJobResult {
    #[serde(default, deserialize_with = "crate::de::string_or_number")]
    pub jobid: String,
    /// `0` pending, `1` succeeded, `2` failed.
    #[serde(default)]
    pub jobstatus: i32,
    #[serde(default)]
    pub jobprocstatus: i32,
    #[serde(default)]
    pub jobresultcode: i32,
    /// `"object"` or `"text"`.
    #[serde(default)]
    pub jobresulttype: String,
    #[serde(default)]
    pub jobresult: Value,
    #[serde(default)]
    pub jobinstancetype: String,
    #[serde(default)]
    pub jobinstanceid: String,
    #[serde(default)]
    pub cmd: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub completed: String,
    #[serde(default)]
    pub accountid: String,
    #[serde(default)]
    pub userid: String,
}

impl AsyncJobResult {
    /// Job is still running.
    pub const PENDING: i32 = 0;
    /// Job finished successfully.
    pub const SUCCEEDED: i32 = 1;
    /// Job failed.
    pub const FAILED: i32 = 2;

    pub fn is_pending(&self) -> bool {
        self.jobstatus == Self::PENDING
    }
}

/// Out-of-band management (IPMI and friends) configuration of a host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutOfBandManagementResponse {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub driver: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub hostid: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub port: String,
    #[serde(default)]
    pub powerstate: String,
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub username: String,
}

/// High-availability settings of a host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HaForHostResponse {
    #[serde(default)]
    pub haenable: bool,
    #[serde(default)]
    pub haprovider: String,
    #[serde(default)]
    pub hastate: String,
    #[serde(default)]
    pub hostid: String,
    #[serde(default)]
    pub status: bool,
}

/// Websocket endpoint for a VM console session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleEndpointWebsocketResponse {
    #[serde(default)]
    pub extra: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub port: String,
    #[serde(default)]
    pub token: String,
}
