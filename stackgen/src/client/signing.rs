//! Request signing.
//!
//! The signature is an HMAC-SHA1 over the lowercased, key-sorted query
//! string (values escaped, keys verbatim), base64 encoded.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::ClientError;
use crate::params::QueryParams;

type HmacSha1 = Hmac<Sha1>;

/// Signature scheme version sent with every request.
pub const SIGNATURE_VERSION: &str = "3";

/// How long a signed request stays valid.
pub const EXPIRY_MINUTES: i64 = 15;

/// Returns the `expires` value for a request signed at `now`.
pub fn expiry(now: DateTime<Utc>) -> String {
    (now + Duration::minutes(EXPIRY_MINUTES)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Adds the fixed signing parameters to a command's parameters.
pub fn prepare(
    params: &mut QueryParams,
    command: &str,
    api_key: &str,
    now: DateTime<Utc>,
) {
    params.set("apiKey", api_key);
    params.set("command", command);
    params.set("response", "json");
    params.set("signatureversion", SIGNATURE_VERSION);
    params.set("expires", expiry(now));
}

/// Computes the signature over a complete parameter set.
pub fn sign(params: &QueryParams, secret: &str) -> Result<String, ClientError> {
    let canonical = params.encode().to_lowercase();
    let mut mac = HmacSha1::new_from_slice(secret.as_bytes())
        .map_err(|e| ClientError::Signing(e.to_string()))?;
    mac.update(canonical.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}
