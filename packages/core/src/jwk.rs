//! Public key export as a JSON Web Key (RFC 8037 `OKP` / `Ed25519`).
//!
//! This is the document the user publishes for verifiers to fetch:
//!
//! ```json
//! {
//!   "kty": "OKP",
//!   "crv": "Ed25519",
//!   "x": "11qYAYKxCrfVS_7TyWQHOg7hcvPapiMlrwIaaPcHURo",
//!   "alg": "EdDSA",
//!   "use": "sig"
//! }
//! ```
//!
//! `x` is base64url *without* padding. Token signatures use standard padded
//! base64 instead; the two must not be mixed up.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const KEY_TYPE: &str = "OKP";
pub const CURVE: &str = "Ed25519";
pub const ALGORITHM: &str = "EdDSA";
pub const KEY_USE: &str = "sig";

/// The exported, shareable form of an Ed25519 public key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyRecord {
    pub kty: String,
    pub crv: String,
    /// Raw public key bytes, base64url without padding.
    pub x: String,
    pub alg: String,
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub key_use: Option<String>,
}

impl PublicKeyRecord {
    /// Parse a JWK document, e.g. one fetched from the published location.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::MalformedKey(format!("invalid JWK JSON: {e}")))
    }

    /// Two-space indented JSON, ready to paste.
    pub fn to_json_pretty(&self) -> String {
        // Serialising a struct of plain strings cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Export `key` as a JWK. Total and deterministic.
pub fn to_jwk(key: &VerifyingKey) -> PublicKeyRecord {
    PublicKeyRecord {
        kty: KEY_TYPE.into(),
        crv: CURVE.into(),
        x: URL_SAFE_NO_PAD.encode(key.as_bytes()),
        alg: ALGORITHM.into(),
        key_use: Some(KEY_USE.into()),
    }
}

/// Recover the public key from a JWK.
///
/// Rejects records whose `kty`, `crv` or `alg` differ from the Ed25519
/// constants, and any `x` that is not exactly 32 bytes of unpadded
/// base64url encoding a valid curve point.
pub fn from_jwk(record: &PublicKeyRecord) -> Result<VerifyingKey> {
    expect_tag("kty", &record.kty, KEY_TYPE)?;
    expect_tag("crv", &record.crv, CURVE)?;
    expect_tag("alg", &record.alg, ALGORITHM)?;

    let raw = URL_SAFE_NO_PAD
        .decode(&record.x)
        .map_err(|e| Error::MalformedKey(format!("x is not base64url: {e}")))?;
    let bytes: [u8; 32] = raw
        .try_into()
        .map_err(|v: Vec<u8>| Error::MalformedKey(format!("x must decode to 32 bytes, got {}", v.len())))?;

    VerifyingKey::from_bytes(&bytes)
        .map_err(|e| Error::MalformedKey(format!("x is not a valid Ed25519 point: {e}")))
}

fn expect_tag(field: &str, got: &str, want: &str) -> Result<()> {
    if got == want {
        Ok(())
    } else {
        Err(Error::MalformedKey(format!("{field} must be {want:?}, got {got:?}")))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
