//! The portable `sigtail:` token.
//!
//! # Grammar
//!
//! ```text
//! token      := "sigtail:" locationId "::" base64(signature)
//! locationId := any characters not containing "::"
//! ```
//!
//! The signature uses *standard* base64 with padding (88 characters for a
//! 64-byte Ed25519 signature). The signed message itself is not part of
//! the token; the verifier must already know which URL it is checking.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ed25519_dalek::VerifyingKey;

use crate::error::{Error, Result};
use crate::keys::KeyPair;
use crate::location::LocationId;
use crate::signing::{self, SIGNATURE_LENGTH};

/// Fixed scheme prefix every token starts with.
pub const SCHEME: &str = "sigtail:";

/// Separator between the location id and the signature.
pub const SEPARATOR: &str = "::";

/// A decoded token: where the key lives, and the signature over the
/// (out-of-band) message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assertion {
    location: LocationId,
    signature: [u8; SIGNATURE_LENGTH],
}

impl Assertion {
    pub fn new(location: LocationId, signature: [u8; SIGNATURE_LENGTH]) -> Self {
        Self {
            location,
            signature,
        }
    }

    /// Sign `message` and bind it to `location`.
    ///
    /// # Errors
    ///
    /// - [`Error::LocationUnset`] if `location` is still the placeholder.
    /// - [`Error::LocationContainsSeparator`] if the id contains `::` or ends
    ///   in `:`, since such a token would not decode back to the same id.
    pub fn issue(key: &KeyPair, location: &LocationId, message: &str) -> Result<Self> {
        check_location(location)?;
        let signature = signing::sign(key, message);
        tracing::debug!(location = %location, "assertion issued");
        Ok(Self::new(location.clone(), signature))
    }

    pub fn location(&self) -> &LocationId {
        &self.location
    }

    pub fn signature(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.signature
    }

    /// Encode as `sigtail:<location>::<base64 signature>`.
    pub fn encode(&self) -> String {
        encode(self.location.as_str(), &self.signature)
    }

    /// Parse a token; see [`decode`].
    pub fn decode(token: &str) -> Result<Self> {
        decode(token)
    }

    /// `true` iff the signature covers `message` under `public_key`.
    pub fn verify(&self, public_key: &VerifyingKey, message: &str) -> bool {
        signing::verify_with_key(public_key, message, &self.signature)
    }
}

impl fmt::Display for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Assertion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        decode(s)
    }
}

/// Refuse ids that cannot be issued: the placeholder, and any id whose
/// token would split somewhere other than after the id.
pub(crate) fn check_location(location: &LocationId) -> Result<()> {
    if location.is_unset() {
        return Err(Error::LocationUnset);
    }
    let id = location.as_str();
    // "abc:" + "::" reads back as "abc" + ":<sig>".
    if id.contains(SEPARATOR) || id.ends_with(':') {
        return Err(Error::LocationContainsSeparator(id.to_owned()));
    }
    Ok(())
}

/// Build a token from a location id and raw signature bytes.
///
/// Total: no validation is applied. An id containing `::` produces a token
/// that decodes to a different split; use [`Assertion::issue`] for the
/// checked path.
pub fn encode(location: &str, signature: &[u8]) -> String {
    format!("{SCHEME}{location}{SEPARATOR}{}", STANDARD.encode(signature))
}

/// Parse a token back into its location id and signature.
///
/// Surrounding whitespace is ignored. The id is everything between the
/// scheme and the *first* `::`, and may be empty.
///
/// # Errors
///
/// [`Error::MalformedToken`] if the scheme or separator is missing, or the
/// tail is not padded base64 of exactly 64 bytes.
pub fn decode(token: &str) -> Result<Assertion> {
    let token = token.trim();
    let rest = token
        .strip_prefix(SCHEME)
        .ok_or_else(|| Error::MalformedToken(format!("missing {SCHEME:?} prefix")))?;
    let (location, encoded) = rest
        .split_once(SEPARATOR)
        .ok_or_else(|| Error::MalformedToken(format!("missing {SEPARATOR:?} separator")))?;

    let raw = STANDARD
        .decode(encoded)
        .map_err(|e| Error::MalformedToken(format!("signature is not base64: {e}")))?;
    let signature: [u8; SIGNATURE_LENGTH] = raw.try_into().map_err(|v: Vec<u8>| {
        Error::MalformedToken(format!(
            "signature must be {SIGNATURE_LENGTH} bytes, got {}",
            v.len()
        ))
    })?;

    Ok(Assertion::new(LocationId::from_token(location), signature))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
