//! Pure verifier-side helpers.
//!
//! A verifier sees a token on some profile page, fetches the JWK from
//! [`LocationId::raw_url`](crate::LocationId::raw_url) (that HTTP request is
//! the host's job), and then checks the signature against the page URL.
//! Everything after the fetch lives here.

use url::Url;

use crate::assertion::Assertion;
use crate::error::Result;
use crate::jwk::{self, PublicKeyRecord};

/// The message a page's tokens are checked against.
///
/// Origin plus path; query and fragment are dropped, and a single trailing
/// `/` is removed unless the path is the root.
///
/// ```text
/// https://x.com/YourHandle/?ref=bio#top  ->  https://x.com/YourHandle
/// https://example.com/                   ->  https://example.com/
/// ```
pub fn page_message(page_url: &str) -> Result<String> {
    let url = Url::parse(page_url)?;
    let origin = url.origin().ascii_serialization();
    let path = url.path();

    let path = match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => path,
    };
    Ok(format!("{origin}{path}"))
}

/// Verify `assertion` over `message` with a fetched JWK document.
///
/// Returns [`Error::MalformedKey`](crate::Error::MalformedKey) if the
/// document is not an Ed25519 JWK; a signature mismatch is `Ok(false)`.
pub fn verify_with_jwk(jwk_json: &str, assertion: &Assertion, message: &str) -> Result<bool> {
    let record = PublicKeyRecord::from_json(jwk_json)?;
    let public_key = jwk::from_jwk(&record)?;
    let valid = assertion.verify(&public_key, message);
    tracing::debug!(location = %assertion.location(), valid, "assertion checked");
    Ok(valid)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
