//! Location ids — where the public key document is published.
//!
//! Users paste either the bare paste id (`abc123`) or the full raw URL
//! (`https://pastebin.com/raw/abc123/`). [`normalize`] reduces both to the
//! same canonical id. Only the one host prefix is recognised.

use std::fmt;

/// The raw-text endpoint the public JWK is published under.
pub const PUBLISH_PREFIX: &str = "https://pastebin.com/raw/";

/// Stand-in id for "no location configured yet".
///
/// Never valid inside a finished token; see [`LocationId::is_unset`].
pub const UNSET_PLACEHOLDER: &str = "<pastebin_path>";

/// A canonical short identifier for the published key document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocationId(String);

impl LocationId {
    /// Wrap an id taken verbatim from a decoded token.
    pub(crate) fn from_token(id: &str) -> Self {
        Self(id.to_string())
    }

    /// The placeholder id.
    pub fn unset() -> Self {
        Self(UNSET_PLACEHOLDER.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` if this is the placeholder; callers must not finalize a token
    /// with it.
    pub fn is_unset(&self) -> bool {
        self.0 == UNSET_PLACEHOLDER
    }

    /// `https://pastebin.com/raw/<id>` — the URL a verifier fetches the JWK
    /// from. Fetching it is the verifier's business, not ours.
    pub fn raw_url(&self) -> String {
        format!("{PUBLISH_PREFIX}{}", self.0)
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LocationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Reduce a user-entered location to its canonical id.
///
/// Strips [`PUBLISH_PREFIX`], then every trailing `/`, then surrounding
/// whitespace. An empty result becomes the [`UNSET_PLACEHOLDER`]. Pure,
/// total, and idempotent.
///
/// The prefix is stripped repeatedly rather than once, so a doubled
/// prefix normalizes to the bare id.
pub fn normalize(raw: &str) -> LocationId {
    let mut id = raw.trim();
    // Repeat until stable so inputs like "abc/ /" settle in one call.
    loop {
        let next = id
            .strip_prefix(PUBLISH_PREFIX)
            .unwrap_or(id)
            .trim_end_matches(|c: char| c == '/' || c.is_whitespace())
            .trim_start();
        if next == id {
            break;
        }
        id = next;
    }

    if id.is_empty() {
        LocationId::unset()
    } else {
        LocationId(id.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
