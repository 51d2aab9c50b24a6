//! Error type shared by every SigTail operation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by key handling, token parsing, and persistence.
///
/// A cryptographic mismatch during verification is *not* an error; the
/// verify functions return `false` for that case.
#[derive(Debug, Error)]
pub enum Error {
    /// No key material exists at the given path (load before generate).
    #[error("no key found at {}", .0.display())]
    KeyNotFound(PathBuf),

    /// Key bytes or a key document failed to decode as Ed25519.
    #[error("malformed key: {0}")]
    MalformedKey(String),

    /// The string does not follow `sigtail:<location>::<base64 signature>`.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// A fixed-size key or signature buffer had the wrong length.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    /// The location is still the "not yet configured" placeholder.
    #[error("public key location is not configured")]
    LocationUnset,

    /// The location id contains `::` or ends in `:`, so a token built from
    /// it would not decode back to the same id.
    #[error("location id {0:?} would run into the token separator \"::\"")]
    LocationContainsSeparator(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
