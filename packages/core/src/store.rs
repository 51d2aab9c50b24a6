//! The key store — one directory holding the installation's active keypair.
//!
//! | File | Content |
//! |------|---------|
//! | `private_key.pem` | PKCS#8 PEM private key (owner-only on Unix) |
//! | `public_jwk.json` | The public JWK to publish |
//! | `location.txt` | The saved location id |
//!
//! A [`KeyStore`] is a plain handle; nothing is cached between calls, and
//! every operation re-reads or re-writes the files. Replacing the keypair is
//! a two-step operation so that overwriting is always an explicit act:
//!
//! ```text
//! let staged = store.stage_new_keypair();     // nothing written yet
//! if staged.overwrites_existing() { /* ask the user */ }
//! let jwk = store.commit_and_overwrite(staged)?;
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::assertion;
use crate::error::{Error, Result};
use crate::jwk::{self, PublicKeyRecord};
use crate::keys::{self, KeyPair};
use crate::location::{self, LocationId};

const PRIVATE_KEY_FILE: &str = "private_key.pem";
const PUBLIC_JWK_FILE: &str = "public_jwk.json";
const LOCATION_FILE: &str = "location.txt";

/// Handle to a store directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyStore {
    root: PathBuf,
}

/// A freshly generated keypair that has not been written anywhere yet.
///
/// Dropping it discards the key. Pass it to
/// [`KeyStore::commit_and_overwrite`] to make it the active pair.
#[must_use = "a staged keypair does nothing until committed"]
#[derive(Debug)]
pub struct StagedKeypair {
    key: KeyPair,
    public_jwk: PublicKeyRecord,
    overwrites_existing: bool,
}

impl StagedKeypair {
    /// The JWK that committing will publish.
    pub fn public_jwk(&self) -> &PublicKeyRecord {
        &self.public_jwk
    }

    /// `true` if the store already held keys when this pair was staged.
    pub fn overwrites_existing(&self) -> bool {
        self.overwrites_existing
    }
}

impl KeyStore {
    /// Refer to `root` without touching the filesystem.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create `root` (and parents) if needed, then open it.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| Error::io(&root, e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn private_key_path(&self) -> PathBuf {
        self.root.join(PRIVATE_KEY_FILE)
    }

    pub fn public_jwk_path(&self) -> PathBuf {
        self.root.join(PUBLIC_JWK_FILE)
    }

    pub fn location_path(&self) -> PathBuf {
        self.root.join(LOCATION_FILE)
    }

    /// `true` if both the private key and the public JWK are present.
    pub fn has_keys(&self) -> bool {
        self.private_key_path().is_file() && self.public_jwk_path().is_file()
    }

    /// Generate a new keypair in memory. Nothing is written.
    pub fn stage_new_keypair(&self) -> StagedKeypair {
        let key = KeyPair::generate();
        let public_jwk = jwk::to_jwk(&key.public_key());
        StagedKeypair {
            key,
            public_jwk,
            overwrites_existing: self.private_key_path().exists()
                || self.public_jwk_path().exists(),
        }
    }

    /// Persist `staged` as the active keypair, replacing whatever was there.
    ///
    /// The previous pair is not kept anywhere. Returns the published JWK.
    pub fn commit_and_overwrite(&self, staged: StagedKeypair) -> Result<PublicKeyRecord> {
        fs::create_dir_all(&self.root).map_err(|e| Error::io(&self.root, e))?;

        keys::persist(&staged.key, &self.private_key_path())?;
        let json = staged.public_jwk.to_json_pretty();
        keys::write_atomic(&self.public_jwk_path(), json.as_bytes(), false)?;

        if staged.overwrites_existing {
            tracing::warn!(store = %self.root.display(), "previous keypair overwritten");
        }
        tracing::info!(store = %self.root.display(), x = %staged.public_jwk.x, "keypair committed");
        Ok(staged.public_jwk)
    }

    /// Load the active keypair from `private_key.pem`.
    pub fn load_keypair(&self) -> Result<KeyPair> {
        keys::load(&self.private_key_path())
    }

    /// Load the saved public JWK.
    pub fn load_public_jwk(&self) -> Result<PublicKeyRecord> {
        let path = self.public_jwk_path();
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(Error::KeyNotFound(path)),
            Err(e) => return Err(Error::io(path, e)),
        };
        PublicKeyRecord::from_json(&json)
    }

    /// Normalize `raw` and save it as the location id.
    ///
    /// Returns [`Error::LocationUnset`] if `raw` normalizes to the
    /// placeholder, and [`Error::LocationContainsSeparator`] for an id no
    /// token could carry. Nothing is written in either case.
    pub fn save_location(&self, raw: &str) -> Result<LocationId> {
        let id = location::normalize(raw);
        assertion::check_location(&id)?;
        fs::create_dir_all(&self.root).map_err(|e| Error::io(&self.root, e))?;
        keys::write_atomic(&self.location_path(), id.as_str().as_bytes(), false)?;
        tracing::info!(location = %id, "location saved");
        Ok(id)
    }

    /// The saved location id, or the placeholder if none was saved.
    pub fn load_location(&self) -> Result<LocationId> {
        let path = self.location_path();
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(location::normalize(&raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(LocationId::unset()),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                tracing::warn!(path = %path.display(), "location file is not UTF-8; ignoring");
                Ok(LocationId::unset())
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
