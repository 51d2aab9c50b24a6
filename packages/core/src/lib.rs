//! SigTail — offline proof that you control a public profile URL.
//!
//! A user keeps one Ed25519 keypair, publishes the public half as a JWK at
//! some location (a paste), and pastes a short token wherever they want to
//! prove ownership:
//!
//! ```text
//! sigtail:xyz789::8hA1...Q==
//!         └─────┘  └───────┘
//!       location   base64(Ed25519 signature over the profile URL)
//! ```
//!
//! The profile URL itself is not in the token. A verifier already knows it
//! (it is the page they are looking at).
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`keys`] | [`KeyPair`] generation and PKCS#8 PEM persistence |
//! | [`store`] | [`KeyStore`] directory handle with two-step key replacement |
//! | [`jwk`] | Public key export as an `OKP`/`Ed25519` JWK |
//! | [`signing`] | Sign and verify UTF-8 messages |
//! | [`location`] | Normalize where the JWK is published to a [`LocationId`] |
//! | [`assertion`] | Encode and decode the `sigtail:` token |
//! | [`scan`] | Find tokens in free text |
//! | [`verifier`] | Page-URL message derivation and JWK-based verification |
//!
//! # Quick start
//!
//! ```rust,ignore
//! use sigtail::{Assertion, KeyStore};
//!
//! let store = KeyStore::create("/tmp/sigtail")?;
//! let jwk = store.commit_and_overwrite(store.stage_new_keypair())?;
//! println!("publish this:\n{}", jwk.to_json_pretty());
//!
//! let location = store.save_location("https://pastebin.com/raw/xyz789")?;
//! let key = store.load_keypair()?;
//! let token = Assertion::issue(&key, &location, "https://example.com/me")?;
//! println!("{token}");
//! ```
//!
//! # Known gap
//!
//! The token does not carry a fingerprint of the public key. A verifier
//! that fetches the wrong document from the claimed location verifies
//! against the wrong key without noticing. The wire format is kept as is
//! for compatibility with existing tokens.

pub mod assertion;
pub mod error;
pub mod jwk;
pub mod keys;
pub mod location;
pub mod scan;
pub mod signing;
pub mod store;
pub mod verifier;

pub use assertion::Assertion;
pub use ed25519_dalek::VerifyingKey;
pub use error::{Error, Result};
pub use jwk::{from_jwk, to_jwk, PublicKeyRecord};
pub use keys::KeyPair;
pub use location::{normalize, LocationId};
pub use scan::{find_assertions, FoundAssertion};
pub use signing::{sign, verify};
pub use store::{KeyStore, StagedKeypair};
