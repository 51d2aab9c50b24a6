//! Ed25519 signing and verification of UTF-8 messages.
//!
//! The message is signed as its raw UTF-8 bytes: no length prefix, no
//! pre-hash. Ed25519 is deterministic, so the same key and message always
//! give the same signature.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};

use crate::error::{Error, Result};
use crate::keys::KeyPair;

pub use ed25519_dalek::{PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};

/// Sign `message` with the private half of `key`.
pub fn sign(key: &KeyPair, message: &str) -> [u8; SIGNATURE_LENGTH] {
    key.sign_bytes(message.as_bytes())
}

/// Check `signature` over `message` against raw public key bytes.
///
/// A wrong key, a tampered message, or a corrupted signature all give
/// `Ok(false)`. So does a 32-byte buffer that is not a curve point. Only
/// buffers of the wrong length are [`Error::InvalidEncoding`].
pub fn verify(public_key: &[u8], message: &str, signature: &[u8]) -> Result<bool> {
    let key_bytes: &[u8; PUBLIC_KEY_LENGTH] = public_key.try_into().map_err(|_| {
        Error::InvalidEncoding(format!(
            "public key must be {PUBLIC_KEY_LENGTH} bytes, got {}",
            public_key.len()
        ))
    })?;
    let sig_bytes: &[u8; SIGNATURE_LENGTH] = signature.try_into().map_err(|_| {
        Error::InvalidEncoding(format!(
            "signature must be {SIGNATURE_LENGTH} bytes, got {}",
            signature.len()
        ))
    })?;

    let Ok(verifying_key) = VerifyingKey::from_bytes(key_bytes) else {
        tracing::debug!("public key bytes are not a valid Ed25519 point");
        return Ok(false);
    };
    Ok(verify_with_key(&verifying_key, message, sig_bytes))
}

/// Typed variant of [`verify`] for callers already holding a [`VerifyingKey`].
pub fn verify_with_key(
    public_key: &VerifyingKey,
    message: &str,
    signature: &[u8; SIGNATURE_LENGTH],
) -> bool {
    // Comparison happens inside ed25519-dalek in constant time.
    let signature = Signature::from_bytes(signature);
    public_key.verify(message.as_bytes(), &signature).is_ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_then_verify_succeeds() {
        let key = KeyPair::generate();
        let sig = sign(&key, "https://example.com/me");
        assert!(verify(&key.public_key_bytes(), "https://example.com/me", &sig).unwrap());
    }

    #[test]
    fn signing_is_deterministic() {
        let key = KeyPair::generate();
        assert_eq!(sign(&key, "hello"), sign(&key, "hello"));
    }

    #[test]
    fn rfc8032_test_vector_1() {
        // RFC 8032 §7.1 TEST 1: empty message.
        let seed: [u8; 32] = [
            0x9d, 0x61, 0xb1, 0x9d, 0xef, 0xfd, 0x5a, 0x60, 0xba, 0x84, 0x4a, 0xf4, 0x92, 0xec,
            0x2c, 0xc4, 0x44, 0x49, 0xc5, 0x69, 0x7b, 0x32, 0x69, 0x19, 0x70, 0x3b, 0xac, 0x03,
            0x1c, 0xae, 0x7f, 0x60,
        ];
        let sig = sign(&KeyPair::from_seed(&seed), "");
        assert_eq!(&sig[..4], &[0xe5u8, 0x56, 0x43, 0x00]);
        assert_eq!(&sig[60..], &[0x8eu8, 0x7a, 0x10, 0x0b]);
    }

    #[test]
    fn different_message_fails() {
        let key = KeyPair::generate();
        let sig = sign(&key, "https://example.com/me");
        assert!(!verify(&key.public_key_bytes(), "https://example.com/you", &sig).unwrap());
    }

    #[test]
    fn wrong_key_fails() {
        let key = KeyPair::generate();
        let other = KeyPair::generate();
        let sig = sign(&key, "msg");
        assert!(!verify(&other.public_key_bytes(), "msg", &sig).unwrap());
    }

    #[test]
    fn flipped_signature_bit_fails_without_error() {
        let key = KeyPair::generate();
        let mut sig = sign(&key, "msg");
        sig[10] ^= 0x01;
        assert_eq!(verify(&key.public_key_bytes(), "msg", &sig).unwrap(), false);
    }

    #[test]
    fn all_zero_signature_is_false() {
        let key = KeyPair::generate();
        assert!(!verify(&key.public_key_bytes(), "msg", &[0u8; 64]).unwrap());
    }

    #[test]
    fn short_signature_is_invalid_encoding() {
        let key = KeyPair::generate();
        let result = verify(&key.public_key_bytes(), "msg", &[0u8; 63]);
        assert!(matches!(result, Err(Error::InvalidEncoding(_))));
    }

    #[test]
    fn short_key_is_invalid_encoding() {
        let result = verify(&[0u8; 31], "msg", &[0u8; 64]);
        assert!(matches!(result, Err(Error::InvalidEncoding(_))));
    }

    #[test]
    fn non_ascii_message_roundtrips() {
        let key = KeyPair::generate();
        let msg = "https://example.com/ユーザー/ñandú";
        let sig = sign(&key, msg);
        assert!(verify_with_key(&key.public_key(), msg, &sig));
    }
}
