//! Message sealing and opening using ChaCha20-Poly1305
//!
//! All functions are pure - random bytes must be provided by the caller.
//! This keeps the engine deterministic under test; the service layer owns
//! the CSPRNG.

use chacha20poly1305::{
    ChaCha20Poly1305, Nonce,
    aead::{Aead, KeyInit, Payload},
};

use crate::{error::SealError, kdf::DerivedKey};

/// ChaCha20-Poly1305 nonce size (96 bits)
pub(crate) const NONCE_SIZE: usize = 12;

/// Poly1305 tag size (128 bits)
pub(crate) const TAG_SIZE: usize = 16;

/// Encrypt a message under a derived key.
///
/// Returns the ciphertext and the detached authentication tag. The tag is
/// held separately so the envelope keeps fixed-width fields.
///
/// # Security
///
/// - The caller MUST supply a nonce drawn fresh from a CSPRNG for every call;
///   reusing a nonce under the same key breaks confidentiality and
///   authenticity
/// - `aad` (the chat identifier) is bound into the tag without being
///   encrypted, so a ciphertext cannot be replayed under another chat even if
///   the derived keys were to collide
pub(crate) fn seal(
    plaintext: &[u8],
    key: &DerivedKey,
    nonce: &[u8; NONCE_SIZE],
    aad: &[u8],
) -> (Vec<u8>, [u8; TAG_SIZE]) {
    let engine = ChaCha20Poly1305::new(key.key().into());

    let Ok(mut combined) =
        engine.encrypt(Nonce::from_slice(nonce), Payload { msg: plaintext, aad })
    else {
        unreachable!("ChaCha20-Poly1305 encryption cannot fail with valid inputs");
    };

    // The AEAD implementation appends the 16-byte tag to the ciphertext
    let tag_bytes = combined.split_off(combined.len() - TAG_SIZE);
    let mut tag = [0u8; TAG_SIZE];
    tag.copy_from_slice(&tag_bytes);

    (combined, tag)
}

/// Decrypt a message under a derived key, verifying the tag first.
///
/// No plaintext is released unless the tag verifies over the ciphertext and
/// `aad` with this key and nonce.
///
/// # Errors
///
/// - `AuthenticationFailed` if verification fails. Wrong key, tampered
///   ciphertext, tampered tag, and mismatched `aad` are deliberately
///   indistinguishable
pub(crate) fn open(
    ciphertext: &[u8],
    tag: &[u8; TAG_SIZE],
    key: &DerivedKey,
    nonce: &[u8; NONCE_SIZE],
    aad: &[u8],
) -> Result<Vec<u8>, SealError> {
    let engine = ChaCha20Poly1305::new(key.key().into());

    let mut combined = Vec::with_capacity(ciphertext.len() + TAG_SIZE);
    combined.extend_from_slice(ciphertext);
    combined.extend_from_slice(tag);

    engine
        .decrypt(Nonce::from_slice(nonce), Payload { msg: combined.as_slice(), aad })
        .map_err(|_| SealError::AuthenticationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kdf;

    fn test_key(chat_id: &str) -> DerivedKey {
        kdf::derive(chat_id, &[0x24u8; kdf::SALT_SIZE]).unwrap()
    }

    #[test]
    fn seal_open_roundtrip() {
        let key = test_key("chat-42");
        let nonce = [0xABu8; NONCE_SIZE];

        let (ciphertext, tag) = seal(b"Hello, World!", &key, &nonce, b"chat-42");
        let plaintext = open(&ciphertext, &tag, &key, &nonce, b"chat-42").unwrap();

        assert_eq!(plaintext, b"Hello, World!");
    }

    #[test]
    fn ciphertext_matches_plaintext_length() {
        let key = test_key("chat-42");
        let nonce = [0u8; NONCE_SIZE];

        let (ciphertext, _tag) = seal(b"test message", &key, &nonce, b"");

        // Tag is detached, so ciphertext and plaintext lengths match
        assert_eq!(ciphertext.len(), b"test message".len());
    }

    #[test]
    fn seal_open_large_message() {
        let key = test_key("chat-42");
        let nonce = [0xFFu8; NONCE_SIZE];
        let plaintext = vec![0x42u8; 64 * 1024]; // 64KB

        let (ciphertext, tag) = seal(&plaintext, &key, &nonce, b"chat-42");
        let opened = open(&ciphertext, &tag, &key, &nonce, b"chat-42").unwrap();

        assert_eq!(opened, plaintext);
    }

    #[test]
    fn different_nonces_produce_different_ciphertexts() {
        let key = test_key("chat-42");

        let (ct1, _) = seal(b"same plaintext", &key, &[0x00u8; NONCE_SIZE], b"");
        let (ct2, _) = seal(b"same plaintext", &key, &[0x01u8; NONCE_SIZE], b"");

        assert_ne!(ct1, ct2);
    }

    #[test]
    fn wrong_key_fails_open() {
        let key = test_key("chat-42");
        let nonce = [0u8; NONCE_SIZE];

        let (ciphertext, tag) = seal(b"secret message", &key, &nonce, b"chat-42");

        let wrong_key = test_key("chat-43");
        let result = open(&ciphertext, &tag, &wrong_key, &nonce, b"chat-42");

        assert_eq!(result, Err(SealError::AuthenticationFailed));
    }

    #[test]
    fn tampered_ciphertext_fails_open() {
        let key = test_key("chat-42");
        let nonce = [0u8; NONCE_SIZE];

        let (mut ciphertext, tag) = seal(b"original message", &key, &nonce, b"");
        ciphertext[0] ^= 0xFF;

        let result = open(&ciphertext, &tag, &key, &nonce, b"");
        assert_eq!(result, Err(SealError::AuthenticationFailed));
    }

    #[test]
    fn tampered_tag_fails_open() {
        let key = test_key("chat-42");
        let nonce = [0u8; NONCE_SIZE];

        let (ciphertext, mut tag) = seal(b"original message", &key, &nonce, b"");
        tag[0] ^= 0x01;

        let result = open(&ciphertext, &tag, &key, &nonce, b"");
        assert_eq!(result, Err(SealError::AuthenticationFailed));
    }

    #[test]
    fn mismatched_aad_fails_open() {
        let key = test_key("chat-42");
        let nonce = [0u8; NONCE_SIZE];

        let (ciphertext, tag) = seal(b"bound to a chat", &key, &nonce, b"chat-42");
        let result = open(&ciphertext, &tag, &key, &nonce, b"chat-43");

        assert_eq!(result, Err(SealError::AuthenticationFailed));
    }

    #[test]
    fn wrong_nonce_fails_open() {
        let key = test_key("chat-42");

        let (ciphertext, tag) = seal(b"message", &key, &[0x00u8; NONCE_SIZE], b"");
        let result = open(&ciphertext, &tag, &key, &[0x01u8; NONCE_SIZE], b"");

        assert_eq!(result, Err(SealError::AuthenticationFailed));
    }
}
