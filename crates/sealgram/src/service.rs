//! Public facade composing key derivation, sealing, and envelope coding
//!
//! This is the only operational surface of the crate. Each call is
//! synchronous, stateless, and independent of every other call; the only
//! shared resource is the OS CSPRNG, which is safe for concurrent draws.

use crate::{
    cipher::{self, NONCE_SIZE},
    envelope::{Envelope, FORMAT_VERSION},
    error::SealError,
    kdf::{self, SALT_SIZE},
};

/// Encrypt a message for a chat.
///
/// Draws a fresh random salt and nonce for every call, so encrypting the
/// same message twice for the same chat produces two different outputs.
/// The salt travels inside the envelope; it is not secret.
///
/// Returns the base64-encoded envelope. Callers own its storage and
/// delivery and should treat it as opaque.
///
/// # Errors
///
/// - `InvalidInput` if `plain_text` or `chat_id` is empty, checked before
///   any cryptographic work
pub fn encrypt(plain_text: &str, chat_id: &str) -> Result<String, SealError> {
    if plain_text.is_empty() {
        return Err(SealError::InvalidInput { reason: "plaintext must not be empty" });
    }
    if chat_id.is_empty() {
        return Err(SealError::InvalidInput { reason: "chat id must not be empty" });
    }

    let mut salt = [0u8; SALT_SIZE];
    random_bytes(&mut salt);

    let key = kdf::derive(chat_id, &salt)?;

    let mut nonce = [0u8; NONCE_SIZE];
    random_bytes(&mut nonce);

    let (ciphertext, tag) = cipher::seal(plain_text.as_bytes(), &key, &nonce, chat_id.as_bytes());

    let envelope = Envelope { version: FORMAT_VERSION, salt, nonce, tag, ciphertext };

    tracing::debug!(plaintext_len = plain_text.len(), version = FORMAT_VERSION, "sealed message");

    Ok(envelope.encode())
}

/// Decrypt an encoded message for a chat.
///
/// The envelope is structurally validated first, then the key is re-derived
/// from the embedded salt, then the authentication tag is verified. No
/// plaintext is released on any failure.
///
/// # Errors
///
/// - `InvalidInput` if `encoded` or `chat_id` is empty
/// - `MalformedEnvelope` if `encoded` is not a well-formed envelope (corrupt
///   or foreign format, or a version this build does not recognize)
/// - `AuthenticationFailed` if the tag does not verify. A wrong chat id and
///   tampered ciphertext are deliberately indistinguishable
pub fn decrypt(encoded: &str, chat_id: &str) -> Result<String, SealError> {
    if encoded.is_empty() {
        return Err(SealError::InvalidInput { reason: "encoded message must not be empty" });
    }
    if chat_id.is_empty() {
        return Err(SealError::InvalidInput { reason: "chat id must not be empty" });
    }

    let envelope = Envelope::decode(encoded)?;

    // decode() guarantees the version is recognized; version 1 selects the
    // Argon2id/ChaCha20-Poly1305 parameters used below
    let key = kdf::derive(chat_id, &envelope.salt)?;

    let plaintext =
        cipher::open(&envelope.ciphertext, &envelope.tag, &key, &envelope.nonce, chat_id.as_bytes())
            .inspect_err(|_| {
                tracing::debug!(version = envelope.version, "rejected message");
            })?;

    String::from_utf8(plaintext)
        .map_err(|_| SealError::MalformedEnvelope { reason: "plaintext is not valid UTF-8" })
}

/// Fill a buffer from the OS cryptographic RNG.
///
/// # Panics
///
/// Panics if the OS RNG fails. This is intentional - encryption without
/// functioning cryptographic randomness would silently reuse salts and
/// nonces, which is worse than stopping. RNG failure is extremely rare and
/// indicates OS-level issues.
#[allow(clippy::expect_used)]
fn random_bytes(buffer: &mut [u8]) {
    getrandom::fill(buffer)
        .expect("invariant: OS RNG failure is unrecoverable - cannot encrypt securely");
}
