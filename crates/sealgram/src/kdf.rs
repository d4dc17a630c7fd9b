//! Key derivation from chat identifiers using Argon2id
//!
//! Chat identifiers are low-entropy, variable-length strings. Using one
//! directly as key material would conflate an identifier with a secret and
//! yield keys of cipher-incompatible length. Argon2id with a fresh random
//! salt per message fixes both and makes precomputation across messages
//! useless.

use argon2::{Algorithm, Argon2, Params, Version};
use zeroize::Zeroize;

use crate::error::SealError;

/// Symmetric key size for ChaCha20-Poly1305 (256 bits)
pub(crate) const KEY_SIZE: usize = 32;

/// Salt size fed to Argon2id (128 bits)
pub(crate) const SALT_SIZE: usize = 16;

// Argon2id v1.3 parameters, the RFC 9106 low-memory recommendation.
// Memory: 19 MiB, Iterations: 2, Parallelism: 1.
// These are fixed for envelope format version 1; a future version byte
// selects different parameters at decode time.
const ARGON2_M_COST: u32 = 19 * 1024;
const ARGON2_T_COST: u32 = 2;
const ARGON2_P_COST: u32 = 1;

/// A symmetric key derived from a chat identifier.
///
/// Owned by a single encryption or decryption operation and discarded
/// immediately afterwards. Never logged, never persisted.
pub(crate) struct DerivedKey {
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// 32-byte symmetric key for ChaCha20-Poly1305 AEAD.
    pub(crate) fn key(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

// Implement Drop to zeroize key material
impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

// Manual Debug implementation that never reveals key bytes
impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey").finish_non_exhaustive()
    }
}

/// Derive a symmetric key from a chat identifier and a salt.
///
/// Deterministic: the same `(chat_id, salt)` pair always produces the same
/// key, which is what lets decryption re-derive the key from the salt stored
/// in the envelope.
///
/// # Errors
///
/// - `InvalidInput` if `chat_id` is empty, checked before any cryptographic
///   work
pub(crate) fn derive(chat_id: &str, salt: &[u8; SALT_SIZE]) -> Result<DerivedKey, SealError> {
    if chat_id.is_empty() {
        return Err(SealError::InvalidInput { reason: "chat id must not be empty" });
    }

    let Ok(params) = Params::new(ARGON2_M_COST, ARGON2_T_COST, ARGON2_P_COST, Some(KEY_SIZE))
    else {
        unreachable!("Argon2 parameters are fixed constants within documented bounds");
    };
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = [0u8; KEY_SIZE];
    let Ok(()) = argon2.hash_password_into(chat_id.as_bytes(), salt, &mut key) else {
        unreachable!("salt and output lengths are fixed and valid for Argon2");
    };

    Ok(DerivedKey { key })
}
