//! Sealgram: per-chat authenticated message encryption
//!
//! Encrypts individual chat messages under a key derived from the chat
//! identifier, producing a self-describing, base64-encoded envelope that can
//! be stored or transported by the caller.
//!
//! # Message Lifecycle
//!
//! ```text
//! chat id + random salt
//!        │
//!        ▼ Argon2id
//! Derived Key (32 bytes, zeroized after use)
//!        │
//!        ▼ ChaCha20-Poly1305 (fresh random nonce, chat id as AAD)
//! (ciphertext, tag)
//!        │
//!        ▼ Envelope encode
//! version │ salt │ nonce │ tag │ ciphertext  →  base64 string
//! ```
//!
//! Decryption reverses the pipeline: the envelope is structurally validated
//! before any cryptographic work, the key is re-derived from the embedded
//! salt, and the authentication tag is verified before any plaintext is
//! released.
//!
//! # Security
//!
//! Key Derivation:
//! - Chat identifiers are low-entropy; Argon2id with a fresh per-message salt
//!   stretches them into full-entropy, cipher-compatible key material
//! - The salt travels in the envelope (not secret) and defeats precomputation
//!   across messages that share a chat id
//!
//! Authenticity:
//! - ChaCha20-Poly1305 AEAD binds ciphertext and chat id to the derived key
//! - Failed authentication tag -> reject message, release no plaintext
//! - Wrong key and corrupted data are indistinguishable to the caller
//!
//! Hygiene:
//! - Derived keys are zeroized on drop and never appear in diagnostics
//! - Envelope structure is validated before attacker-controlled bytes reach
//!   the cipher
//!
//! Out of scope: key exchange, multi-device sync, forward secrecy, and
//! metadata protection. Callers own storage and delivery of the encoded
//! string.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cipher;
mod envelope;
mod error;
mod kdf;
mod service;

pub use error::SealError;
pub use service::{decrypt, encrypt};
