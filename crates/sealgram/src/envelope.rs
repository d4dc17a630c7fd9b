//! Versioned binary envelope and its transport encoding
//!
//! Layout on the wire (before base64):
//!
//! ```text
//! [version: 1 byte] [salt: 16 bytes] [nonce: 12 bytes] [tag: 16 bytes] [ciphertext: variable]
//! ```
//!
//! Every field except the ciphertext is fixed-width, so parsing is
//! unambiguous without length prefixes. The whole buffer is then encoded with
//! standard-alphabet base64 to make it transport-safe.
//!
//! # Security
//!
//! Structural validation happens entirely before any cryptographic operation:
//! invalid base64, short buffers, and unrecognized versions are rejected here
//! so attacker-controlled garbage never reaches the cipher. The version byte
//! is the dispatch point for future KDF/cipher parameter migration - old
//! messages stay decodable when parameters change.

use base64::Engine;

use crate::{
    cipher::{NONCE_SIZE, TAG_SIZE},
    error::SealError,
    kdf::SALT_SIZE,
};

const BASE64: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;

/// Current envelope format version
pub(crate) const FORMAT_VERSION: u8 = 0x01;

/// Fixed header size: version + salt + nonce + tag (45 bytes)
const HEADER_SIZE: usize = 1 + SALT_SIZE + NONCE_SIZE + TAG_SIZE;

// Field offsets within the binary envelope
const SALT_OFFSET: usize = 1;
const NONCE_OFFSET: usize = SALT_OFFSET + SALT_SIZE;
const TAG_OFFSET: usize = NONCE_OFFSET + NONCE_SIZE;

/// Everything needed to decrypt one message, independent of transport
/// encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Envelope {
    /// Format version (selects KDF and cipher parameters)
    pub version: u8,
    /// Argon2id salt, generated fresh per encryption
    pub salt: [u8; SALT_SIZE],
    /// ChaCha20-Poly1305 nonce, generated fresh per encryption
    pub nonce: [u8; NONCE_SIZE],
    /// Detached Poly1305 authentication tag
    pub tag: [u8; TAG_SIZE],
    /// Ciphertext (same length as the plaintext)
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Serialize to the transport-safe base64 string.
    pub(crate) fn encode(&self) -> String {
        let mut bytes = Vec::with_capacity(HEADER_SIZE + self.ciphertext.len());
        bytes.push(self.version);
        bytes.extend_from_slice(&self.salt);
        bytes.extend_from_slice(&self.nonce);
        bytes.extend_from_slice(&self.tag);
        bytes.extend_from_slice(&self.ciphertext);

        BASE64.encode(bytes)
    }

    /// Parse an encoded message back into an envelope.
    ///
    /// # Errors
    ///
    /// - `MalformedEnvelope` if the base64 is invalid, the buffer is shorter
    ///   than the fixed 45-byte header, or the version byte is unrecognized
    ///
    /// # Security
    ///
    /// Validation order is cheapest-first: encoding, then length, then
    /// version. No cryptographic work happens here, so decode failures leak
    /// nothing about keys.
    pub(crate) fn decode(encoded: &str) -> Result<Self, SealError> {
        let bytes = BASE64
            .decode(encoded)
            .map_err(|_| SealError::MalformedEnvelope { reason: "invalid base64" })?;

        if bytes.len() < HEADER_SIZE {
            return Err(SealError::MalformedEnvelope { reason: "envelope shorter than header" });
        }

        let version = bytes[0];
        if version != FORMAT_VERSION {
            return Err(SealError::MalformedEnvelope { reason: "unrecognized format version" });
        }

        let mut salt = [0u8; SALT_SIZE];
        salt.copy_from_slice(&bytes[SALT_OFFSET..NONCE_OFFSET]);

        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(&bytes[NONCE_OFFSET..TAG_OFFSET]);

        let mut tag = [0u8; TAG_SIZE];
        tag.copy_from_slice(&bytes[TAG_OFFSET..HEADER_SIZE]);

        Ok(Self { version, salt, nonce, tag, ciphertext: bytes[HEADER_SIZE..].to_vec() })
    }
}
