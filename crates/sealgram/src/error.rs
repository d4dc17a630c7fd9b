//! Error types for message encryption and decryption

use thiserror::Error;

/// Errors surfaced by message encryption and decryption.
///
/// The taxonomy is deliberately coarse: a failed decryption reports only that
/// authentication failed, never whether the key was wrong or the ciphertext
/// was corrupted. Distinguishing the two would hand an attacker an oracle.
///
/// All variants are terminal for the operation that produced them. Decryption
/// failure is not transient; callers must not retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SealError {
    /// An argument failed validation before any cryptographic work
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the argument
        reason: &'static str,
    },

    /// The encoded message could not be parsed into an envelope
    #[error("malformed envelope: {reason}")]
    MalformedEnvelope {
        /// Structural problem found during decoding
        reason: &'static str,
    },

    /// The authentication tag did not verify
    ///
    /// Carries no detail: wrong key and tampered ciphertext are
    /// indistinguishable by design.
    #[error("authentication failed")]
    AuthenticationFailed,
}

impl SealError {
    /// Returns true if the error indicates a caller-side usage problem
    /// rather than bad or hostile input data.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}
