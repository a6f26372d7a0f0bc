//! Error types for cryptographic primitives

use thiserror::Error;

/// Errors from the primitive layer.
///
/// These never cross the token API directly; `paytoken-core` classifies each
/// one into its public error taxonomy at the component boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Private key could not be parsed from any accepted encoding
    #[error("invalid private key: {reason}")]
    InvalidPrivateKey {
        /// Why parsing failed
        reason: String,
    },

    /// Ephemeral public key is not a valid uncompressed P-256 point
    #[error("invalid ephemeral public key: {reason}")]
    InvalidPublicPoint {
        /// Why parsing failed
        reason: String,
    },

    /// Verification key is not a DER-encoded P-256 public key
    #[error("invalid verification key: {reason}")]
    InvalidVerificationKey {
        /// Why parsing failed
        reason: String,
    },

    /// Signature bytes are not a DER-encoded ECDSA signature
    #[error("malformed signature: {reason}")]
    MalformedSignature {
        /// Why parsing failed
        reason: String,
    },

    /// Signature is well-formed but does not match the message
    #[error("signature verification failed")]
    SignatureMismatch,

    /// Symmetric key has the wrong size for the cipher
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Required key size
        expected: usize,
        /// Supplied key size
        actual: usize,
    },

    /// Detached authentication tag has the wrong size
    #[error("invalid tag length: expected {expected} bytes, got {actual}")]
    InvalidTagLength {
        /// Required tag size
        expected: usize,
        /// Supplied tag size
        actual: usize,
    },

    /// AEAD tag did not authenticate the ciphertext
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Requested more HKDF output than SHA-256 can expand to
    #[error("requested {requested} bytes of key material, maximum is {max}")]
    OutputTooLong {
        /// Requested output length
        requested: usize,
        /// Largest permitted output length
        max: usize,
    },
}
