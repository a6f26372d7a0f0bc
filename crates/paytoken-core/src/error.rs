//! Error types for token validation and decryption.
//!
//! One flat taxonomy with five kinds. Every lower-layer failure (base64,
//! JSON, key parsing, cipher errors) is classified into one of them at the
//! component boundary where it happens, so no foreign error type crosses the
//! public API.

use paytoken_crypto::CryptoError;
use thiserror::Error;

use crate::field::Field;

/// Errors raised while constructing or decrypting a payment token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Token data is malformed: missing field, bad base64, bad JSON, or an
    /// invalid ephemeral public key
    #[error("validation error: {reason}")]
    Validation {
        /// Human-readable reason for rejection
        reason: String,
    },

    /// No verification key matches, or the ECDSA signature does not verify
    #[error("signature error: {reason}")]
    Signature {
        /// Human-readable reason for rejection
        reason: String,
    },

    /// `protocolVersion` is present but not one this crate decodes
    #[error("unsupported protocol version: {version}. Supported versions: ECv1, ECv2")]
    UnsupportedProtocol {
        /// Version string carried by the token
        version: String,
    },

    /// Decoder was built without a recipient id or verification keys
    #[error("configuration error: {reason}")]
    Configuration {
        /// What is missing
        reason: String,
    },

    /// Private key or symmetric decryption failure
    #[error("decryption error: {reason}")]
    Decryption {
        /// Which step failed
        reason: String,
        /// Primitive failure that caused it, if any
        #[source]
        source: Option<CryptoError>,
    },
}

/// Discriminant of [`TokenError`] for callers that branch on the kind only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`TokenError::Validation`]
    Validation,
    /// See [`TokenError::Signature`]
    Signature,
    /// See [`TokenError::UnsupportedProtocol`]
    UnsupportedProtocol,
    /// See [`TokenError::Configuration`]
    Configuration,
    /// See [`TokenError::Decryption`]
    Decryption,
}

impl TokenError {
    /// Kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Signature { .. } => ErrorKind::Signature,
            Self::UnsupportedProtocol { .. } => ErrorKind::UnsupportedProtocol,
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::Decryption { .. } => ErrorKind::Decryption,
        }
    }

    /// Returns true if this error is about the token input itself.
    ///
    /// Input errors will not go away by retrying with another private key.
    /// Decryption errors may (the caller may hold several merchant keys);
    /// configuration errors are the caller's setup, not the token.
    pub fn is_token_fault(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::Signature { .. } | Self::UnsupportedProtocol { .. }
        )
    }

    pub(crate) fn missing_field(field: Field) -> Self {
        Self::Validation { reason: format!("Missing required field: {field}") }
    }

    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        Self::Validation { reason: reason.into() }
    }

    pub(crate) fn signature(reason: impl Into<String>) -> Self {
        Self::Signature { reason: reason.into() }
    }

    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration { reason: reason.into() }
    }

    /// Decryption failure; the reason reads `"{context}: {source}"`.
    pub(crate) fn decryption(context: &str, source: CryptoError) -> Self {
        Self::Decryption { reason: format!("{context}: {source}"), source: Some(source) }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn missing_field_names_the_field() {
        let err = TokenError::missing_field(Field::EphemeralPublicKey);
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("ephemeralPublicKey"));
    }

    #[test]
    fn unsupported_protocol_names_the_version() {
        let err = TokenError::UnsupportedProtocol { version: "ECv3".to_string() };
        assert!(err.to_string().contains("ECv3"));
        assert!(err.to_string().contains("ECv1, ECv2"));
    }

    #[test]
    fn decryption_error_preserves_cause() {
        let err =
            TokenError::decryption("AES-GCM decryption failed", CryptoError::AuthenticationFailed);

        assert_eq!(err.kind(), ErrorKind::Decryption);
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("authentication failed"));
        assert!(err.to_string().contains("AES-GCM decryption failed: authentication failed"));
    }

    #[test]
    fn input_errors_are_token_faults() {
        assert!(TokenError::validation("bad").is_token_fault());
        assert!(TokenError::signature("bad").is_token_fault());
        assert!(TokenError::UnsupportedProtocol { version: "x".to_string() }.is_token_fault());
    }

    #[test]
    fn key_and_setup_errors_are_not_token_faults() {
        assert!(!TokenError::configuration("recipient_id is required").is_token_fault());
        assert!(
            !TokenError::decryption(
                "invalid private key",
                CryptoError::InvalidPrivateKey { reason: "x".to_string() }
            )
            .is_token_fault()
        );
    }

    #[test]
    fn custom_message_is_kept() {
        let err = TokenError::validation("Custom error message");
        assert_eq!(err, TokenError::Validation { reason: "Custom error message".to_string() });
        assert_eq!(err.to_string(), "validation error: Custom error message");
    }
}
