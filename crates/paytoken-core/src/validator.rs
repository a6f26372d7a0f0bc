//! Construction-time token validation.
//!
//! Runs before any key material is touched, so a malformed token never
//! reaches ECDH or the ciphers. Checks are presence and protocol only;
//! base64 and JSON content are decoded (and rejected) during decryption,
//! after the signature has been checked.

use crate::{
    config::DecryptionConfig,
    error::TokenError,
    field::{Field, TokenAttributes},
    protocol::ProtocolVersion,
};

/// Fields a Google Pay token must carry.
pub const GOOGLE_PAY_REQUIRED_FIELDS: [Field; 3] =
    [Field::Signature, Field::ProtocolVersion, Field::SignedMessage];

/// Fields an Android Pay token must carry.
pub const ANDROID_PAY_REQUIRED_FIELDS: [Field; 3] =
    [Field::EncryptedMessage, Field::EphemeralPublicKey, Field::Tag];

/// Per-family token validator
///
/// Check order for Google Pay:
/// 1. Required fields (first missing one is reported)
/// 2. Protocol version is supported
/// 3. Recipient id is configured
/// 4. Verification keys are configured
pub struct TokenValidator;

impl TokenValidator {
    /// Validate a Google Pay token and its decryption configuration.
    ///
    /// Returns the parsed protocol version.
    ///
    /// # Errors
    ///
    /// - `Validation`: a required field is missing
    /// - `UnsupportedProtocol`: `protocolVersion` is not `ECv1`/`ECv2`
    /// - `Configuration`: recipient id or verification keys are empty
    pub fn validate_google_pay(
        attributes: &TokenAttributes,
        config: &DecryptionConfig,
    ) -> Result<ProtocolVersion, TokenError> {
        Self::require_fields(attributes, &GOOGLE_PAY_REQUIRED_FIELDS)?;

        let version = ProtocolVersion::parse(attributes.require(Field::ProtocolVersion)?)?;

        if config.recipient_id.is_empty() {
            return Err(TokenError::configuration("recipient_id is required for Google Pay tokens"));
        }

        if config.verification_keys.is_empty() {
            return Err(TokenError::configuration(
                "verification_keys are required for Google Pay tokens",
            ));
        }

        Ok(version)
    }

    /// Validate an Android Pay token.
    ///
    /// # Errors
    ///
    /// - `Validation`: a required field is missing
    pub fn validate_android_pay(attributes: &TokenAttributes) -> Result<(), TokenError> {
        Self::require_fields(attributes, &ANDROID_PAY_REQUIRED_FIELDS)
    }

    fn require_fields(attributes: &TokenAttributes, fields: &[Field]) -> Result<(), TokenError> {
        match fields.iter().find(|field| !attributes.contains(**field)) {
            Some(missing) => Err(TokenError::missing_field(*missing)),
            None => Ok(()),
        }
    }
}
