//! Token family dispatch.
//!
//! The family is decided once, from the normalized attributes: a token that
//! carries `protocolVersion` is Google Pay, anything else is Android Pay.

use std::fmt;

use crate::{
    android_pay::AndroidPayToken,
    config::DecryptionConfig,
    error::TokenError,
    field::{Field, TokenAttributes},
    google_pay::GooglePayToken,
};

/// The two token families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenFamily {
    /// Signed `ECv1`/`ECv2` tokens
    GooglePay,
    /// Legacy unsigned tokens
    AndroidPay,
}

impl TokenFamily {
    /// Classify normalized attributes.
    pub fn classify(attributes: &TokenAttributes) -> Self {
        if attributes.contains(Field::ProtocolVersion) { Self::GooglePay } else { Self::AndroidPay }
    }

    /// Name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GooglePay => "google_pay",
            Self::AndroidPay => "android_pay",
        }
    }
}

impl fmt::Display for TokenFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated token that can be decrypted with a merchant private key.
pub trait DecryptableToken {
    /// Family this token belongs to.
    fn family(&self) -> TokenFamily;

    /// Decrypt the payload with `private_key_pem`.
    ///
    /// Accepts PKCS#8 PEM, SEC1 PEM, or base64 DER. Returns the plaintext
    /// bytes (a JSON payment payload, returned opaque).
    ///
    /// # Errors
    ///
    /// The first failing step ends the call; see [`TokenError`] for the kinds.
    fn decrypt(&self, private_key_pem: &str) -> Result<Vec<u8>, TokenError>;
}

/// Progress of a single decrypt call.
///
/// Stages only move forward. Failure is reported together with the last
/// stage reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum DecodeStage {
    Constructed,
    SignatureVerified,
    KeyAgreementDone,
    KeysDerived,
    Decrypted,
}

impl DecodeStage {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Constructed => "constructed",
            Self::SignatureVerified => "signature_verified",
            Self::KeyAgreementDone => "key_agreement_done",
            Self::KeysDerived => "keys_derived",
            Self::Decrypted => "decrypted",
        }
    }

    pub(crate) fn advance(&mut self, next: Self) {
        debug_assert!(next > *self, "decode stage moved from {self:?} to {next:?}");
        *self = next;
        tracing::debug!(stage = next.as_str(), "decode stage reached");
    }

    pub(crate) fn log_failure(self, family: TokenFamily, error: &TokenError) {
        tracing::debug!(
            stage = self.as_str(),
            family = family.as_str(),
            kind = ?error.kind(),
            %error,
            "token decryption failed"
        );
    }
}

/// A validated token of either family.
#[derive(Debug, Clone)]
pub enum Token {
    /// Google Pay `ECv1`/`ECv2`
    GooglePay(GooglePayToken),
    /// Android Pay
    AndroidPay(AndroidPayToken),
}

impl Token {
    /// Classify and validate `attributes`.
    ///
    /// `config` is only consulted for Google Pay tokens.
    ///
    /// # Errors
    ///
    /// Any construction error of the selected decoder.
    pub fn build(attributes: TokenAttributes, config: DecryptionConfig) -> Result<Self, TokenError> {
        match TokenFamily::classify(&attributes) {
            TokenFamily::GooglePay => GooglePayToken::new(attributes, config).map(Self::GooglePay),
            TokenFamily::AndroidPay => AndroidPayToken::new(attributes).map(Self::AndroidPay),
        }
    }
}

impl DecryptableToken for Token {
    fn family(&self) -> TokenFamily {
        match self {
            Self::GooglePay(token) => token.family(),
            Self::AndroidPay(token) => token.family(),
        }
    }

    fn decrypt(&self, private_key_pem: &str) -> Result<Vec<u8>, TokenError> {
        match self {
            Self::GooglePay(token) => token.decrypt(private_key_pem),
            Self::AndroidPay(token) => token.decrypt(private_key_pem),
        }
    }
}

/// Build a token from `attributes` and decrypt it in one call.
///
/// # Errors
///
/// Construction errors first, then decryption errors.
pub fn decrypt(
    attributes: TokenAttributes,
    private_key_pem: &str,
    config: DecryptionConfig,
) -> Result<Vec<u8>, TokenError> {
    Token::build(attributes, config)?.decrypt(private_key_pem)
}
