//! Signed envelope construction and verification (Google Pay only).
//!
//! The issuer signs a length-framed concatenation rather than the raw
//! `signedMessage`:
//!
//! ```text
//! "Google" || u32le(6) || recipient_id || u32le(len) || protocol_version || u32le(len) || signed_message
//! ```
//!
//! Each identifier is followed by its own byte length as a little-endian
//! `u32`; the message itself carries no length. The framing must be rebuilt
//! byte for byte at verification time or genuine tokens fail to verify.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use paytoken_crypto::{CryptoError, parse_verification_key, verify_signature};

use crate::{
    config::{DecryptionConfig, VerificationKeySet},
    error::TokenError,
    field::Field,
    protocol::ProtocolVersion,
    util::decode_base64,
};

/// Sender identifier bound into every envelope.
pub const SENDER_ID: &str = "Google";

/// Build the canonical signed envelope.
///
/// # Errors
///
/// - `Signature`: an identifier is longer than `u32::MAX` bytes
pub fn signed_envelope(
    recipient_id: &str,
    protocol_version: &str,
    signed_message: &str,
) -> Result<Vec<u8>, TokenError> {
    let mut envelope = Vec::with_capacity(
        SENDER_ID.len() + recipient_id.len() + protocol_version.len() + signed_message.len() + 12,
    );

    for part in [SENDER_ID, recipient_id, protocol_version] {
        let len = u32::try_from(part.len())
            .map_err(|_| TokenError::signature("envelope component exceeds u32 length"))?;
        envelope.extend_from_slice(part.as_bytes());
        envelope.extend_from_slice(&len.to_le_bytes());
    }
    envelope.extend_from_slice(signed_message.as_bytes());

    Ok(envelope)
}

/// ECDSA verifier for Google Pay envelopes
///
/// Borrows the caller's trust configuration; nothing is cached between calls.
pub struct SignatureVerifier<'a> {
    recipient_id: &'a str,
    verification_keys: &'a VerificationKeySet,
}

impl<'a> SignatureVerifier<'a> {
    /// Verifier bound to a recipient and key set.
    pub fn new(config: &'a DecryptionConfig) -> Self {
        Self { recipient_id: &config.recipient_id, verification_keys: &config.verification_keys }
    }

    /// Verify `signature` (base64 DER) over the envelope for `signed_message`.
    ///
    /// Every failure is a `Signature` error: no key for the version, a key or
    /// signature that does not decode, or a signature that does not match.
    pub fn verify(
        &self,
        protocol_version: ProtocolVersion,
        signature: &str,
        signed_message: &str,
    ) -> Result<(), TokenError> {
        let version = protocol_version.as_str();
        let Some(entry) = self.verification_keys.find(version) else {
            return Err(TokenError::signature(format!(
                "No verification key found for protocol version: {version}"
            )));
        };

        let envelope = signed_envelope(self.recipient_id, version, signed_message)?;

        let key_der = BASE64.decode(&entry.key_value).map_err(|e| {
            TokenError::signature(format!(
                "Signature verification error: verification key is not base64: {e}"
            ))
        })?;
        let key = parse_verification_key(&key_der).map_err(verification_error)?;

        let signature = decode_base64(Field::Signature, signature).map_err(|e| {
            TokenError::signature(format!("Signature verification error: {e}"))
        })?;

        verify_signature(&key, &envelope, &signature).map_err(verification_error)
    }
}

fn verification_error(err: CryptoError) -> TokenError {
    match err {
        CryptoError::SignatureMismatch => TokenError::signature("Signature verification failed"),
        other => TokenError::signature(format!("Signature verification error: {other}")),
    }
}
