//! ECDSA-P256-SHA256 signature verification

use p256::{
    ecdsa::{Signature, VerifyingKey, signature::Verifier},
    pkcs8::DecodePublicKey,
};

use crate::error::CryptoError;

/// Parse a DER `SubjectPublicKeyInfo` holding a P-256 public key.
pub fn parse_verification_key(der: &[u8]) -> Result<VerifyingKey, CryptoError> {
    VerifyingKey::from_public_key_der(der)
        .map_err(|e| CryptoError::InvalidVerificationKey { reason: e.to_string() })
}

/// Verify a DER-encoded ECDSA signature over SHA-256 of `message`.
///
/// # Errors
///
/// - `MalformedSignature`: bytes are not a DER ECDSA signature
/// - `SignatureMismatch`: signature does not verify against `key`
pub fn verify_signature(
    key: &VerifyingKey,
    message: &[u8],
    signature_der: &[u8],
) -> Result<(), CryptoError> {
    let signature = Signature::from_der(signature_der)
        .map_err(|e| CryptoError::MalformedSignature { reason: e.to_string() })?;

    key.verify(message, &signature).map_err(|_| CryptoError::SignatureMismatch)
}
