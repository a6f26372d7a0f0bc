//! Google Pay (`ECv1`/`ECv2`) token decoder.
//!
//! Decrypt order:
//! 1. Verify the ECDSA signature over the signed envelope
//! 2. Parse `signedMessage` and decode its base64 members
//! 3. ECDH with the ephemeral public key
//! 4. HKDF-SHA256 with the base64 text of the ephemeral key as `info`,
//!    64 bytes split into encryption key and MAC key
//! 5. AES-256-CTR under the encryption key
//!
//! The MAC key is derived but not checked; authenticity rests on the
//! envelope signature alone. The `tag` member of `signedMessage` must be
//! present but is never decoded.

use paytoken_crypto::{
    KEY_SIZE, aes256_ctr_decrypt, derive, parse_ephemeral_public_key, shared_secret,
};
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::{
    config::{DecryptionConfig, VerificationKeySet},
    envelope::SignatureVerifier,
    error::TokenError,
    field::{Field, TokenAttributes},
    protocol::ProtocolVersion,
    token::{DecodeStage, DecryptableToken, TokenFamily},
    util::{decode_base64, encode_base64, load_private_key},
    validator::TokenValidator,
};

/// Length of the HKDF output for Google Pay: encryption key then MAC key.
const DERIVED_KEY_LEN: usize = 2 * KEY_SIZE;

/// Members of the `signedMessage` JSON document.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignedMessage {
    encrypted_message: String,
    ephemeral_public_key: String,
    #[allow(dead_code)]
    tag: String,
}

impl SignedMessage {
    fn parse(json: &str) -> Result<Self, TokenError> {
        serde_json::from_str(json)
            .map_err(|e| TokenError::validation(format!("Invalid {}: {e}", Field::SignedMessage)))
    }
}

/// HKDF output split into its two halves; wiped on drop.
struct DerivedKeys {
    material: Zeroizing<Vec<u8>>,
}

impl DerivedKeys {
    fn encryption_key(&self) -> &[u8] {
        &self.material[..KEY_SIZE]
    }

    fn mac_key(&self) -> &[u8] {
        &self.material[KEY_SIZE..]
    }
}

/// Validated Google Pay token.
///
/// Construction checks required fields, protocol version and configuration.
/// No key material is touched until [`DecryptableToken::decrypt`].
#[derive(Debug, Clone)]
pub struct GooglePayToken {
    attributes: TokenAttributes,
    protocol_version: ProtocolVersion,
    config: DecryptionConfig,
}

impl GooglePayToken {
    /// Validate `attributes` against `config` and build the decoder.
    ///
    /// # Errors
    ///
    /// - `Validation`: `signature`, `protocolVersion` or `signedMessage` missing
    /// - `UnsupportedProtocol`: version other than `ECv1`/`ECv2`
    /// - `Configuration`: empty recipient id or verification key set
    pub fn new(attributes: TokenAttributes, config: DecryptionConfig) -> Result<Self, TokenError> {
        let protocol_version = TokenValidator::validate_google_pay(&attributes, &config)?;

        tracing::debug!(
            stage = DecodeStage::Constructed.as_str(),
            family = TokenFamily::GooglePay.as_str(),
            protocol_version = protocol_version.as_str(),
            "token validated"
        );

        Ok(Self { attributes, protocol_version, config })
    }

    /// Recipient the envelope is bound to.
    pub fn recipient_id(&self) -> &str {
        &self.config.recipient_id
    }

    /// Issuer keys the signature is checked against.
    pub fn verification_keys(&self) -> &VerificationKeySet {
        &self.config.verification_keys
    }

    /// Protocol revision carried by the token.
    pub fn protocol_version(&self) -> ProtocolVersion {
        self.protocol_version
    }

    fn decrypt_stages(
        &self,
        private_key_pem: &str,
        stage: &mut DecodeStage,
    ) -> Result<Vec<u8>, TokenError> {
        let signature = self.attributes.require(Field::Signature)?;
        let signed_message_json = self.attributes.require(Field::SignedMessage)?;

        SignatureVerifier::new(&self.config).verify(
            self.protocol_version,
            signature,
            signed_message_json,
        )?;
        stage.advance(DecodeStage::SignatureVerified);

        let signed_message = SignedMessage::parse(signed_message_json)?;
        let ciphertext = decode_base64(Field::EncryptedMessage, &signed_message.encrypted_message)?;
        let ephemeral_bytes =
            decode_base64(Field::EphemeralPublicKey, &signed_message.ephemeral_public_key)?;

        let private_key = load_private_key(private_key_pem)?;
        let ephemeral_key = parse_ephemeral_public_key(&ephemeral_bytes)
            .map_err(|e| TokenError::validation(e.to_string()))?;
        let secret = shared_secret(&private_key, &ephemeral_key);
        stage.advance(DecodeStage::KeyAgreementDone);

        let info = encode_base64(&ephemeral_bytes);
        let keys = DerivedKeys {
            material: Zeroizing::new(
                derive(secret.as_slice(), info.as_bytes(), DERIVED_KEY_LEN)
                    .map_err(|e| TokenError::decryption("Key derivation failed", e))?,
            ),
        };
        verify_mac(keys.mac_key(), &ciphertext);
        stage.advance(DecodeStage::KeysDerived);

        let plaintext = aes256_ctr_decrypt(keys.encryption_key(), &ciphertext)
            .map_err(|e| TokenError::decryption("AES-CTR decryption failed", e))?;
        stage.advance(DecodeStage::Decrypted);

        Ok(plaintext)
    }
}

/// Inner MAC check. Intentionally accepts everything: trust for this family
/// is anchored in the envelope signature.
fn verify_mac(_mac_key: &[u8], _ciphertext: &[u8]) {}

impl DecryptableToken for GooglePayToken {
    fn family(&self) -> TokenFamily {
        TokenFamily::GooglePay
    }

    fn decrypt(&self, private_key_pem: &str) -> Result<Vec<u8>, TokenError> {
        let mut stage = DecodeStage::Constructed;
        self.decrypt_stages(private_key_pem, &mut stage)
            .inspect_err(|e| stage.log_failure(TokenFamily::GooglePay, e))
    }
}
