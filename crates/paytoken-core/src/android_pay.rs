//! Android Pay (legacy) token decoder.
//!
//! No signature and no protocol version. The GCM tag is the only integrity
//! check this family has.

use paytoken_crypto::{
    KEY_SIZE, aes256_gcm_decrypt, derive, parse_ephemeral_public_key, shared_secret,
};
use zeroize::Zeroizing;

use crate::{
    error::TokenError,
    field::{Field, TokenAttributes},
    token::{DecodeStage, DecryptableToken, TokenFamily},
    util::{decode_base64, load_private_key},
    validator::TokenValidator,
};

/// HKDF `info` for Android Pay key derivation.
pub const HKDF_INFO: &[u8] = b"Android";

/// Validated Android Pay token.
#[derive(Debug, Clone)]
pub struct AndroidPayToken {
    attributes: TokenAttributes,
}

impl AndroidPayToken {
    /// Validate `attributes` and build the decoder.
    ///
    /// # Errors
    ///
    /// - `Validation`: `encryptedMessage`, `ephemeralPublicKey` or `tag` missing
    pub fn new(attributes: TokenAttributes) -> Result<Self, TokenError> {
        TokenValidator::validate_android_pay(&attributes)?;

        tracing::debug!(
            stage = DecodeStage::Constructed.as_str(),
            family = TokenFamily::AndroidPay.as_str(),
            "token validated"
        );

        Ok(Self { attributes })
    }

    /// Normalized token attributes.
    pub fn attributes(&self) -> &TokenAttributes {
        &self.attributes
    }

    fn decrypt_stages(
        &self,
        private_key_pem: &str,
        stage: &mut DecodeStage,
    ) -> Result<Vec<u8>, TokenError> {
        let private_key = load_private_key(private_key_pem)?;

        let ciphertext = decode_base64(
            Field::EncryptedMessage,
            self.attributes.require(Field::EncryptedMessage)?,
        )?;
        let ephemeral_bytes = decode_base64(
            Field::EphemeralPublicKey,
            self.attributes.require(Field::EphemeralPublicKey)?,
        )?;
        let tag = decode_base64(Field::Tag, self.attributes.require(Field::Tag)?)?;

        let ephemeral_key = parse_ephemeral_public_key(&ephemeral_bytes)
            .map_err(|e| TokenError::validation(e.to_string()))?;
        let secret = shared_secret(&private_key, &ephemeral_key);
        stage.advance(DecodeStage::KeyAgreementDone);

        let key = Zeroizing::new(
            derive(secret.as_slice(), HKDF_INFO, KEY_SIZE)
                .map_err(|e| TokenError::decryption("Key derivation failed", e))?,
        );
        stage.advance(DecodeStage::KeysDerived);

        let plaintext = aes256_gcm_decrypt(&key, &ciphertext, &tag)
            .map_err(|e| TokenError::decryption("AES-GCM decryption failed", e))?;
        stage.advance(DecodeStage::Decrypted);

        Ok(plaintext)
    }
}

impl DecryptableToken for AndroidPayToken {
    fn family(&self) -> TokenFamily {
        TokenFamily::AndroidPay
    }

    fn decrypt(&self, private_key_pem: &str) -> Result<Vec<u8>, TokenError> {
        let mut stage = DecodeStage::Constructed;
        self.decrypt_stages(private_key_pem, &mut stage)
            .inspect_err(|e| stage.log_failure(TokenFamily::AndroidPay, e))
    }
}
