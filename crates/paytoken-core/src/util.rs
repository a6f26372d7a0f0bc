//! Helpers shared by both decoders.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use paytoken_crypto::{SecretKey, parse_private_key};

use crate::{error::TokenError, field::Field};

/// Strictly decode a base64 token field (standard alphabet, padded, no
/// whitespace).
pub(crate) fn decode_base64(field: Field, value: &str) -> Result<Vec<u8>, TokenError> {
    BASE64.decode(value).map_err(|e| {
        TokenError::validation(format!("Invalid base64 encoding in {field}: {e}"))
    })
}

pub(crate) fn encode_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Parse the merchant private key supplied to `decrypt`.
pub(crate) fn load_private_key(private_key_pem: &str) -> Result<SecretKey, TokenError> {
    parse_private_key(private_key_pem)
        .map_err(|e| TokenError::decryption("Failed to load private key", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn decodes_standard_base64() {
        assert_eq!(decode_base64(Field::Tag, "dGFn").unwrap(), b"tag");
    }

    #[test]
    fn rejects_invalid_base64() {
        let result = decode_base64(Field::EncryptedMessage, "not-valid-base64!!!");
        assert!(matches!(
            result,
            Err(TokenError::Validation { reason })
                if reason.contains("Invalid base64 encoding") && reason.contains("encryptedMessage")
        ));
    }

    #[test]
    fn rejects_unpadded_and_wrapped_base64() {
        assert!(decode_base64(Field::Tag, "dGFnZw").is_err());
        assert!(decode_base64(Field::Tag, "dGFn\nZw==").is_err());
    }

    #[test]
    fn reencodes_without_line_breaks() {
        let long = vec![0xABu8; 120];
        assert!(!encode_base64(&long).contains('\n'));
    }

    #[test]
    fn invalid_private_key_is_decryption_error() {
        let err = load_private_key("invalid_key").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decryption);
        assert!(err.to_string().contains("invalid private key"));
    }
}
