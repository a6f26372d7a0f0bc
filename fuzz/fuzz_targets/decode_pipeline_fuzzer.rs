//! Fuzz target for the decrypt pipeline
//!
//! Drives both decoders with arbitrary field contents and a fixed merchant
//! key, so every stage after construction sees hostile bytes: base64,
//! ephemeral points, GCM tags and `signedMessage` JSON.
//!
//! # Invariants
//!
//! - Decryption NEVER panics
//! - Android Pay never accepts a token without a valid GCM tag; arbitrary
//!   bytes decrypting successfully would mean the tag check was skipped
//! - Google Pay with an untrusted signature fails with a signature error
//!   before any key material is used

#![no_main]

use arbitrary::Arbitrary;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use libfuzzer_sys::fuzz_target;
use paytoken_core::{
    DecryptableToken, DecryptionConfig, ErrorKind, Token, TokenAttributes, VerificationKeyEntry,
};

const MERCHANT_KEY_DER_BASE64: &str = "MIGHAgEAMBMGByqGSM49AgEGCCqGSM49AwEHBG0wawIBAQQgERERERERERERERERERERERERERERERERERERERERERGhRANCAAQCF+YX8LZEOSgnj5aZnmmiOk8sFSvfbWzfZuW4AoLU7RlKfevLl3EtLdo8qFqodlpW9F/HWFmWUvKJfGUwbleU";
const ISSUER_KEY_SPKI: &str = "MFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAEUadYCDOJjqGxg8vXNQpAmQeMbvHB4Y6XDNdoMDXyXn0BEFInErC1p8/wgWhUhphKlOaDHtrEbnNg+p2DSnqBoQ==";

#[derive(Debug, Clone, Arbitrary)]
enum FuzzInput {
    AndroidPay {
        encrypted_message: Vec<u8>,
        ephemeral_public_key: EphemeralKey,
        tag: Vec<u8>,
        raw_base64: bool,
    },
    GooglePay {
        signature: Vec<u8>,
        ecv2: bool,
        signed_message: String,
    },
}

#[derive(Debug, Clone, Arbitrary)]
enum EphemeralKey {
    Raw(Vec<u8>),
    Uncompressed { x: [u8; 32], y: [u8; 32] },
}

impl EphemeralKey {
    fn bytes(&self) -> Vec<u8> {
        match self {
            Self::Raw(bytes) => bytes.clone(),
            Self::Uncompressed { x, y } => [&[0x04][..], x, y].concat(),
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    match input {
        FuzzInput::AndroidPay { encrypted_message, ephemeral_public_key, tag, raw_base64 } => {
            let encode = |bytes: &[u8]| {
                if raw_base64 {
                    String::from_utf8_lossy(bytes).into_owned()
                } else {
                    BASE64.encode(bytes)
                }
            };
            let attributes = TokenAttributes::from_pairs([
                ("encryptedMessage", encode(&encrypted_message)),
                ("ephemeralPublicKey", encode(&ephemeral_public_key.bytes())),
                ("tag", encode(&tag)),
            ]);

            let Ok(token) = Token::build(attributes, DecryptionConfig::default()) else {
                return;
            };
            if let Ok(plaintext) = token.decrypt(MERCHANT_KEY_DER_BASE64) {
                panic!("forged Android Pay token decrypted to {} bytes", plaintext.len());
            }
        },
        FuzzInput::GooglePay { signature, ecv2, signed_message } => {
            let version = if ecv2 { "ECv2" } else { "ECv1" };
            let attributes = TokenAttributes::from_pairs([
                ("signature", BASE64.encode(&signature)),
                ("protocolVersion", version.to_string()),
                ("signedMessage", signed_message),
            ]);
            let config = DecryptionConfig::new(
                "merchant:12345678901234567890",
                vec![
                    VerificationKeyEntry::new("ECv1", ISSUER_KEY_SPKI),
                    VerificationKeyEntry::new("ECv2", ISSUER_KEY_SPKI),
                ],
            );

            let Ok(token) = Token::build(attributes, config) else {
                return;
            };
            match token.decrypt(MERCHANT_KEY_DER_BASE64) {
                Err(err) => assert_eq!(err.kind(), ErrorKind::Signature),
                Ok(_) => panic!("unsigned Google Pay token decrypted"),
            }
        },
    }
});
