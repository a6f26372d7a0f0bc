//! Fuzz target for Google Pay envelope signatures
//!
//! Forged or tampered tokens must never be trusted.
//!
//! # Strategy
//!
//! - Corrupted signatures: flip one bit of a genuine DER signature
//! - Tampered envelope: change recipient, protocol version or message
//! - Wrong key: sign with a key the verifier does not trust
//! - Garbage: arbitrary signature bytes
//!
//! # Invariants
//!
//! - Genuine signature MUST verify
//! - Every attack MUST fail with a signature error
//! - NEVER panic on any signature input

#![no_main]

use arbitrary::Arbitrary;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use libfuzzer_sys::fuzz_target;
use p256::{
    ecdsa::{signature::Signer, Signature, SigningKey},
    pkcs8::EncodePublicKey,
};
use paytoken_core::{
    signed_envelope, DecryptionConfig, ErrorKind, ProtocolVersion, SignatureVerifier,
    VerificationKeyEntry,
};

const RECIPIENT_ID: &str = "merchant:12345678901234567890";

#[derive(Debug, Clone, Arbitrary)]
struct FuzzInput {
    seed: [u8; 32],
    message: String,
    ecv2: bool,
    attack: SignatureAttack,
}

#[derive(Debug, Clone, Arbitrary)]
enum SignatureAttack {
    CorruptedSignature { byte_offset: u8, bit_offset: u8 },
    OtherRecipient { suffix: u8 },
    OtherVersion,
    TamperedMessage { byte_offset: u8 },
    WrongKey,
    Garbage(Vec<u8>),
}

fuzz_target!(|input: FuzzInput| {
    let Ok(issuer) = SigningKey::from_slice(&input.seed) else {
        return;
    };
    let Ok(der) = issuer.verifying_key().to_public_key_der() else {
        return;
    };

    let (version, other_version) = if input.ecv2 {
        (ProtocolVersion::EcV2, ProtocolVersion::EcV1)
    } else {
        (ProtocolVersion::EcV1, ProtocolVersion::EcV2)
    };

    let encoded_key = BASE64.encode(der.as_bytes());
    let config = DecryptionConfig::new(
        RECIPIENT_ID,
        vec![
            VerificationKeyEntry::new("ECv1", encoded_key.clone()),
            VerificationKeyEntry::new("ECv2", encoded_key),
        ],
    );
    let verifier = SignatureVerifier::new(&config);

    let sign = |key: &SigningKey, recipient: &str, version: ProtocolVersion, message: &str| {
        let envelope = signed_envelope(recipient, version.as_str(), message).unwrap();
        let signature: Signature = key.sign(&envelope);
        signature.to_der().as_bytes().to_vec()
    };

    let genuine = sign(&issuer, RECIPIENT_ID, version, &input.message);
    assert!(verifier.verify(version, &BASE64.encode(&genuine), &input.message).is_ok());

    let result = match input.attack {
        SignatureAttack::CorruptedSignature { byte_offset, bit_offset } => {
            let mut corrupted = genuine;
            let index = byte_offset as usize % corrupted.len();
            corrupted[index] ^= 1 << (bit_offset % 8);
            verifier.verify(version, &BASE64.encode(&corrupted), &input.message)
        },
        SignatureAttack::OtherRecipient { suffix } => {
            let recipient = format!("{RECIPIENT_ID}{}", char::from(suffix % 26 + b'a'));
            let signature = sign(&issuer, &recipient, version, &input.message);
            verifier.verify(version, &BASE64.encode(&signature), &input.message)
        },
        SignatureAttack::OtherVersion => {
            verifier.verify(other_version, &BASE64.encode(&genuine), &input.message)
        },
        SignatureAttack::TamperedMessage { byte_offset } => {
            let mut tampered = input.message.clone().into_bytes();
            if tampered.is_empty() {
                tampered.push(b'x');
            } else {
                let index = byte_offset as usize % tampered.len();
                tampered[index] = tampered[index].wrapping_add(1);
            }
            let tampered = String::from_utf8_lossy(&tampered).into_owned();
            if tampered == input.message {
                return;
            }
            verifier.verify(version, &BASE64.encode(&genuine), &tampered)
        },
        SignatureAttack::WrongKey => {
            let mut other_seed = input.seed;
            other_seed[31] ^= 0x01;
            let Ok(impostor) = SigningKey::from_slice(&other_seed) else {
                return;
            };
            let signature = sign(&impostor, RECIPIENT_ID, version, &input.message);
            verifier.verify(version, &BASE64.encode(&signature), &input.message)
        },
        SignatureAttack::Garbage(bytes) => {
            if bytes == genuine {
                return;
            }
            verifier.verify(version, &BASE64.encode(&bytes), &input.message)
        },
    };

    match result {
        Err(err) => assert_eq!(err.kind(), ErrorKind::Signature),
        Ok(()) => panic!("forged signature accepted: {:?}", input.attack),
    }
});
