//! Fuzz target for token and key-set normalization
//!
//! Raw wallet JSON and issuer key documents are untrusted text.
//!
//! # Invariants
//!
//! - `TokenAttributes::from_json` and `VerificationKeySet::from_json` NEVER
//!   panic; malformed input is an error
//! - Normalized attributes only contain recognized fields
//! - Classification is `GooglePay` exactly when `protocolVersion` survived
//!   normalization
//! - Building a token fails only with validation, protocol or configuration
//!   errors

#![no_main]

use libfuzzer_sys::fuzz_target;
use paytoken_core::{
    DecryptionConfig, ErrorKind, Field, Token, TokenAttributes, TokenFamily, VerificationKeyEntry,
    VerificationKeySet,
};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = VerificationKeySet::from_json(text);

    let Ok(attributes) = TokenAttributes::from_json(text) else {
        return;
    };

    assert!(attributes.len() <= Field::ALL.len());
    for (field, value) in attributes.iter() {
        assert_eq!(Field::from_name(field.as_str()), Some(field));
        assert_eq!(attributes.get(field), Some(value));
    }

    let family = TokenFamily::classify(&attributes);
    assert_eq!(family == TokenFamily::GooglePay, attributes.contains(Field::ProtocolVersion));

    let config = DecryptionConfig::new("merchant:fuzz", VerificationKeyEntry::new("ECv1", "a2V5"));
    match Token::build(attributes, config) {
        Ok(_) => {},
        Err(err) => assert!(matches!(
            err.kind(),
            ErrorKind::Validation | ErrorKind::UnsupportedProtocol | ErrorKind::Configuration
        )),
    }
});
