//! Fuzz target for HKDF-SHA256 key derivation
//!
//! # Invariants
//!
//! - Output length equals the requested length for every length up to
//!   255 hash blocks; longer requests are errors, never panics
//! - Derivation is deterministic
//! - A shorter request is a prefix of a longer one with the same inputs

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use paytoken_crypto::{derive, kdf::MAX_OUTPUT_LEN};

#[derive(Debug, Clone, Arbitrary)]
struct FuzzInput {
    secret: Vec<u8>,
    info: Vec<u8>,
    length: u16,
}

fuzz_target!(|input: FuzzInput| {
    let length = input.length as usize;

    match derive(&input.secret, &input.info, length) {
        Ok(output) => {
            assert!(length <= MAX_OUTPUT_LEN);
            assert_eq!(output.len(), length);
            assert_eq!(derive(&input.secret, &input.info, length).ok(), Some(output.clone()));

            let shorter = length / 2;
            let prefix = derive(&input.secret, &input.info, shorter).unwrap();
            assert_eq!(prefix[..], output[..shorter]);
        },
        Err(_) => assert!(length > MAX_OUTPUT_LEN),
    }
});
