//! Payment Token Decoding
//!
//! Verifies and decrypts wallet payment tokens:
//!
//! - **Google Pay** (`ECv1`, `ECv2`): ECDSA-P256 signature over a signed
//!   envelope, then ECDH + HKDF-SHA256 + AES-256-CTR
//! - **Android Pay** (legacy): ECDH + HKDF-SHA256 + AES-256-GCM
//!
//! # Architecture
//!
//! ```text
//! raw attributes ─→ TokenAttributes ─→ TokenFamily::classify
//!                                             │
//!                      ┌──────────────────────┴─────────────────────┐
//!                      ▼                                            ▼
//!               GooglePayToken::new                       AndroidPayToken::new
//!             (fields, protocol, config)                       (fields)
//!                      │                                            │
//!                      ▼                                            │
//!              SignatureVerifier                                    │
//!                      │                                            │
//!                      └───────→ ECDH → HKDF → cipher ←─────────────┘
//! ```
//!
//! Validation runs at construction; cryptographic failures surface only from
//! [`DecryptableToken::decrypt`]. Each call allocates its own key material, so
//! tokens may be decrypted concurrently from independent threads.
//!
//! # Example
//!
//! ```no_run
//! use paytoken_core::{DecryptionConfig, TokenAttributes, VerificationKeySet};
//!
//! # fn run(token_json: &str, keys_json: &str, private_key_pem: &str) -> Result<(), paytoken_core::TokenError> {
//! let attributes = TokenAttributes::from_json(token_json)?;
//! let config = DecryptionConfig::new("merchant:12345", VerificationKeySet::from_json(keys_json)?);
//! let plaintext = paytoken_core::decrypt(attributes, private_key_pem, config)?;
//! # let _ = plaintext;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod android_pay;
pub mod config;
pub mod envelope;
pub mod error;
pub mod field;
pub mod google_pay;
pub mod protocol;
pub mod token;
mod util;
pub mod validator;

pub use android_pay::AndroidPayToken;
pub use config::{DecryptionConfig, VerificationKeyEntry, VerificationKeySet};
pub use envelope::{SignatureVerifier, signed_envelope};
pub use error::{ErrorKind, TokenError};
pub use field::{Field, TokenAttributes};
pub use google_pay::GooglePayToken;
pub use paytoken_crypto::secure_compare;
pub use protocol::ProtocolVersion;
pub use token::{DecryptableToken, Token, TokenFamily, decrypt};
pub use validator::TokenValidator;

/// Version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
