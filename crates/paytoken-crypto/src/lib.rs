//! Payment Token Cryptographic Primitives
//!
//! Building blocks for decrypting wallet payment tokens. Pure functions with
//! deterministic outputs and no logging. Token structure, field validation
//! and error classification live in `paytoken-core`.
//!
//! # Pipeline
//!
//! ```text
//! Merchant private key ──┐
//!                        ├─ ECDH (P-256) → Shared secret
//! Ephemeral public key ──┘                      │
//!                                               ▼
//!                             HKDF-SHA256 (zero salt, info)
//!                                               │
//!                    ┌──────────────────────────┴───────────────┐
//!                    ▼                                          ▼
//!    Google Pay: 64 bytes → enc key ‖ mac key     Android Pay: 32-byte key
//!                    │                                          │
//!                    ▼                                          ▼
//!            AES-256-CTR (zero IV)                 AES-256-GCM (zero nonce)
//! ```
//!
//! Google Pay tokens are authenticated by an ECDSA-P256-SHA256 signature over
//! a signed envelope; [`verify_signature`] checks it before any of the above
//! runs.
//!
//! # Security
//!
//! - Shared secrets are returned in [`zeroize::Zeroizing`] buffers
//! - [`secure_compare`] never exits early on content
//! - AES-GCM rejects tags of the wrong size before touching the ciphertext

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod agreement;
pub mod cipher;
pub mod compare;
pub mod error;
pub mod kdf;
pub mod signature;

pub use agreement::{
    SHARED_SECRET_LEN, UNCOMPRESSED_POINT_LEN, parse_ephemeral_public_key, parse_private_key,
    shared_secret,
};
pub use cipher::{GCM_TAG_SIZE, KEY_SIZE, aes256_ctr_decrypt, aes256_gcm_decrypt};
pub use compare::secure_compare;
pub use error::CryptoError;
pub use kdf::derive;
pub use p256::{PublicKey, SecretKey, ecdsa::VerifyingKey};
pub use signature::{parse_verification_key, verify_signature};
