//! Symmetric decryption for the two token families
//!
//! - Google Pay (`ECv1`/`ECv2`): AES-256-CTR, zero 16-byte IV, unauthenticated
//! - Android Pay: AES-256-GCM, zero 12-byte nonce, empty AAD, detached tag
//!
//! Both use a fixed all-zero IV because every key is derived fresh from a
//! one-time ephemeral ECDH exchange and is never reused.

use aes::Aes256;
use aes_gcm::{
    Aes256Gcm, Nonce, Tag,
    aead::{AeadInPlace, KeyInit},
};
use ctr::cipher::{KeyIvInit, StreamCipher};

use crate::error::CryptoError;

type Aes256Ctr = ctr::Ctr128BE<Aes256>;

/// AES-256 key size.
pub const KEY_SIZE: usize = 32;

/// CTR initialization vector size (one AES block).
pub const CTR_IV_SIZE: usize = 16;

/// GCM nonce size.
pub const GCM_NONCE_SIZE: usize = 12;

/// GCM authentication tag size.
pub const GCM_TAG_SIZE: usize = 16;

/// Decrypt with AES-256-CTR under a zero IV.
///
/// CTR mode has no integrity check: any ciphertext of any length decrypts.
/// Authenticity must come from elsewhere (for Google Pay tokens, the ECDSA
/// signature over the envelope carrying the ciphertext).
pub fn aes256_ctr_decrypt(key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    check_key(key)?;

    let iv = [0u8; CTR_IV_SIZE];
    let mut cipher = Aes256Ctr::new_from_slices(key, &iv)
        .map_err(|_| CryptoError::InvalidKeyLength { expected: KEY_SIZE, actual: key.len() })?;

    let mut buffer = ciphertext.to_vec();
    cipher.apply_keystream(&mut buffer);
    Ok(buffer)
}

/// Decrypt with AES-256-GCM under a zero nonce and empty associated data.
///
/// # Errors
///
/// - `InvalidKeyLength`: key is not 32 bytes
/// - `InvalidTagLength`: tag is not 16 bytes
/// - `AuthenticationFailed`: tag does not match (wrong key or tampering)
pub fn aes256_gcm_decrypt(
    key: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    check_key(key)?;

    if tag.len() != GCM_TAG_SIZE {
        return Err(CryptoError::InvalidTagLength { expected: GCM_TAG_SIZE, actual: tag.len() });
    }

    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|_| CryptoError::InvalidKeyLength { expected: KEY_SIZE, actual: key.len() })?;

    let nonce = [0u8; GCM_NONCE_SIZE];
    let mut buffer = ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(Nonce::from_slice(&nonce), b"", &mut buffer, Tag::from_slice(tag))
        .map_err(|_| CryptoError::AuthenticationFailed)?;

    Ok(buffer)
}

fn check_key(key: &[u8]) -> Result<(), CryptoError> {
    if key.len() == KEY_SIZE {
        Ok(())
    } else {
        Err(CryptoError::InvalidKeyLength { expected: KEY_SIZE, actual: key.len() })
    }
}
