//! Key derivation using HKDF-SHA256 with a zero salt

use hkdf::Hkdf;
use sha2::Sha256;

use crate::error::CryptoError;

/// Salt for the extract step. The token protocol fixes it at 32 zero bytes.
const ZERO_SALT: [u8; 32] = [0u8; 32];

/// SHA-256 output size (one expand block).
pub const HASH_LEN: usize = 32;

/// Largest output HKDF-SHA256 can produce (255 expand blocks).
pub const MAX_OUTPUT_LEN: usize = 255 * HASH_LEN;

/// Derive `output_len` bytes of key material from `secret`.
///
/// Extract runs HMAC-SHA256 keyed with 32 zero bytes over `secret`. Expand
/// chains `T(i) = HMAC(PRK, T(i-1) || info || i)` starting at counter 1 and
/// truncates the concatenation to exactly `output_len` bytes.
///
/// # Security
///
/// - Deterministic: same `(secret, info, output_len)` always yields same bytes
/// - Different `info` values produce independent outputs
/// - Output longer than one block is supported up to [`MAX_OUTPUT_LEN`]
pub fn derive(secret: &[u8], info: &[u8], output_len: usize) -> Result<Vec<u8>, CryptoError> {
    let hkdf = Hkdf::<Sha256>::new(Some(&ZERO_SALT), secret);

    let mut okm = vec![0u8; output_len];
    hkdf.expand(info, &mut okm)
        .map_err(|_| CryptoError::OutputTooLong { requested: output_len, max: MAX_OUTPUT_LEN })?;

    Ok(okm)
}
