//! Timing-safe byte comparison

use subtle::ConstantTimeEq;

/// Compare two byte strings without data-dependent early exit.
///
/// Returns `true` only when both inputs have the same length and identical
/// contents. A length mismatch returns `false` immediately and reads no byte
/// of either input.
pub fn secure_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.ct_eq(b).into()
}
