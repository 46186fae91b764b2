use rand::Rng;

use crate::error::{VerifyError, VerifyResult};

/// Return a copy of `bytes` with bit `bit_index` inverted.
///
/// Bits are numbered from the least significant bit of byte 0.
pub fn flip_bit(bytes: &[u8], bit_index: usize) -> VerifyResult<Vec<u8>> {
    if bytes.is_empty() {
        return Err(VerifyError::EmptyInput);
    }
    if bit_index >= bytes.len() * 8 {
        return Err(VerifyError::BitOutOfRange {
            bit_index,
            len: bytes.len(),
        });
    }
    let mut altered = bytes.to_vec();
    altered[bit_index / 8] ^= 1 << (bit_index % 8);
    Ok(altered)
}

/// Return a copy of `bytes` with one randomly chosen bit inverted.
///
/// Meant for demonstrating tamper detection: a single corrupted bit in any
/// verification input must turn a passing proof into a failing one.
pub fn flip_random_bit(bytes: &[u8]) -> VerifyResult<Vec<u8>> {
    flip_random_bit_with(&mut rand::thread_rng(), bytes)
}

/// [`flip_random_bit`] with a caller-supplied random source.
pub fn flip_random_bit_with<R: Rng>(rng: &mut R, bytes: &[u8]) -> VerifyResult<Vec<u8>> {
    if bytes.is_empty() {
        return Err(VerifyError::EmptyInput);
    }
    let bit_index = rng.gen_range(0..bytes.len() * 8);
    flip_bit(bytes, bit_index)
}
