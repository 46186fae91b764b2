use std::cmp::Ordering;

use qlv_types::{HashValue, HASH_LENGTH};

use crate::digest::PairDigest;
use crate::error::{VerifyError, VerifyResult};

/// Canonical ordering of two 32-byte hashes.
///
/// Bytes are compared from the last index down to the first, each one read
/// as a signed `i8`. The first difference decides. This is not an unsigned
/// lexicographic comparison: `0x80` (-128) sorts before `0x7f` (127).
fn canonical_order(h1: &[u8; HASH_LENGTH], h2: &[u8; HASH_LENGTH]) -> Ordering {
    for i in (0..HASH_LENGTH).rev() {
        let ord = (h1[i] as i8).cmp(&(h2[i] as i8));
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

fn as_hash(bytes: &[u8]) -> VerifyResult<&[u8; HASH_LENGTH]> {
    bytes
        .try_into()
        .map_err(|_| VerifyError::InvalidHashLength {
            actual: bytes.len(),
        })
}

/// Compare two hashes with the ledger's canonical ordering.
///
/// Both operands must be exactly 32 bytes.
pub fn compare_hash_values(h1: &[u8], h2: &[u8]) -> VerifyResult<Ordering> {
    Ok(canonical_order(as_hash(h1)?, as_hash(h2)?))
}

fn digest_ordered<D: PairDigest + ?Sized>(
    digest: &D,
    h1: &[u8; HASH_LENGTH],
    h2: &[u8; HASH_LENGTH],
) -> [u8; HASH_LENGTH] {
    let (first, second) = match canonical_order(h1, h2) {
        Ordering::Less => (h1, h2),
        _ => (h2, h1),
    };
    let mut concatenated = [0u8; 2 * HASH_LENGTH];
    concatenated[..HASH_LENGTH].copy_from_slice(first);
    concatenated[HASH_LENGTH..].copy_from_slice(second);
    digest.digest(&concatenated)
}

/// Join two hashes into their parent.
///
/// An empty operand is an identity: the other operand is returned unchanged
/// (without any width check). Otherwise both operands must be 32 bytes; they
/// are put in canonical order, concatenated, and digested.
pub fn join_hashes_pairwise<D: PairDigest + ?Sized>(
    digest: &D,
    h1: &[u8],
    h2: &[u8],
) -> VerifyResult<Vec<u8>> {
    if h1.is_empty() {
        return Ok(h2.to_vec());
    }
    if h2.is_empty() {
        return Ok(h1.to_vec());
    }
    Ok(digest_ordered(digest, as_hash(h1)?, as_hash(h2)?).to_vec())
}

/// Join two well-formed hash values. Infallible since widths are known.
pub fn join_hash_values<D: PairDigest + ?Sized>(
    digest: &D,
    h1: &HashValue,
    h2: &HashValue,
) -> HashValue {
    HashValue::from_hash(digest_ordered(digest, h1.as_bytes(), h2.as_bytes()))
}
