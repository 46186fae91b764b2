use sha2::{Digest, Sha256};

use qlv_types::{HashValue, HASH_LENGTH};

/// Digest capability used to combine two ordered hashes.
///
/// Implementations must be pure: the same input always yields the same
/// 32-byte output. The verifier never calls a global hash function directly,
/// so tests can substitute their own digest.
pub trait PairDigest {
    /// Digest arbitrary bytes into a 32-byte hash.
    fn digest(&self, data: &[u8]) -> [u8; HASH_LENGTH];
}

impl<D: PairDigest + ?Sized> PairDigest for &D {
    fn digest(&self, data: &[u8]) -> [u8; HASH_LENGTH] {
        (**self).digest(data)
    }
}

/// SHA-256, the digest the ledger uses for revisions and its hash tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sha256Digest;

impl Sha256Digest {
    /// Hash raw bytes into a [`HashValue`].
    pub fn hash(data: &[u8]) -> HashValue {
        HashValue::from_hash(Sha256::digest(data).into())
    }
}

impl PairDigest for Sha256Digest {
    fn digest(&self, data: &[u8]) -> [u8; HASH_LENGTH] {
        Sha256::digest(data).into()
    }
}
