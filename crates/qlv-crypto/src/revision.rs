use qlv_types::HashValue;

use crate::digest::PairDigest;
use crate::join::join_hash_values;

/// Hash of a document revision as the ledger computes it.
///
/// The ledger hashes a revision's metadata and its user data separately and
/// joins the two with the same canonical pairwise join used for the hash
/// tree. Hashing the individual values is left to the caller.
pub fn revision_hash<D: PairDigest + ?Sized>(
    digest: &D,
    metadata_hash: &HashValue,
    data_hash: &HashValue,
) -> HashValue {
    join_hash_values(digest, metadata_hash, data_hash)
}
