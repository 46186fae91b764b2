use qlv_proof::Proof;
use qlv_types::HashValue;

use crate::digest::{PairDigest, Sha256Digest};
use crate::join::join_hash_values;

/// Hash tree built with the ledger's canonical pairwise join.
///
/// Because the join orders its operands itself, proofs need no left/right
/// markers: a proof is just the list of siblings from leaf to root. A node
/// without a sibling on an odd-sized level is promoted unchanged and
/// contributes nothing to the proof.
#[derive(Clone, Debug)]
pub struct LedgerTree {
    /// All tree nodes, level by level.
    /// Level 0 = leaves, last level = the single root.
    levels: Vec<Vec<HashValue>>,
}

impl LedgerTree {
    /// Build a SHA-256 tree from leaf hashes.
    pub fn from_leaves(leaves: Vec<HashValue>) -> Self {
        Self::with_digest(&Sha256Digest, leaves)
    }

    /// Build a tree from leaf hashes with the given digest.
    ///
    /// An empty list produces a tree without a root. A single leaf is its
    /// own root.
    pub fn with_digest<D: PairDigest + ?Sized>(digest: &D, leaves: Vec<HashValue>) -> Self {
        if leaves.is_empty() {
            return Self { levels: vec![] };
        }

        let mut levels = vec![leaves];
        while levels[levels.len() - 1].len() > 1 {
            let current = &levels[levels.len() - 1];
            let next: Vec<HashValue> = current
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => join_hash_values(digest, left, right),
                    [odd] => *odd,
                    _ => unreachable!("chunks(2) yields one or two nodes"),
                })
                .collect();
            levels.push(next);
        }

        Self { levels }
    }

    /// The root hash, or `None` for an empty tree.
    pub fn root(&self) -> Option<HashValue> {
        self.levels.last().and_then(|level| level.first()).copied()
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// The leaf hash at `index`.
    pub fn leaf(&self, index: usize) -> Option<HashValue> {
        self.levels.first().and_then(|leaves| leaves.get(index)).copied()
    }

    /// Inclusion proof for the leaf at `index`.
    pub fn proof(&self, index: usize) -> Option<Proof> {
        if index >= self.leaf_count() {
            return None;
        }

        let mut siblings = Vec::new();
        let mut idx = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling_idx = idx ^ 1;
            if let Some(sibling) = level.get(sibling_idx) {
                siblings.push(*sibling);
            }
            idx /= 2;
        }

        Some(Proof::from_hashes(siblings))
    }
}
