use tracing::debug;

use qlv_proof::Proof;
use qlv_types::HashValue;

use crate::digest::{PairDigest, Sha256Digest};
use crate::error::VerifyResult;
use crate::join::join_hashes_pairwise;
use crate::revision::revision_hash;

/// Verifies that a document revision is included under a ledger digest.
///
/// Holds only its digest capability. Every call works on its own inputs, so a
/// single verifier can be shared across threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct Verifier<D = Sha256Digest> {
    digest: D,
}

impl Verifier<Sha256Digest> {
    /// Verifier using SHA-256, the ledger's digest.
    pub fn sha256() -> Self {
        Self {
            digest: Sha256Digest,
        }
    }
}

impl<D: PairDigest> Verifier<D> {
    /// Verifier using a caller-supplied digest.
    pub fn with_digest(digest: D) -> Self {
        Self { digest }
    }

    /// Canonical pairwise join of two hashes.
    pub fn join(&self, h1: &[u8], h2: &[u8]) -> VerifyResult<Vec<u8>> {
        join_hashes_pairwise(&self.digest, h1, h2)
    }

    /// Fold the proof's internal hashes into `leaf_hash`, left to right.
    ///
    /// An empty proof yields the leaf hash unchanged.
    pub fn fold(&self, proof: &Proof, leaf_hash: &[u8]) -> VerifyResult<Vec<u8>> {
        proof
            .internal_hashes()
            .iter()
            .try_fold(leaf_hash.to_vec(), |acc, sibling| self.join(&acc, sibling))
    }

    /// Decode the proof text and fold it into the candidate ledger digest.
    pub fn build_candidate_digest(&self, proof_text: &str, leaf_hash: &[u8]) -> VerifyResult<Vec<u8>> {
        let proof = Proof::from_ion_text(proof_text)?;
        self.fold(&proof, leaf_hash)
    }

    /// Verify a revision against a ledger digest using the ledger's Ion-text
    /// proof.
    ///
    /// Returns `Ok(false)` when the recomputed digest differs from
    /// `ledger_digest`. Malformed proofs and hashes of the wrong width are
    /// errors, not negative verdicts.
    pub fn verify(
        &self,
        document_hash: impl AsRef<[u8]>,
        ledger_digest: impl AsRef<[u8]>,
        proof_text: &str,
    ) -> VerifyResult<bool> {
        let proof = Proof::from_ion_text(proof_text)?;
        self.verify_proof(document_hash, ledger_digest, &proof)
    }

    /// Verify a revision against a ledger digest using a decoded proof.
    pub fn verify_proof(
        &self,
        document_hash: impl AsRef<[u8]>,
        ledger_digest: impl AsRef<[u8]>,
        proof: &Proof,
    ) -> VerifyResult<bool> {
        let candidate = self.fold(proof, document_hash.as_ref())?;
        let verified = candidate.as_slice() == ledger_digest.as_ref();
        debug!(depth = proof.len(), verified, "revision proof checked");
        Ok(verified)
    }

    /// Hash of a revision from its metadata and data hashes.
    pub fn revision_hash(&self, metadata_hash: &HashValue, data_hash: &HashValue) -> HashValue {
        revision_hash(&self.digest, metadata_hash, data_hash)
    }
}

/// Verify a revision with SHA-256. See [`Verifier::verify`].
pub fn verify(
    document_hash: impl AsRef<[u8]>,
    ledger_digest: impl AsRef<[u8]>,
    proof_text: &str,
) -> VerifyResult<bool> {
    Verifier::sha256().verify(document_hash, ledger_digest, proof_text)
}
