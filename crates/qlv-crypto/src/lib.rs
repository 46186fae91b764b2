//! Inclusion proof verification for ledger revisions.
//!
//! A revision is included under a ledger digest when folding its proof
//! against the revision's hash reproduces that digest:
//!
//! ```text
//! acc = document_hash
//! for sibling in proof: acc = join(acc, sibling)
//! verified = (acc == ledger_digest)
//! ```
//!
//! `join` orders its two operands with the ledger's canonical comparison
//! (last byte first, bytes read as signed) before hashing their
//! concatenation with SHA-256, so it is symmetric in its arguments.
//!
//! The digest function is a [`PairDigest`] capability held by the
//! [`Verifier`]; nothing here touches global state, so verifiers can be
//! shared freely across threads.

pub mod digest;
pub mod error;
pub mod join;
pub mod revision;
pub mod tamper;
pub mod tree;
pub mod verifier;

pub use digest::{PairDigest, Sha256Digest};
pub use error::{VerifyError, VerifyResult};
pub use join::{compare_hash_values, join_hash_values, join_hashes_pairwise};
pub use revision::revision_hash;
pub use tamper::{flip_bit, flip_random_bit, flip_random_bit_with};
pub use tree::LedgerTree;
pub use verifier::{verify, Verifier};
