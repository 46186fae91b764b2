//! Revision proof decoding for the ledger revision verifier.
//!
//! The ledger returns an inclusion proof as Ion text: a list of blobs, one per
//! sibling hash on the path from the revision's leaf up to the ledger digest.
//!
//! ```text
//! [{{ 8X0Y...Zc= }}, {{ q1Hn...0A= }}]
//! ```
//!
//! This crate turns that text into a [`Proof`], preserving element order and
//! content exactly. It does not validate hash widths; that is the join
//! primitive's job.

pub mod error;
pub mod holder;
pub mod proof;
pub mod reader;

pub use error::{ProofError, ProofResult};
pub use holder::{RevisionResponse, ValueHolder};
pub use proof::Proof;
