//! Foundation types for the ledger revision verifier (QLV).
//!
//! Every hash that flows through verification (the document's leaf hash, the
//! siblings of an inclusion proof, the trusted ledger digest and the
//! recomputed candidate) is 32 bytes wide. [`HashValue`] carries that
//! invariant in the type system.
//!
//! # Key Types
//!
//! - [`HashValue`] — Immutable 32-byte digest with hex and base64 text forms
//! - [`TypeError`] — Failures when constructing or parsing a [`HashValue`]

pub mod error;
pub mod hash;

pub use error::{TypeError, TypeResult};
pub use hash::{HashValue, HASH_LENGTH};
