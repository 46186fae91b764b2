use thiserror::Error;

use qlv_proof::ProofError;

/// Errors that stop a verification before a verdict is reached.
///
/// A digest mismatch is not an error; it is a `false` verdict.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("proof decode error: {0}")]
    Decode(#[from] ProofError),

    #[error("invalid hash length: expected 32, got {actual}")]
    InvalidHashLength { actual: usize },

    /// The tamper helpers were given an empty value.
    #[error("cannot flip a bit of an empty value")]
    EmptyInput,

    /// `flip_bit` was asked for a bit past the end of the value.
    #[error("bit {bit_index} is out of range for a {len}-byte value")]
    BitOutOfRange { bit_index: usize, len: usize },
}

pub type VerifyResult<T> = Result<T, VerifyError>;
