use thiserror::Error;

/// Errors from decoding a revision proof.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProofError {
    #[error("malformed proof at element {position}: {reason}")]
    Decode { position: usize, reason: String },

    #[error("value holder carries no Ion text")]
    MissingText,
}

impl ProofError {
    pub(crate) fn decode(position: usize, reason: impl Into<String>) -> Self {
        Self::Decode {
            position,
            reason: reason.into(),
        }
    }
}

pub type ProofResult<T> = Result<T, ProofError>;
