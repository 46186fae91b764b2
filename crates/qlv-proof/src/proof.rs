use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use tracing::debug;

use qlv_types::HashValue;

use crate::error::{ProofError, ProofResult};
use crate::holder::ValueHolder;
use crate::reader::IonTextReader;

/// Inclusion proof for a ledger revision.
///
/// The internal hashes are the siblings met while walking from the
/// revision's leaf up to the ledger digest, in exactly the order the ledger
/// supplied them. Elements are kept as raw blobs: an empty blob is a valid
/// element (the join treats it as an identity), and width checking happens
/// when the proof is folded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Proof {
    internal_hashes: Vec<Vec<u8>>,
}

impl Proof {
    /// Build a proof from raw sibling blobs.
    pub fn new(internal_hashes: Vec<Vec<u8>>) -> Self {
        Self { internal_hashes }
    }

    /// Build a proof from well-formed sibling hashes.
    pub fn from_hashes(hashes: impl IntoIterator<Item = HashValue>) -> Self {
        Self {
            internal_hashes: hashes.into_iter().map(|h| h.as_bytes().to_vec()).collect(),
        }
    }

    /// The sibling hashes from leaf to root.
    pub fn internal_hashes(&self) -> &[Vec<u8>] {
        &self.internal_hashes
    }

    /// Number of siblings (the depth of the leaf).
    pub fn len(&self) -> usize {
        self.internal_hashes.len()
    }

    /// Returns `true` when the leaf is already the root.
    pub fn is_empty(&self) -> bool {
        self.internal_hashes.is_empty()
    }

    /// Decode a proof from the Ion text returned by the ledger.
    ///
    /// Each list element is decoded independently; source order is kept.
    pub fn from_ion_text(text: &str) -> ProofResult<Self> {
        let mut reader = IonTextReader::new(text);
        reader.step_in()?;

        let mut internal_hashes = Vec::new();
        if !reader.step_out_if_empty() {
            loop {
                let index = internal_hashes.len();
                internal_hashes.push(reader.read_blob(index)?);
                if !reader.next_separator(index)? {
                    break;
                }
            }
        }

        if !reader.at_end() {
            return Err(ProofError::decode(
                internal_hashes.len(),
                "unexpected content after the closing bracket",
            ));
        }

        debug!(elements = internal_hashes.len(), "decoded revision proof");
        Ok(Self { internal_hashes })
    }

    /// Decode a proof from the ledger API's value holder.
    pub fn from_value_holder(holder: &ValueHolder) -> ProofResult<Self> {
        let text = holder.ion_text.as_deref().ok_or(ProofError::MissingText)?;
        Self::from_ion_text(text)
    }

    /// Render the proof in the same Ion text form it is decoded from.
    pub fn to_ion_text(&self) -> String {
        let elements: Vec<String> = self
            .internal_hashes
            .iter()
            .map(|h| format!("{{{{{}}}}}", BASE64.encode(h)))
            .collect();
        format!("[{}]", elements.join(","))
    }
}

impl FromStr for Proof {
    type Err = ProofError;

    fn from_str(s: &str) -> ProofResult<Self> {
        Self::from_ion_text(s)
    }
}
