use serde::{Deserialize, Serialize};

/// Wrapper the ledger API uses for Ion payloads.
///
/// Serialized with the API's field casing: `{"IonText": "..."}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ValueHolder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ion_text: Option<String>,
}

impl ValueHolder {
    pub fn from_ion_text(text: impl Into<String>) -> Self {
        Self {
            ion_text: Some(text.into()),
        }
    }
}

/// Response of the ledger's get-revision call.
///
/// Only the proof is read; the `Revision` payload and any other fields are
/// ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RevisionResponse {
    pub proof: ValueHolder,
}
