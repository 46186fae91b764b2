use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use qlv_proof::RevisionResponse;
use qlv_types::{HashValue, TypeResult};

/// Text encoding of hash arguments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HashEncoding {
    /// Standard base64, as the ledger publishes digests.
    #[default]
    Base64,
    Hex,
}

impl HashEncoding {
    pub fn parse(&self, text: &str) -> TypeResult<HashValue> {
        match self {
            Self::Base64 => HashValue::from_base64(text),
            Self::Hex => HashValue::from_hex(text),
        }
    }

    pub fn encode(&self, hash: &HashValue) -> String {
        match self {
            Self::Base64 => hash.to_base64(),
            Self::Hex => hash.to_hex(),
        }
    }
}

/// Everything needed to verify one revision, as stored in a request file.
///
/// ```toml
/// document_hash = "..."
/// digest = "..."
/// proof = "[{{...}},{{...}}]"
/// encoding = "base64"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub document_hash: String,
    pub digest: String,
    /// Proof as Ion text.
    pub proof: String,
    #[serde(default)]
    pub encoding: HashEncoding,
}

impl VerificationRequest {
    /// Load a request from a `.json` file or, for any other extension, TOML.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read request file {}", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let request = if is_json {
            serde_json::from_str(&text)
                .with_context(|| format!("invalid JSON request {}", path.display()))?
        } else {
            toml::from_str(&text)
                .with_context(|| format!("invalid TOML request {}", path.display()))?
        };
        Ok(request)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string(self).context("failed to render request as TOML")
    }

    pub fn document_hash(&self) -> anyhow::Result<HashValue> {
        self.encoding
            .parse(&self.document_hash)
            .context("invalid document hash")
    }

    pub fn ledger_digest(&self) -> anyhow::Result<HashValue> {
        self.encoding.parse(&self.digest).context("invalid ledger digest")
    }
}

/// Read proof text given on the command line; `@path` reads it from a file.
pub fn read_proof_argument(arg: &str) -> anyhow::Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read proof file {path}")),
        None => Ok(arg.to_string()),
    }
}

/// Extract the proof text from a saved get-revision JSON response.
pub fn read_proof_response(path: &Path) -> anyhow::Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read revision response {}", path.display()))?;
    let response: RevisionResponse = serde_json::from_str(&text)
        .with_context(|| format!("invalid revision response {}", path.display()))?;
    response
        .proof
        .ion_text
        .context("revision response has no proof text")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> VerificationRequest {
        VerificationRequest {
            document_hash: HashValue::from_hash([1; 32]).to_base64(),
            digest: HashValue::from_hash([2; 32]).to_base64(),
            proof: "[{{AAEC}}]".into(),
            encoding: HashEncoding::Base64,
        }
    }

    fn write_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_toml_request() {
        let request = sample();
        let file = write_file(".toml", &request.to_toml().unwrap());
        assert_eq!(VerificationRequest::load(file.path()).unwrap(), request);
    }

    #[test]
    fn load_json_request() {
        let request = sample();
        let file = write_file(".json", &serde_json::to_string(&request).unwrap());
        assert_eq!(VerificationRequest::load(file.path()).unwrap(), request);
    }

    #[test]
    fn encoding_defaults_to_base64() {
        let text = "document_hash = \"a\"\ndigest = \"b\"\nproof = \"[]\"\n";
        let file = write_file(".toml", text);
        let request = VerificationRequest::load(file.path()).unwrap();
        assert_eq!(request.encoding, HashEncoding::Base64);
    }

    #[test]
    fn hex_encoding_parses_hashes() {
        let request = VerificationRequest {
            document_hash: "11".repeat(32),
            digest: "22".repeat(32),
            proof: "[]".into(),
            encoding: HashEncoding::Hex,
        };
        assert_eq!(
            request.document_hash().unwrap(),
            HashValue::from_hash([0x11; 32])
        );
        assert_eq!(request.ledger_digest().unwrap(), HashValue::from_hash([0x22; 32]));
    }

    #[test]
    fn bad_hash_is_reported() {
        let mut request = sample();
        request.digest = "AAEC".into();
        let err = request.ledger_digest().unwrap_err();
        assert!(err.to_string().contains("invalid ledger digest"));
    }

    #[test]
    fn missing_file_is_error() {
        assert!(VerificationRequest::load(Path::new("/nonexistent/request.toml")).is_err());
    }

    #[test]
    fn proof_argument_from_file() {
        let file = write_file(".ion", "[{{AAEC}}]");
        let arg = format!("@{}", file.path().display());
        assert_eq!(read_proof_argument(&arg).unwrap(), "[{{AAEC}}]");
        assert_eq!(read_proof_argument("[]").unwrap(), "[]");
    }

    #[test]
    fn proof_from_revision_response() {
        let file = write_file(".json", r#"{"Proof": {"IonText": "[{{AAEC}}]"}}"#);
        assert_eq!(read_proof_response(file.path()).unwrap(), "[{{AAEC}}]");

        let file = write_file(".json", r#"{"Proof": {}}"#);
        assert!(read_proof_response(file.path()).is_err());
    }

    #[test]
    fn encode_matches_parse() {
        let hash = HashValue::from_hash([0xab; 32]);
        for encoding in [HashEncoding::Base64, HashEncoding::Hex] {
            assert_eq!(encoding.parse(&encoding.encode(&hash)).unwrap(), hash);
        }
    }
}
