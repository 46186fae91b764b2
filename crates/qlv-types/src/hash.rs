use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};

/// Width in bytes of every hash handled by the verifier (SHA-256 output).
pub const HASH_LENGTH: usize = 32;

/// An immutable 32-byte hash value.
///
/// Document hashes, proof siblings, ledger digests and candidate digests are
/// all `HashValue`s. A `HashValue` can only be built from exactly
/// [`HASH_LENGTH`] bytes; any other length is rejected at construction.
///
/// Serializes as standard base64, which is how the ledger publishes digests.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HashValue(#[serde(with = "base64_serde")] [u8; HASH_LENGTH]);

impl HashValue {
    /// Wrap a pre-computed 32-byte hash.
    pub const fn from_hash(hash: [u8; HASH_LENGTH]) -> Self {
        Self(hash)
    }

    /// Copy a hash out of a slice, rejecting any length other than 32.
    pub fn from_slice(bytes: &[u8]) -> TypeResult<Self> {
        let arr: [u8; HASH_LENGTH] = bytes.try_into().map_err(|_| TypeError::InvalidLength {
            expected: HASH_LENGTH,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    /// The raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> TypeResult<Self> {
        let bytes = hex::decode(s.trim()).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Standard (padded) base64 representation.
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.0)
    }

    /// Parse from a standard base64 string.
    pub fn from_base64(s: &str) -> TypeResult<Self> {
        let bytes = BASE64
            .decode(s.trim())
            .map_err(|e| TypeError::InvalidBase64(e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

impl fmt::Debug for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashValue({})", self.short_hex())
    }
}

impl fmt::Display for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base64())
    }
}

impl AsRef<[u8]> for HashValue {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; HASH_LENGTH]> for HashValue {
    fn from(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl From<HashValue> for [u8; HASH_LENGTH] {
    fn from(hash: HashValue) -> Self {
        hash.0
    }
}

impl TryFrom<&[u8]> for HashValue {
    type Error = TypeError;

    fn try_from(bytes: &[u8]) -> TypeResult<Self> {
        Self::from_slice(bytes)
    }
}

impl TryFrom<Vec<u8>> for HashValue {
    type Error = TypeError;

    fn try_from(bytes: Vec<u8>) -> TypeResult<Self> {
        Self::from_slice(&bytes)
    }
}

mod base64_serde {
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::HASH_LENGTH;

    pub fn serialize<S>(hash: &[u8; HASH_LENGTH], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&BASE64.encode(hash))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; HASH_LENGTH], D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        let bytes = BASE64.decode(text.trim()).map_err(serde::de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("expected 32-byte hash"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> HashValue {
        let mut bytes = [0u8; HASH_LENGTH];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = (i as u8).wrapping_mul(7);
        }
        HashValue::from_hash(bytes)
    }

    #[test]
    fn from_slice_accepts_32_bytes() {
        let hash = HashValue::from_slice(&[9u8; 32]).unwrap();
        assert_eq!(hash.as_bytes(), &[9u8; 32]);
    }

    #[test]
    fn from_slice_rejects_other_lengths() {
        for len in [0usize, 1, 31, 33, 64] {
            let err = HashValue::from_slice(&vec![0u8; len]).unwrap_err();
            assert_eq!(
                err,
                TypeError::InvalidLength {
                    expected: 32,
                    actual: len
                }
            );
        }
    }

    #[test]
    fn hex_roundtrip() {
        let hash = sample();
        let parsed = HashValue::from_hex(&hash.to_hex()).unwrap();
        assert_eq!(hash, parsed);
    }

    #[test]
    fn invalid_hex_is_rejected() {
        let err = HashValue::from_hex("not hex").unwrap_err();
        assert!(matches!(err, TypeError::InvalidHex(_)));
    }

    #[test]
    fn base64_matches_known_encoding() {
        let hash = HashValue::from_hash([0u8; 32]);
        assert_eq!(
            hash.to_base64(),
            "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA="
        );
    }

    #[test]
    fn base64_with_wrong_length_is_rejected() {
        // "AAEC" decodes to three bytes
        let err = HashValue::from_base64("AAEC").unwrap_err();
        assert_eq!(
            err,
            TypeError::InvalidLength {
                expected: 32,
                actual: 3
            }
        );
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let err = HashValue::from_base64("***").unwrap_err();
        assert!(matches!(err, TypeError::InvalidBase64(_)));
    }

    #[test]
    fn display_is_base64() {
        let hash = sample();
        assert_eq!(format!("{hash}"), hash.to_base64());
    }

    #[test]
    fn debug_is_short() {
        let hash = sample();
        assert_eq!(format!("{hash:?}"), format!("HashValue({})", hash.short_hex()));
        assert_eq!(hash.short_hex().len(), 8);
    }

    #[test]
    fn serde_uses_base64_string() {
        let hash = sample();
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", hash.to_base64()));
        let parsed: HashValue = serde_json::from_str(&json).unwrap();
        assert_eq!(hash, parsed);
    }

    #[test]
    fn serde_rejects_short_hash() {
        let result: Result<HashValue, _> = serde_json::from_str("\"AAEC\"");
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn text_forms_are_lossless(bytes in proptest::array::uniform32(any::<u8>())) {
            let hash = HashValue::from_hash(bytes);
            prop_assert_eq!(HashValue::from_hex(&hash.to_hex()).unwrap(), hash);
            prop_assert_eq!(HashValue::from_base64(&hash.to_base64()).unwrap(), hash);
        }
    }
}
