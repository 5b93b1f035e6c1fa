//! # Canonical Serialization
//!
//! Generated services carry their own interface definition so a running
//! device can advertise it. This module produces the two embedded forms:
//!
//! 1. **Canonical JSON**: pretty printed with two-space indentation,
//!    placed in a comment of the generated header for humans.
//! 2. **Canonical CBOR**: the compact binary form sent in service
//!    advertisements. The device never parses it; it only copies the bytes.
//!
//! ## Determinism
//!
//! Both forms are produced from the same `serde_json::Value`. Object keys are
//! emitted in sorted order, so identical documents always yield identical
//! bytes regardless of how the source file ordered its keys.
//!
//! ## Round Trip
//!
//! Parsing `json` or decoding `cbor` reproduces a value equal to the input
//! document. Integers stay integers in both forms.

use serde_json::Value;

use crate::error::CanonicalizationError;

/// The canonical JSON and CBOR copies of one schema document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalSchema {
    json: String,
    cbor: Vec<u8>,
}

impl CanonicalSchema {
    /// Serialize `document` into both canonical forms.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError` if either serializer fails.
    pub fn new(document: &Value) -> Result<Self, CanonicalizationError> {
        Ok(Self {
            json: canonical_json(document)?,
            cbor: canonical_cbor(document)?,
        })
    }

    /// Pretty printed JSON text.
    pub fn json(&self) -> &str {
        &self.json
    }

    /// Compact CBOR bytes.
    pub fn cbor(&self) -> &[u8] {
        &self.cbor
    }

    /// Consumes self and returns `(json, cbor)`.
    pub fn into_parts(self) -> (String, Vec<u8>) {
        (self.json, self.cbor)
    }
}

/// Pretty print `value` as JSON with two-space indentation.
pub fn canonical_json(value: &Value) -> Result<String, CanonicalizationError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Encode `value` as CBOR.
pub fn canonical_cbor(value: &Value) -> Result<Vec<u8>, CanonicalizationError> {
    let mut bytes = Vec::new();
    ciborium::ser::into_writer(value, &mut bytes)
        .map_err(|e| CanonicalizationError::Cbor(e.to_string()))?;
    Ok(bytes)
}

/// Decode CBOR produced by [`canonical_cbor`] back into a JSON value.
pub fn decode_cbor(bytes: &[u8]) -> Result<Value, CanonicalizationError> {
    ciborium::de::from_reader(bytes).map_err(|e| CanonicalizationError::Cbor(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_is_pretty_with_two_spaces() {
        let s = canonical_json(&json!({"type": "Echo", "version": 1})).unwrap();
        assert_eq!(s, "{\n  \"type\": \"Echo\",\n  \"version\": 1\n}");
    }

    #[test]
    fn test_keys_sorted() {
        let s = canonical_json(&json!({"version": 1, "inputs": [], "type": "X"})).unwrap();
        let inputs = s.find("inputs").unwrap();
        let ty = s.find("type").unwrap();
        let version = s.find("version").unwrap();
        assert!(inputs < ty && ty < version);
    }

    #[test]
    fn test_cbor_small_map() {
        // {"id": 0} -> map(1), text(2) "id", unsigned(0)
        let bytes = canonical_cbor(&json!({"id": 0})).unwrap();
        assert_eq!(bytes, vec![0xA1, 0x62, b'i', b'd', 0x00]);
    }

    #[test]
    fn test_cbor_text_and_array() {
        let bytes = canonical_cbor(&json!(["ab", 1, true])).unwrap();
        assert_eq!(bytes, vec![0x83, 0x62, b'a', b'b', 0x01, 0xF5]);
    }

    #[test]
    fn test_cbor_roundtrip() {
        let doc = json!({
            "type": "ServiceTemplate",
            "version": 1,
            "inputs": [{"id": 0, "name": "ExampleInput1", "type": "char[100]"}],
            "outputs": [],
            "registers": [{"id": 1, "name": "Gain", "type": "float", "default": 0.5}]
        });
        let bytes = canonical_cbor(&doc).unwrap();
        assert_eq!(decode_cbor(&bytes).unwrap(), doc);
    }

    #[test]
    fn test_schema_parts_agree() {
        let doc = json!({"type": "Echo", "version": 3, "inputs": [], "outputs": []});
        let schema = CanonicalSchema::new(&doc).unwrap();
        let reparsed: Value = serde_json::from_str(schema.json()).unwrap();
        assert_eq!(reparsed, doc);
        assert_eq!(decode_cbor(schema.cbor()).unwrap(), doc);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(
            decode_cbor(&[0xFF, 0x00]),
            Err(CanonicalizationError::Cbor(_))
        ));
    }
}
