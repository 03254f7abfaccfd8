//! # Canonical Serialization
//!
//! Defines `CanonicalBytes`, the sole construction path for bytes that are
//! persisted to the ledger or hashed into event payloads.
//!
//! ## Determinism Invariant
//!
//! The engine may run on several redundant executors whose ledger writes
//! are compared at commit time. Two executors encoding the same element
//! record must therefore produce the same bytes, independent of struct
//! field declaration order or serializer whims. `CanonicalBytes::new()`
//! guarantees this by serializing through RFC 8785 (JSON Canonicalization
//! Scheme): lexicographically sorted keys, compact separators, UTF-8.
//!
//! The inner field is private — any function that wants canonical bytes
//! must accept `&CanonicalBytes`, and the only way to produce one is this
//! constructor. A stray `serde_json::to_vec()` cannot masquerade as a
//! canonical encoding.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS canonicalization.
///
/// # Invariants
///
/// - The only constructor is [`CanonicalBytes::new()`].
/// - Object keys are sorted, separators are compact (RFC 8785).
/// - Float values are rejected; record fields are strings, booleans,
///   integers, or nested structures thereof.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Canonicalize any serializable value.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalizationError::FloatRejected`] if the value
    /// contains a non-integer number, or
    /// [`CanonicalizationError::SerializationFailed`] if serialization
    /// fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        reject_floats(&value)?;
        let s = serde_jcs::to_string(&value)?;
        Ok(Self(s.into_bytes()))
    }

    /// The canonical byte sequence.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Walk the value tree and reject any number that is not an integer.
fn reject_floats(value: &Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(()),
        Value::Number(n) => {
            if n.is_f64() && !n.is_i64() && !n.is_u64() {
                if let Some(f) = n.as_f64() {
                    return Err(CanonicalizationError::FloatRejected(f));
                }
            }
            Ok(())
        }
        Value::Object(map) => map.values().try_for_each(reject_floats),
        Value::Array(arr) => arr.iter().try_for_each(reject_floats),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_sorted_and_compact() {
        let data = serde_json::json!({"state": "ENABLED", "id": "Gateway_1", "kind": "gateway"});
        let cb = CanonicalBytes::new(&data).unwrap();
        assert_eq!(
            std::str::from_utf8(cb.as_bytes()).unwrap(),
            r#"{"id":"Gateway_1","kind":"gateway","state":"ENABLED"}"#
        );
    }

    #[test]
    fn test_field_declaration_order_is_irrelevant() {
        #[derive(serde::Serialize)]
        struct A {
            zulu: bool,
            alpha: i64,
        }
        #[derive(serde::Serialize)]
        struct B {
            alpha: i64,
            zulu: bool,
        }
        let a = CanonicalBytes::new(&A { zulu: true, alpha: 7 }).unwrap();
        let b = CanonicalBytes::new(&B { alpha: 7, zulu: true }).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_nested_objects_sorted() {
        let data = serde_json::json!({"outer": {"b": 2, "a": 1}, "list": [3, 2, 1]});
        let cb = CanonicalBytes::new(&data).unwrap();
        assert_eq!(
            std::str::from_utf8(cb.as_bytes()).unwrap(),
            r#"{"list":[3,2,1],"outer":{"a":1,"b":2}}"#
        );
    }

    #[test]
    fn test_float_rejected() {
        let data = serde_json::json!({"amount": 1.5});
        match CanonicalBytes::new(&data) {
            Err(CanonicalizationError::FloatRejected(f)) => assert_eq!(f, 1.5),
            other => panic!("expected FloatRejected, got {other:?}"),
        }
    }

    #[test]
    fn test_deeply_nested_float_rejected() {
        let data = serde_json::json!({"a": {"b": [{"c": 0.25}]}});
        assert!(CanonicalBytes::new(&data).is_err());
    }

    #[test]
    fn test_integers_null_bool_accepted() {
        let data = serde_json::json!({"n": 42, "none": null, "flag": false});
        let cb = CanonicalBytes::new(&data).unwrap();
        assert_eq!(
            std::str::from_utf8(cb.as_bytes()).unwrap(),
            r#"{"flag":false,"n":42,"none":null}"#
        );
    }

    #[test]
    fn test_empty_object() {
        let cb = CanonicalBytes::new(&serde_json::json!({})).unwrap();
        assert_eq!(cb.as_bytes(), b"{}");
        assert!(!cb.is_empty());
        assert_eq!(cb.len(), 2);
    }

    #[test]
    fn test_unicode_passes_through_utf8() {
        let data = serde_json::json!({"motivation": "annul\u{00e9}"});
        let cb = CanonicalBytes::new(&data).unwrap();
        assert!(std::str::from_utf8(cb.as_bytes()).unwrap().contains('\u{00e9}'));
    }
}
