//! Canonical byte serialization for hashing and signing.
//!
//! Two independent implementations must produce byte-identical output for
//! the same logical event, so the rules are strict:
//!
//!   1. `hash` and `signature` never appear in the output.
//!   2. Absent fields are omitted entirely; a `null`-valued object entry is
//!      treated as absent, recursively.
//!   3. Object keys are emitted in code-point order, recursively.
//!   4. Arrays keep their element order; elements are canonicalized.
//!   5. Compact JSON — no whitespace, shortest round-trip numbers.
//!   6. Non-ASCII code points are emitted as literal UTF-8, not `\uXXXX`.
//!
//! Rules 5 and 6 are what `serde_json` already produces; rules 1–4 are
//! enforced here.

use serde::Serialize;
use serde_json::{Map, Value};

use trailproof_contracts::event::EventRecord;

/// The hashed subset of an event: every field except `hash` and `signature`.
///
/// Borrowing keeps `canonical_bytes` allocation-light; the absent-field rule
/// for the optional identifiers is handled by the skip attributes.
#[derive(Serialize)]
struct HashView<'a> {
    event_id: &'a str,
    event_type: &'a str,
    timestamp: &'a str,
    actor_id: &'a str,
    tenant_id: &'a str,
    payload: &'a Map<String, Value>,
    prev_hash: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_id: Option<&'a str>,
}

/// Produce the canonical UTF-8 bytes for `record`.
///
/// The record's own `hash` may hold any placeholder — it is excluded either
/// way, which is what lets `hash` and `signature` be derived fields carried
/// alongside the record.
pub fn canonical_bytes(record: &EventRecord) -> Vec<u8> {
    let view = HashView {
        event_id: &record.event_id,
        event_type: &record.event_type,
        timestamp: &record.timestamp,
        actor_id: &record.actor_id,
        tenant_id: &record.tenant_id,
        payload: &record.payload,
        prev_hash: &record.prev_hash,
        trace_id: record.trace_id.as_deref(),
        session_id: record.session_id.as_deref(),
    };

    // A struct of strings and JSON values cannot fail to serialize.
    let value = serde_json::to_value(&view).expect("event hash view is always serializable");
    let canonical = canonicalize_value(&value);
    serde_json::to_string(&canonical)
        .expect("canonicalized value is always serializable")
        .into_bytes()
}

/// Recursively sort object keys and drop `null`-valued object entries.
///
/// Array elements keep their order — element position is semantic — and
/// `null` *elements* are preserved, since removing them would change the
/// array's meaning.
pub fn canonicalize_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = Map::new();
            for key in keys {
                match &map[key.as_str()] {
                    Value::Null => continue,
                    inner => {
                        out.insert(key.clone(), canonicalize_value(inner));
                    }
                }
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize_value).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record_with_payload(payload: Map<String, Value>) -> EventRecord {
        EventRecord {
            event_id: "id-1".to_string(),
            event_type: "t".to_string(),
            timestamp: "2025-01-15T10:30:00.000Z".to_string(),
            actor_id: "a".to_string(),
            tenant_id: "x".to_string(),
            payload,
            prev_hash: EventRecord::GENESIS_DIGEST.to_string(),
            hash: String::new(),
            trace_id: None,
            session_id: None,
            signature: None,
        }
    }

    #[test]
    fn keys_are_sorted_recursively() {
        let mut payload = Map::new();
        payload.insert("zulu".to_string(), json!({"b": 2, "a": 1}));
        payload.insert("alpha".to_string(), json!(true));

        let bytes = canonical_bytes(&record_with_payload(payload));
        let text = String::from_utf8(bytes).unwrap();

        let alpha = text.find("\"alpha\"").unwrap();
        let zulu = text.find("\"zulu\"").unwrap();
        let a = text.find("\"a\"").unwrap();
        let b = text.find("\"b\"").unwrap();
        assert!(alpha < zulu, "payload keys must sort: {}", text);
        assert!(a < b, "nested keys must sort: {}", text);
    }

    #[test]
    fn null_payload_entries_are_dropped() {
        let mut with_null = Map::new();
        with_null.insert("kept".to_string(), json!(1));
        with_null.insert("gone".to_string(), Value::Null);

        let mut without = Map::new();
        without.insert("kept".to_string(), json!(1));

        assert_eq!(
            canonical_bytes(&record_with_payload(with_null)),
            canonical_bytes(&record_with_payload(without)),
            "a null-valued entry must canonicalize the same as an absent one"
        );
    }

    #[test]
    fn array_nulls_and_order_are_preserved() {
        let mut payload = Map::new();
        payload.insert("seq".to_string(), json!([3, null, 1]));

        let text = String::from_utf8(canonical_bytes(&record_with_payload(payload))).unwrap();
        assert!(text.contains("\"seq\":[3,null,1]"), "array must be untouched: {}", text);
    }

    #[test]
    fn hash_and_signature_never_contribute() {
        let base = record_with_payload(Map::new());
        let decorated = EventRecord {
            hash: "ff".repeat(32),
            signature: Some(format!("hmac-sha256:{}", "ee".repeat(32))),
            ..base.clone()
        };

        assert_eq!(canonical_bytes(&base), canonical_bytes(&decorated));
    }

    #[test]
    fn output_is_compact_with_literal_utf8() {
        let mut payload = Map::new();
        payload.insert("note".to_string(), json!("café"));

        let text = String::from_utf8(canonical_bytes(&record_with_payload(payload))).unwrap();
        assert!(!text.contains(": "), "no whitespace between tokens: {}", text);
        assert!(text.contains("café"), "non-ASCII must stay literal: {}", text);
        assert!(!text.contains("\\u"), "no \\uXXXX escapes: {}", text);
    }

    #[test]
    fn optional_identifiers_appear_only_when_present() {
        let bare = record_with_payload(Map::new());
        let tagged = EventRecord {
            trace_id: Some("tr-1".to_string()),
            ..bare.clone()
        };

        let bare_text = String::from_utf8(canonical_bytes(&bare)).unwrap();
        let tagged_text = String::from_utf8(canonical_bytes(&tagged)).unwrap();
        assert!(!bare_text.contains("trace_id"));
        assert!(tagged_text.contains("\"trace_id\":\"tr-1\""));
    }
}
