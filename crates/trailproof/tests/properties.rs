//! Universal properties of the chain, the canonical form, and pagination,
//! exercised over generated event streams.

mod common;

use proptest::prelude::*;
use serde_json::{json, Map, Value};

use trailproof::{
    canonical_bytes, compute_digest, genesis_digest, verify_records, AuditTrail, EventDraft,
    EventRecord, QueryFilter, TrailConfig,
};

use common::{FixedClock, SeqIds};

/// Emit one memory-backed stream with deterministic seams; returns the trail
/// and the records in emit order.
fn emit_stream(texts: &[String]) -> (AuditTrail, Vec<EventRecord>) {
    let mut trail = AuditTrail::open_with(
        TrailConfig::memory(),
        Box::new(FixedClock("2025-01-15T10:30:00.000Z")),
        Box::new(SeqIds::new()),
    )
    .unwrap();

    let records = texts
        .iter()
        .map(|text| {
            let mut payload = Map::new();
            payload.insert("text".to_string(), json!(text));
            trail
                .emit(EventDraft::new("t", "a", payload).with_tenant("x"))
                .unwrap()
        })
        .collect();

    (trail, records)
}

/// Change the first character of a hex digest, guaranteeing a new value.
fn corrupt_digest(digest: &str) -> String {
    let replacement = if digest.starts_with('0') { "f" } else { "0" };
    format!("{}{}", replacement, &digest[1..])
}

proptest! {
    // Property: every stream emitted in order verifies clean.
    #[test]
    fn emitted_streams_always_verify(texts in prop::collection::vec("[a-z ]{0,8}", 1..10)) {
        let (trail, _) = emit_stream(&texts);
        let report = trail.verify().unwrap();
        prop_assert!(report.intact);
        prop_assert_eq!(report.total, texts.len());
        prop_assert!(report.broken.is_empty());
    }

    // Property: mutating any hashed field of any record breaks exactly that
    // index and everything after it — no more, no less.
    #[test]
    fn tampering_any_field_breaks_exactly_from_that_index(
        texts in prop::collection::vec("[a-z ]{0,8}", 1..8),
        k_seed in any::<usize>(),
        field in 0usize..7,
    ) {
        let n = texts.len();
        let k = k_seed % n;

        let (_, mut records) = emit_stream(&texts);
        match field {
            0 => records[k].event_type.push('X'),
            1 => records[k].actor_id.push('X'),
            2 => records[k].tenant_id.push('X'),
            3 => records[k].timestamp = "2030-01-01T00:00:00.000Z".to_string(),
            4 => {
                records[k].payload.insert("text".to_string(), json!("TAMPERED"));
            }
            5 => {
                let corrupted = corrupt_digest(&records[k].prev_hash);
                records[k].prev_hash = corrupted;
            }
            _ => records[k].event_id.push('X'),
        }

        let report = verify_records(&records, None).unwrap();
        prop_assert!(!report.intact);
        prop_assert_eq!(report.broken, (k..n).collect::<Vec<_>>());
    }

    // Property: canonical bytes depend on the semantic event only — payload
    // key insertion order and explicit null entries are invisible.
    #[test]
    fn canonical_bytes_ignore_key_order_and_nulls(
        entries in prop::collection::vec(("[a-z]{1,6}", any::<i64>()), 0..6),
    ) {
        // Deduplicate keys so forward and reverse insertion agree on values.
        let mut unique: Vec<(String, i64)> = Vec::new();
        for (key, value) in entries {
            if !unique.iter().any(|(k, _)| *k == key) {
                unique.push((key, value));
            }
        }

        let forward: Map<String, Value> =
            unique.iter().map(|(k, v)| (k.clone(), json!(*v))).collect();
        let mut reversed = Map::new();
        for (k, v) in unique.iter().rev() {
            reversed.insert(k.clone(), json!(*v));
        }
        // An explicit null entry must canonicalize away entirely.
        reversed.insert("zz_explicit_null".to_string(), Value::Null);

        let (_, mut records) = emit_stream(&["x".to_string()]);
        let mut record = records.pop().unwrap();

        record.payload = forward;
        let canonical_forward = canonical_bytes(&record);
        record.payload = reversed;
        let canonical_reversed = canonical_bytes(&record);

        prop_assert_eq!(canonical_forward, canonical_reversed);
    }

    // Property: the digest is a pure function of (prev, event) and is
    // sensitive to the predecessor.
    #[test]
    fn digest_is_deterministic_and_predecessor_sensitive(
        text in "[a-z ]{0,8}",
        other_prev in "[0-9a-f]{64}",
    ) {
        prop_assume!(other_prev != genesis_digest());

        let (_, records) = emit_stream(&[text]);
        let record = &records[0];

        prop_assert_eq!(
            compute_digest(genesis_digest(), record),
            compute_digest(genesis_digest(), record),
        );
        prop_assert_ne!(
            compute_digest(genesis_digest(), record),
            compute_digest(&other_prev, record),
        );
    }

    // Property: concatenating successive windows recovers read_all() in
    // order, with no duplicates and no omissions.
    #[test]
    fn pagination_windows_recover_the_stream(
        n in 1usize..20,
        limit in 1usize..7,
    ) {
        let texts: Vec<String> = (0..n).map(|i| format!("e{}", i)).collect();
        let (trail, _) = emit_stream(&texts);

        let mut seen: Vec<String> = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let filter = QueryFilter {
                limit: Some(limit),
                cursor: cursor.take(),
                ..QueryFilter::default()
            };
            let page = trail.query(&filter);
            seen.extend(page.events.iter().map(|e| e.event_id.clone()));

            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
            prop_assert!(seen.len() <= n, "pagination must terminate");
        }

        let expected: Vec<String> =
            trail.read_all().iter().map(|e| e.event_id.clone()).collect();
        prop_assert_eq!(seen, expected);
    }
}
