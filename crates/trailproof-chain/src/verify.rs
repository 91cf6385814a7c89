//! Full-trail verification with cascading-break semantics.

use trailproof_contracts::error::{TrailError, TrailResult};
use trailproof_contracts::event::EventRecord;
use trailproof_contracts::verify::VerifyReport;

use crate::digest::{compute_digest, genesis_digest};
use crate::mac::verify_signature;

/// Verify a full record sequence, in order, from the genesis digest.
///
/// A record at index `i` is broken when any of:
///
/// 1. its `prev_hash` differs from the running predecessor digest,
/// 2. its stored `hash` differs from the recomputed digest,
/// 3. it carries a signature that fails MAC verification under `key`.
///
/// From the first break onward every later index is reported broken without
/// recomputation — later digests were derived from the now-untrusted
/// predecessor, so nothing after the break can be trusted.
///
/// # Errors
///
/// Returns a signature-kind error when any record carries a signature and
/// `key` is `None`. That is an operator misconfiguration: without the key
/// the verifier cannot distinguish valid from forged signatures, and
/// passing silently would defeat the point of signing.
pub fn verify_records(records: &[EventRecord], key: Option<&str>) -> TrailResult<VerifyReport> {
    if key.is_none() {
        if let Some(signed) = records.iter().find(|r| r.signature.is_some()) {
            return Err(TrailError::Signature {
                reason: format!(
                    "record {} is signed but no key is configured for verification",
                    signed.event_id
                ),
            });
        }
    }

    let mut prev_digest = genesis_digest().to_string();
    let mut broken: Vec<usize> = Vec::new();

    for (index, record) in records.iter().enumerate() {
        if !broken.is_empty() {
            // Cascade: everything after the first break is broken by definition.
            broken.push(index);
            continue;
        }

        let linked = record.prev_hash == prev_digest;
        let digest_ok = record.hash == compute_digest(&prev_digest, record);
        let mac_ok = match (key, &record.signature) {
            (Some(key), Some(_)) => verify_signature(key, record).is_ok(),
            _ => true,
        };

        if linked && digest_ok && mac_ok {
            prev_digest = record.hash.clone();
        } else {
            broken.push(index);
        }
    }

    Ok(VerifyReport {
        intact: broken.is_empty(),
        total: records.len(),
        broken,
    })
}
