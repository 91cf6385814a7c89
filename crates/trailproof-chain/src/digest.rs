//! Hash-chain primitives.
//!
//! Digest input layout (bytes, in order):
//!   1. the previous digest as UTF-8 (64 ASCII hex chars, or the genesis
//!      sentinel)
//!   2. the canonical bytes of the record (see `canonical`)
//!
//! Both functions are pure: no state is held anywhere, and identical inputs
//! always produce identical output.

use sha2::{Digest, Sha256};

use trailproof_contracts::error::{TrailError, TrailResult};
use trailproof_contracts::event::EventRecord;

use crate::canonical::canonical_bytes;

/// The digest a first record links to: 64 ASCII zeros.
pub fn genesis_digest() -> &'static str {
    EventRecord::GENESIS_DIGEST
}

/// Compute the digest for `record` as the successor of `prev_digest`.
///
/// Returns a lowercase 64-character hex string. The record's `hash` and
/// `signature` fields do not contribute (the canonical form excludes them),
/// so the stored digest can be recomputed from the record itself.
pub fn compute_digest(prev_digest: &str, record: &EventRecord) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prev_digest.as_bytes());
    hasher.update(canonical_bytes(record));
    hex::encode(hasher.finalize())
}

/// Check a single record against its expected predecessor digest.
///
/// Unlike the full verification walk, which reports breaks through a result
/// structure, this raises a chain-kind error — for callers that check one
/// record and want failure as an error.
pub fn check_record(prev_digest: &str, record: &EventRecord) -> TrailResult<()> {
    if record.prev_hash != prev_digest {
        return Err(TrailError::Chain {
            reason: format!(
                "record {} links to {} but expected predecessor is {}",
                record.event_id, record.prev_hash, prev_digest
            ),
        });
    }

    let recomputed = compute_digest(prev_digest, record);
    if record.hash != recomputed {
        return Err(TrailError::Chain {
            reason: format!(
                "record {} carries digest {} but recomputation yields {}",
                record.event_id, record.hash, recomputed
            ),
        });
    }

    Ok(())
}
