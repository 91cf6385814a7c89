//! Keyed authentication of individual records.
//!
//! A signature proves the record was produced by a holder of the shared
//! secret. It covers the same canonical bytes as the hash chain — `hash` and
//! `signature` excluded — so signing and hashing stay in lockstep.
//!
//! The key is opaque bytes (UTF-8 of the configured string). The library
//! never rotates, derives, or otherwise transforms it.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use trailproof_contracts::error::{TrailError, TrailResult};
use trailproof_contracts::event::EventRecord;

use crate::canonical::canonical_bytes;

type HmacSha256 = Hmac<Sha256>;

/// Prefix identifying the one supported signature scheme.
pub const SIGNATURE_PREFIX: &str = "hmac-sha256:";

/// Produce the signature string for `record` under `key`.
///
/// Format: `"hmac-sha256:" + 64 lowercase hex chars`.
pub fn sign(key: &str, record: &EventRecord) -> String {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .expect("HMAC-SHA256 accepts keys of any length");
    mac.update(&canonical_bytes(record));
    format!("{}{}", SIGNATURE_PREFIX, hex::encode(mac.finalize().into_bytes()))
}

/// Verify the signature embedded in `record` against `key`.
///
/// Fails with a signature-kind error when the record carries no signature,
/// the signature lacks the `hmac-sha256:` prefix or is not valid hex, or the
/// recomputed tag does not match. The tag comparison runs in constant time
/// (`Mac::verify_slice` — no early exit on first byte mismatch).
pub fn verify_signature(key: &str, record: &EventRecord) -> TrailResult<()> {
    let signature = record.signature.as_deref().ok_or_else(|| TrailError::Signature {
        reason: format!("record {} carries no signature", record.event_id),
    })?;

    let tag_hex = signature.strip_prefix(SIGNATURE_PREFIX).ok_or_else(|| {
        TrailError::Signature {
            reason: format!(
                "record {} signature lacks the '{}' prefix",
                record.event_id, SIGNATURE_PREFIX
            ),
        }
    })?;

    let tag = hex::decode(tag_hex).map_err(|_| TrailError::Signature {
        reason: format!("record {} signature is not valid hex", record.event_id),
    })?;

    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .expect("HMAC-SHA256 accepts keys of any length");
    mac.update(&canonical_bytes(record));
    mac.verify_slice(&tag).map_err(|_| TrailError::Signature {
        reason: format!("record {} failed mac verification", record.event_id),
    })
}
