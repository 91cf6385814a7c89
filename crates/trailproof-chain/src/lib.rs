//! # trailproof-chain
//!
//! Canonical serialization, SHA-256 hash chaining, and HMAC-SHA256 signing
//! for the Trailproof audit trail.
//!
//! ## Overview
//!
//! Every record is reduced to a deterministic canonical byte form (sorted
//! keys, no absent fields, no `hash`/`signature`). The chain digest is
//! SHA-256 over the predecessor's digest followed by those bytes; the
//! optional signature is HMAC-SHA256 over the same bytes. `verify_records`
//! walks a full sequence and reports every broken index, cascading from the
//! first break.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trailproof_chain::{compute_digest, genesis_digest, verify_records};
//!
//! let digest = compute_digest(genesis_digest(), &record);
//! let report = verify_records(&records, Some("shared-secret"))?;
//! assert!(report.intact);
//! ```

pub mod canonical;
pub mod digest;
pub mod mac;
pub mod verify;

pub use canonical::{canonical_bytes, canonicalize_value};
pub use digest::{check_record, compute_digest, genesis_digest};
pub use mac::{sign, verify_signature, SIGNATURE_PREFIX};
pub use verify::verify_records;
