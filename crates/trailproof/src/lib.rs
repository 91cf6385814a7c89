//! # trailproof
//!
//! A tamper-evident audit trail: every recorded event is linked to its
//! predecessor by a SHA-256 digest over a canonical byte form, so any
//! retroactive modification, reordering, insertion, or deletion is
//! detectable by a later verification pass. An optional shared secret adds
//! per-record HMAC-SHA256 authentication.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trailproof::{AuditTrail, EventDraft, TrailConfig};
//!
//! let mut trail = AuditTrail::open(
//!     TrailConfig::jsonl("/var/log/app/trail.jsonl").with_key("shared-secret"),
//! )?;
//!
//! trail.emit(
//!     EventDraft::new("user.login", "alice", payload).with_tenant("acme"),
//! )?;
//!
//! let report = trail.verify()?;
//! assert!(report.intact);
//! ```
//!
//! ## Concurrency
//!
//! A trail instance is single-writer: the hash chain requires a strictly
//! serial read-last-digest → append sequence. Mutating operations take
//! `&mut self`, so the borrow checker enforces this within a process; wrap
//! the trail in a mutex to share it across threads. The file backing
//! likewise assumes a single writing process per file.

pub mod clock;
pub mod config;
pub mod id;
pub mod trail;

pub use clock::{Clock, SystemClock};
pub use config::TrailConfig;
pub use id::{IdSource, RandomIds};
pub use trail::AuditTrail;

pub use trailproof_chain::{
    canonical_bytes, check_record, compute_digest, genesis_digest, sign, verify_records,
    verify_signature, SIGNATURE_PREFIX,
};
pub use trailproof_contracts::{
    EventDraft, EventRecord, QueryFilter, QueryPage, TrailError, TrailResult, VerifyReport,
    DEFAULT_QUERY_LIMIT,
};
pub use trailproof_store::{EventStore, JsonlStore, MemoryStore};
