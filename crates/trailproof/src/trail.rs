//! The facade: emit, query, verify.
//!
//! An `AuditTrail` owns a store, an optional signing key, and an optional
//! default tenant. Every public operation is synchronous and returns only
//! when complete; a single instance is meant for a single writer (see the
//! crate docs for the concurrency contract).

use tracing::{debug, warn};

use trailproof_chain::{compute_digest, sign, verify_records};
use trailproof_contracts::error::{TrailError, TrailResult};
use trailproof_contracts::event::{EventDraft, EventRecord};
use trailproof_contracts::query::{QueryFilter, QueryPage};
use trailproof_contracts::verify::VerifyReport;
use trailproof_store::{EventStore, JsonlStore, MemoryStore};

use crate::clock::{Clock, SystemClock};
use crate::config::TrailConfig;
use crate::id::{IdSource, RandomIds};

/// A tamper-evident audit trail.
///
/// Construct one per trail (one store backing); emit events through it and
/// verify the whole chain at any time. Records are immutable once appended.
pub struct AuditTrail {
    store: Box<dyn EventStore>,
    key: Option<String>,
    default_tenant: Option<String>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdSource>,
}

impl std::fmt::Debug for AuditTrail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditTrail")
            .field("default_tenant", &self.default_tenant)
            .finish_non_exhaustive()
    }
}

impl AuditTrail {
    /// Open a trail with the system clock and random identifiers.
    ///
    /// # Errors
    ///
    /// Returns a validation-kind error — before any I/O — for an
    /// unrecognized store kind, or for `"jsonl"` without a path. Opening an
    /// existing file that cannot be read is a store-kind error.
    pub fn open(config: TrailConfig) -> TrailResult<Self> {
        Self::open_with(config, Box::new(SystemClock), Box::new(RandomIds))
    }

    /// Open a trail with injected clock and identifier collaborators.
    ///
    /// This is the test seam: a scripted clock pins timestamps, a scripted
    /// id source pins `event_id`s, and everything downstream of `emit`
    /// becomes deterministic.
    pub fn open_with(
        config: TrailConfig,
        clock: Box<dyn Clock>,
        ids: Box<dyn IdSource>,
    ) -> TrailResult<Self> {
        let store: Box<dyn EventStore> = match config.store.as_str() {
            "memory" => Box::new(MemoryStore::new()),
            "jsonl" => {
                let path = config.path.ok_or_else(|| TrailError::Validation {
                    reason: "store kind 'jsonl' requires a path".to_string(),
                })?;
                Box::new(JsonlStore::open(path)?)
            }
            other => {
                return Err(TrailError::Validation {
                    reason: format!("unknown store kind '{}'", other),
                })
            }
        };

        Ok(Self {
            store,
            key: config.key,
            default_tenant: config.default_tenant,
            clock,
            ids,
        })
    }

    /// Record one event.
    ///
    /// # Pipeline
    ///
    /// 1. Resolve `tenant_id` (draft value, else the configured default)
    /// 2. Reject empty `event_type` / `actor_id` / resolved `tenant_id`,
    ///    and empty-but-present `trace_id` / `session_id`
    /// 3. Mint a fresh `event_id`
    /// 4. Mint a fresh UTC millisecond timestamp
    /// 5. Read the store's last digest → the new record's `prev_hash`
    /// 6. Compute the record's own digest
    /// 7. If a key is configured, attach the HMAC signature
    /// 8. Append; the completed record is returned
    ///
    /// # Errors
    ///
    /// Validation failures are raised before any store mutation. An append
    /// failure is a store-kind error and leaves the trail unchanged.
    pub fn emit(&mut self, draft: EventDraft) -> TrailResult<EventRecord> {
        let EventDraft {
            event_type,
            actor_id,
            payload,
            tenant_id,
            trace_id,
            session_id,
        } = draft;

        // ── Steps 1 & 2: validation ──────────────────────────────────────────
        let tenant_id = tenant_id
            .or_else(|| self.default_tenant.clone())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                warn!(event_type = %event_type, "emit rejected: no tenant resolved");
                TrailError::Validation {
                    reason: "tenant_id is required and no default tenant is configured"
                        .to_string(),
                }
            })?;

        for (field, value) in [("event_type", &event_type), ("actor_id", &actor_id)] {
            if value.is_empty() {
                return Err(TrailError::Validation {
                    reason: format!("{} must not be empty", field),
                });
            }
        }
        for (field, value) in [("trace_id", &trace_id), ("session_id", &session_id)] {
            if matches!(value.as_deref(), Some("")) {
                return Err(TrailError::Validation {
                    reason: format!("{} must not be empty when provided", field),
                });
            }
        }

        // ── Steps 3–6: identity, time, linkage ───────────────────────────────
        let prev_hash = self.store.last_digest();
        let mut record = EventRecord {
            event_id: self.ids.next_id(),
            event_type,
            timestamp: self.clock.now(),
            actor_id,
            tenant_id,
            payload,
            prev_hash: prev_hash.clone(),
            hash: String::new(),
            trace_id,
            session_id,
            signature: None,
        };
        record.hash = compute_digest(&prev_hash, &record);

        // ── Step 7: optional authentication ──────────────────────────────────
        if let Some(key) = &self.key {
            record.signature = Some(sign(key, &record));
        }

        // ── Step 8: append ───────────────────────────────────────────────────
        //
        // A failed append is fatal for this record; the store guarantees it
        // is then visible nowhere.
        self.store.append(&record)?;

        debug!(
            event_id = %record.event_id,
            event_type = %record.event_type,
            hash = %record.hash,
            "event appended"
        );

        Ok(record)
    }

    /// Filtered, cursor-paginated scan in insertion order.
    pub fn query(&self, filter: &QueryFilter) -> QueryPage {
        self.store.query(filter)
    }

    /// Every event of one trace, sorted by timestamp (stable — events with
    /// equal timestamps keep their insertion order).
    pub fn get_trace(&self, trace_id: &str) -> Vec<EventRecord> {
        let filter = QueryFilter {
            trace_id: Some(trace_id.to_string()),
            limit: Some(usize::MAX),
            ..QueryFilter::default()
        };

        let mut events = self.store.query(&filter).events;
        events.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        events
    }

    /// Recompute the whole chain and report every broken index.
    ///
    /// # Errors
    ///
    /// Returns a signature-kind error when a signed record is found but no
    /// key is configured — a misconfigured verifier must not report success.
    pub fn verify(&self) -> TrailResult<VerifyReport> {
        verify_records(&self.store.read_all(), self.key.as_deref())
    }

    /// Surface any buffered writes to the backing medium.
    pub fn flush(&mut self) -> TrailResult<()> {
        self.store.flush()
    }

    /// Every record in insertion order, as an independent copy.
    pub fn read_all(&self) -> Vec<EventRecord> {
        self.store.read_all()
    }

    /// Number of records in the trail.
    pub fn count(&self) -> usize {
        self.store.count()
    }

    /// The digest of the most recent record (the genesis digest when the
    /// trail is empty). A compact commitment to the entire trail: anyone
    /// holding this value can later detect any rewrite of history.
    pub fn last_digest(&self) -> String {
        self.store.last_digest()
    }
}
