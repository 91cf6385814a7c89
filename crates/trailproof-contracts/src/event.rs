//! Audit event record and emit-input types.
//!
//! `EventRecord` is a single entry in the hash chain. `EventDraft` is what a
//! caller hands to `emit` — the facade fills in the identifier, timestamp,
//! digests, and optional signature.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One immutable entry in the audit trail.
///
/// Each record commits to its predecessor via `prev_hash`, forming an
/// append-only chain. Modifying any field other than `hash` and `signature`
/// invalidates `hash` and every subsequent `prev_hash`, which verification
/// detects.
///
/// The optional fields are omitted from serialized output when absent, and a
/// JSON `null` on read is treated the same as an absent field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Random 128-bit identifier, text-encoded. Assigned at emit.
    pub event_id: String,

    /// Application-defined namespaced name (e.g. `"billing.invoice_paid"`).
    pub event_type: String,

    /// ISO-8601 UTC timestamp with millisecond precision and a trailing `Z`.
    /// Assigned at emit. The fixed-width format makes lexicographic string
    /// comparison agree with chronological order.
    pub timestamp: String,

    /// Who performed the action. Caller-provided.
    pub actor_id: String,

    /// Which tenant the action belongs to. Caller-provided, possibly via the
    /// facade's configured default.
    pub tenant_id: String,

    /// Opaque application data. Stored and returned verbatim; never parsed
    /// or schema-checked beyond the canonicalization required for hashing.
    pub payload: Map<String, Value>,

    /// Digest of the preceding record, or `GENESIS_DIGEST` for the first.
    pub prev_hash: String,

    /// SHA-256 digest (64 lowercase hex chars) of this record's canonical
    /// content prefixed by `prev_hash`. Assigned at emit.
    pub hash: String,

    /// Optional correlation identifier grouping events of one logical
    /// operation across components.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,

    /// Optional session identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// `"hmac-sha256:" + 64 hex chars`. Present iff a key was configured at
    /// emit. Excluded from the hashed bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl EventRecord {
    /// The sentinel `prev_hash` used for the first record in every trail.
    ///
    /// Exactly 64 ASCII `0` characters. No SHA-256 output collides with it
    /// in practice, so a genesis record is unmistakable.
    pub const GENESIS_DIGEST: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// The caller-supplied inputs to `emit`.
///
/// `event_type`, `actor_id`, and `payload` are required; the facade rejects
/// empty identifier strings. `tenant_id` falls back to the facade's
/// configured default when absent.
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub event_type: String,
    pub actor_id: String,
    pub payload: Map<String, Value>,
    pub tenant_id: Option<String>,
    pub trace_id: Option<String>,
    pub session_id: Option<String>,
}

impl EventDraft {
    /// Create a draft with the three required inputs.
    pub fn new(
        event_type: impl Into<String>,
        actor_id: impl Into<String>,
        payload: Map<String, Value>,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            actor_id: actor_id.into(),
            payload,
            tenant_id: None,
            trace_id: None,
            session_id: None,
        }
    }

    /// Set an explicit tenant, overriding the facade default.
    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    /// Attach a trace identifier.
    pub fn with_trace(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Attach a session identifier.
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}
