//! Query filter and result-page types.
//!
//! Filtering is exact-match on the identifier fields plus an inclusive time
//! range compared as strings — sound because the timestamp format is
//! fixed-width ISO-8601 UTC.

use serde::{Deserialize, Serialize};

use crate::event::EventRecord;

/// Default page size when a query does not specify `limit`.
pub const DEFAULT_QUERY_LIMIT: usize = 100;

/// Filters applied to a store scan. All fields are optional; an empty filter
/// matches every record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryFilter {
    /// Exact match on `event_type`.
    pub event_type: Option<String>,
    /// Exact match on `actor_id`.
    pub actor_id: Option<String>,
    /// Exact match on `tenant_id`.
    pub tenant_id: Option<String>,
    /// Exact match on `trace_id`. Records without one never match.
    pub trace_id: Option<String>,
    /// Exact match on `session_id`. Records without one never match.
    pub session_id: Option<String>,
    /// Inclusive lower bound on `timestamp`.
    pub from_time: Option<String>,
    /// Inclusive upper bound on `timestamp`.
    pub to_time: Option<String>,
    /// Maximum number of records per page. Defaults to `DEFAULT_QUERY_LIMIT`.
    pub limit: Option<usize>,
    /// Resume after the record with this `event_id`. An unknown cursor yields
    /// an empty page.
    pub cursor: Option<String>,
}

impl QueryFilter {
    /// Whether `record` passes every configured predicate.
    ///
    /// `limit` and `cursor` are pagination controls, not predicates, and are
    /// ignored here.
    pub fn matches(&self, record: &EventRecord) -> bool {
        if let Some(event_type) = &self.event_type {
            if record.event_type != *event_type {
                return false;
            }
        }
        if let Some(actor_id) = &self.actor_id {
            if record.actor_id != *actor_id {
                return false;
            }
        }
        if let Some(tenant_id) = &self.tenant_id {
            if record.tenant_id != *tenant_id {
                return false;
            }
        }
        if let Some(trace_id) = &self.trace_id {
            if record.trace_id.as_deref() != Some(trace_id.as_str()) {
                return false;
            }
        }
        if let Some(session_id) = &self.session_id {
            if record.session_id.as_deref() != Some(session_id.as_str()) {
                return false;
            }
        }
        if let Some(from_time) = &self.from_time {
            if record.timestamp.as_str() < from_time.as_str() {
                return false;
            }
        }
        if let Some(to_time) = &self.to_time {
            if record.timestamp.as_str() > to_time.as_str() {
                return false;
            }
        }
        true
    }
}

/// One page of query results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryPage {
    /// Matching records in insertion order.
    pub events: Vec<EventRecord>,
    /// `event_id` of the last record in `events` when more matches remain;
    /// pass it back as `cursor` to fetch the next page.
    pub next_cursor: Option<String>,
}
