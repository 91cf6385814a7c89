//! Shared query execution over an in-memory record slice.
//!
//! Both backings mirror their records in memory, so one scan serves both.

use trailproof_contracts::event::EventRecord;
use trailproof_contracts::query::{QueryFilter, QueryPage, DEFAULT_QUERY_LIMIT};

/// Run `filter` against `records` (insertion order).
///
/// A cursor equal to an `event_id` means "skip every record up to and
/// including it, then filter". An unknown cursor yields an empty page with
/// no `next_cursor`. `next_cursor` is set only when a further matching
/// record was actually seen past the returned window, so a window that
/// exactly exhausts the matches ends pagination immediately.
pub(crate) fn run_query(records: &[EventRecord], filter: &QueryFilter) -> QueryPage {
    let start = match &filter.cursor {
        Some(cursor) => match records.iter().position(|r| r.event_id == *cursor) {
            Some(position) => position + 1,
            None => return QueryPage { events: Vec::new(), next_cursor: None },
        },
        None => 0,
    };

    let limit = filter.limit.unwrap_or(DEFAULT_QUERY_LIMIT);
    let mut events: Vec<EventRecord> = Vec::new();
    let mut next_cursor = None;

    for record in records[start..].iter().filter(|r| filter.matches(r)) {
        if events.len() == limit {
            next_cursor = events.last().map(|last| last.event_id.clone());
            break;
        }
        events.push(record.clone());
    }

    QueryPage { events, next_cursor }
}
