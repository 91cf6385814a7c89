//! Volatile in-memory backing.

use trailproof_contracts::error::TrailResult;
use trailproof_contracts::event::EventRecord;
use trailproof_contracts::query::{QueryFilter, QueryPage};

use crate::select::run_query;
use crate::traits::EventStore;

/// An append-only store holding records in a `Vec`, in insertion order.
///
/// Contents are lost when the store is dropped. `read_all` hands out a
/// defensive copy so callers cannot mutate what subsequent verification
/// reads.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<EventRecord>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventStore for MemoryStore {
    fn append(&mut self, record: &EventRecord) -> TrailResult<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn read_all(&self) -> Vec<EventRecord> {
        self.records.clone()
    }

    fn query(&self, filter: &QueryFilter) -> QueryPage {
        run_query(&self.records, filter)
    }

    fn last_digest(&self) -> String {
        self.records
            .last()
            .map(|record| record.hash.clone())
            .unwrap_or_else(|| EventRecord::GENESIS_DIGEST.to_string())
    }

    fn count(&self) -> usize {
        self.records.len()
    }

    /// Nothing is buffered; there is nothing to flush.
    fn flush(&mut self) -> TrailResult<()> {
        Ok(())
    }
}
