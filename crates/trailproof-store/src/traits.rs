//! The store capability surface.

use trailproof_contracts::error::TrailResult;
use trailproof_contracts::event::EventRecord;
use trailproof_contracts::query::{QueryFilter, QueryPage};

/// Append-only storage for complete, hashed records.
///
/// The facade depends on nothing beyond these six operations, so backings
/// are interchangeable. Records handed to `append` are final: a store never
/// modifies or removes them.
///
/// # Concurrency
///
/// Mutating operations take `&mut self`: the hash chain requires a strictly
/// serial read-last-digest → append sequence, and that serialization is the
/// caller's responsibility (one writer, externally synchronized). Stores are
/// `Send` so an owning facade can move between threads.
pub trait EventStore: Send {
    /// Append one record. It becomes visible to subsequent reads; on the
    /// file backing the line is flushed before this returns. On failure the
    /// record is not visible anywhere.
    fn append(&mut self, record: &EventRecord) -> TrailResult<()>;

    /// Every record in insertion order, as an independent copy.
    fn read_all(&self) -> Vec<EventRecord>;

    /// Filtered, cursor-paginated scan in insertion order.
    fn query(&self, filter: &QueryFilter) -> QueryPage;

    /// The digest of the most recent record, or the genesis digest when the
    /// store is empty.
    fn last_digest(&self) -> String;

    /// Number of records held.
    fn count(&self) -> usize;

    /// Surface any buffered writes to the backing medium. A no-op for
    /// backings that write through on every append.
    fn flush(&mut self) -> TrailResult<()>;
}
