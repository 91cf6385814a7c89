//! Durable backing: line-delimited JSON, one record per line.
//!
//! The on-disk form is standard serde JSON (not the canonical form used for
//! hashing) terminated by `\n`. Because every record is a single appended
//! line, a crash mid-write leaves at worst one partial trailing line, which
//! the next load skips with a warning. The file itself is never rewritten.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use trailproof_contracts::error::{TrailError, TrailResult};
use trailproof_contracts::event::EventRecord;
use trailproof_contracts::query::{QueryFilter, QueryPage};

use crate::select::run_query;
use crate::traits::EventStore;

/// File mode for a freshly created trail: owner read+write only.
#[cfg(unix)]
const TRAIL_FILE_MODE: u32 = 0o600;

/// A file-backed append-only store with an in-memory mirror.
///
/// Construction scans the file (if present) and loads every valid line;
/// reads and queries are then served from the mirror. Appends write through
/// to disk first and mirror the record only once the line is safely written,
/// so a failed append never shows up in reads.
pub struct JsonlStore {
    path: PathBuf,
    records: Vec<EventRecord>,
}

impl JsonlStore {
    /// Open a store at `path`.
    ///
    /// A missing file is an empty store — no I/O happens until the first
    /// `append`. An existing file is scanned line by line; lines that fail
    /// to parse or fail record validation are skipped with a warning naming
    /// the zero-based line index and the path.
    ///
    /// # Errors
    ///
    /// Returns a store-kind error when the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> TrailResult<Self> {
        let path = path.into();
        let mut records = Vec::new();

        if path.exists() {
            let file = File::open(&path).map_err(|e| TrailError::Store {
                reason: format!("cannot open {}: {}", path.display(), e),
            })?;

            for (index, line) in BufReader::new(file).lines().enumerate() {
                let line = line.map_err(|e| TrailError::Store {
                    reason: format!("cannot read {}: {}", path.display(), e),
                })?;

                match parse_record(&line) {
                    Ok(record) => records.push(record),
                    Err(reason) => warn!(
                        line_index = index,
                        path = %path.display(),
                        %reason,
                        "skipping unreadable audit record"
                    ),
                }
            }

            debug!(
                path = %path.display(),
                loaded = records.len(),
                "audit trail loaded from disk"
            );
        }

        Ok(Self { path, records })
    }

    /// The path this store appends to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse one line into a record and validate its shape.
///
/// Beyond serde's presence/type checks, the digest fields must look like
/// digests and the mandatory identifiers must be non-empty — a line that
/// deserializes but violates those is corrupt, not merely unusual.
fn parse_record(line: &str) -> Result<EventRecord, String> {
    let record: EventRecord =
        serde_json::from_str(line).map_err(|e| format!("invalid record JSON: {}", e))?;

    for (field, value) in [
        ("event_id", &record.event_id),
        ("event_type", &record.event_type),
        ("timestamp", &record.timestamp),
        ("actor_id", &record.actor_id),
        ("tenant_id", &record.tenant_id),
    ] {
        if value.is_empty() {
            return Err(format!("field '{}' is empty", field));
        }
    }

    for (field, value) in [("prev_hash", &record.prev_hash), ("hash", &record.hash)] {
        if !is_hex_digest(value) {
            return Err(format!("field '{}' is not a 64-char lowercase hex digest", field));
        }
    }

    Ok(record)
}

fn is_hex_digest(value: &str) -> bool {
    value.len() == 64
        && value.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
}

impl EventStore for JsonlStore {
    /// Append one record as a single line write.
    ///
    /// The line (record JSON plus `\n`) is written and flushed in one call;
    /// only then is the record mirrored into memory. On the first-ever
    /// create the file gets mode `600`; later appends leave the existing
    /// mode untouched.
    fn append(&mut self, record: &EventRecord) -> TrailResult<()> {
        let mut line = serde_json::to_string(record).map_err(|e| TrailError::Store {
            reason: format!("cannot serialize record {}: {}", record.event_id, e),
        })?;
        line.push('\n');

        let mut options = OpenOptions::new();
        options.create(true).append(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            // Applied only when the call creates the file.
            options.mode(TRAIL_FILE_MODE);
        }

        let mut file = options.open(&self.path).map_err(|e| TrailError::Store {
            reason: format!("cannot open {} for append: {}", self.path.display(), e),
        })?;
        file.write_all(line.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| TrailError::Store {
                reason: format!("cannot append to {}: {}", self.path.display(), e),
            })?;

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

    /// Every append already writes and flushes its own line, so there is
    /// nothing buffered between calls.
    fn flush(&mut self) -> TrailResult<()> {
        Ok(())
    }
}
