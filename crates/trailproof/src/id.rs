//! The randomness seam.

use uuid::Uuid;

/// Source of fresh event identifiers.
pub trait IdSource: Send {
    /// A new unique identifier for one record.
    fn next_id(&self) -> String;
}

/// Random 128-bit identifiers (UUIDv4, hyphenated text form).
#[derive(Debug, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
