//! # trailproof-contracts
//!
//! Shared types for the Trailproof audit trail.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions and error types.

pub mod error;
pub mod event;
pub mod query;
pub mod verify;

pub use error::{TrailError, TrailResult};
pub use event::{EventDraft, EventRecord};
pub use query::{QueryFilter, QueryPage, DEFAULT_QUERY_LIMIT};
pub use verify::VerifyReport;
