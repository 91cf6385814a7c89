//! Error types for the Trailproof library.
//!
//! All fallible operations return `TrailResult<T>`. The enum itself is the
//! root category: callers that do not care which kind fired match on
//! `TrailError` as a whole.

use thiserror::Error;

/// The unified error type for the Trailproof library.
#[derive(Debug, Error)]
pub enum TrailError {
    /// A required field was missing or empty, or the facade was configured
    /// with an unrecognized store kind or a file store without a path.
    ///
    /// Raised synchronously, before any store mutation.
    #[error("validation error: {reason}")]
    Validation { reason: String },

    /// The file-backed store could not be read or written.
    ///
    /// A failed append is fatal for that record — it is never mirrored into
    /// memory, so reads stay consistent with what is actually on disk.
    #[error("store error: {reason}")]
    Store { reason: String },

    /// A record's digest or linkage did not match the recomputed value.
    ///
    /// `verify()` reports breaks through its returned result instead of
    /// raising; this kind exists for callers that check a single record and
    /// want an error.
    #[error("chain error: {reason}")]
    Chain { reason: String },

    /// A signature was missing, malformed, failed MAC verification, or a
    /// signed record was encountered with no key configured.
    #[error("signature error: {reason}")]
    Signature { reason: String },
}

/// Convenience alias used throughout the Trailproof crates.
pub type TrailResult<T> = Result<T, TrailError>;
