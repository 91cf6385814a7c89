//! Verification report types.

use serde::{Deserialize, Serialize};

/// The structured result of a full-trail verification pass.
///
/// Hash breaks are reported here rather than raised, so auditors can inspect
/// a broken chain. Once a record at index `k` is broken, every index after
/// `k` is reported broken as well — later digests were computed from the
/// now-untrusted predecessor, so there is nothing left to recompute against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyReport {
    /// True iff `broken` is empty.
    pub intact: bool,
    /// Number of records examined.
    pub total: usize,
    /// Zero-based indices of broken records, in ascending order.
    pub broken: Vec<usize>,
}

impl VerifyReport {
    /// A report for an empty trail: trivially intact.
    pub fn empty() -> Self {
        Self { intact: true, total: 0, broken: Vec::new() }
    }
}
