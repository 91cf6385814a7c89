//! Scripted collaborators shared by the integration tests.

use std::sync::Mutex;

use trailproof::{Clock, IdSource};

/// A clock pinned to one instant.
pub struct FixedClock(pub &'static str);

impl Clock for FixedClock {
    fn now(&self) -> String {
        self.0.to_string()
    }
}

/// UUID-shaped sequential identifiers: `…-000000000001`, `…-000000000002`, …
pub struct SeqIds(Mutex<u64>);

impl SeqIds {
    pub fn new() -> Self {
        Self(Mutex::new(0))
    }
}

impl IdSource for SeqIds {
    fn next_id(&self) -> String {
        let mut last = self.0.lock().unwrap();
        *last += 1;
        format!("00000000-0000-4000-8000-{:012}", *last)
    }
}
