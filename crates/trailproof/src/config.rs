//! Facade construction parameters.
//!
//! Configuration is constructor-parameters only: no environment variables,
//! no config files, no network surface.

use std::path::PathBuf;

/// Everything `AuditTrail::open` needs.
///
/// `store` names the backing: `"memory"` or `"jsonl"`. The latter requires
/// `path`. An optional `key` turns on per-record HMAC signing; an optional
/// `default_tenant` fills in `tenant_id` when a caller omits it.
#[derive(Debug, Clone, Default)]
pub struct TrailConfig {
    pub store: String,
    pub path: Option<PathBuf>,
    pub key: Option<String>,
    pub default_tenant: Option<String>,
}

impl TrailConfig {
    /// A volatile in-memory trail.
    pub fn memory() -> Self {
        Self { store: "memory".to_string(), ..Self::default() }
    }

    /// A durable trail at `path`, one JSON record per line.
    pub fn jsonl(path: impl Into<PathBuf>) -> Self {
        Self {
            store: "jsonl".to_string(),
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Enable HMAC-SHA256 signing with this shared secret.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Tenant to record when a draft does not name one.
    pub fn with_default_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.default_tenant = Some(tenant_id.into());
        self
    }
}
