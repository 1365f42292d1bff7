use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

pub const DEFAULT_KEY_PREFIX: &str = "__quarry";

static NEXT_SESSION: AtomicU64 = AtomicU64::new(0);

/// Read access to the unique top-level key of a compilation session.
///
/// The key must not collide with any user field name or with another
/// session's key. Compilations never write it.
pub trait SessionState {
    fn unique_key(&self) -> &str;
}

/// A compilation session holding one unique key, allocated when the session
/// is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    unique_key: String,
}

impl Session {
    /// Allocate `__quarry_<n>` with a process-wide counter.
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_KEY_PREFIX)
    }

    /// Allocate `<prefix>_<n>`. The prefix must already be reserved against
    /// user field names.
    pub fn with_prefix(prefix: &str) -> Self {
        let n = NEXT_SESSION.fetch_add(1, Ordering::Relaxed);
        let unique_key = format!("{prefix}_{n}");
        debug!(unique_key = %unique_key, "allocated session key");
        Self { unique_key }
    }

    /// Adopt a key allocated by the host.
    pub fn with_key(unique_key: impl Into<String>) -> Self {
        Self {
            unique_key: unique_key.into(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState for Session {
    fn unique_key(&self) -> &str {
        &self.unique_key
    }
}

impl SessionState for str {
    fn unique_key(&self) -> &str {
        self
    }
}

impl SessionState for String {
    fn unique_key(&self) -> &str {
        self
    }
}
