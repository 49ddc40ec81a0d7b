use std::time::Duration;

pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 250;

/// Runtime dials for the dispatch service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Upper bound on waiting for resource locks before answering `Busy`.
    pub lock_timeout: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_millis(DEFAULT_LOCK_TIMEOUT_MS),
        }
    }
}
