//! Store error types.

use thiserror::Error;

/// Errors raised by a key-value backend.
///
/// Callers above `PersistentStore` never see these; the adapter logs them and
/// degrades to "persistence disabled".
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store is switched off (storage disabled, privacy mode).
    #[error("Storage unavailable")]
    Unavailable,

    /// Writing the value would exceed the configured quota.
    #[error("Quota exceeded writing {key}: {needed} bytes needed, quota is {quota}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    /// The key cannot be mapped onto the backend.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
