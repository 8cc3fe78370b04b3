//! Error types for object storage operations.

/// Errors that can occur while copying objects onto a backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An I/O error from the underlying backend.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The store has reached its capacity limit.
    #[error("store capacity exceeded: need {needed} bytes, only {available} available")]
    CapacityExceeded {
        /// Bytes needed for the operation.
        needed: u64,
        /// Bytes currently available.
        available: u64,
    },
}
