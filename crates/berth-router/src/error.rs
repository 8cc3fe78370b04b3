//! Error types for the placement router.

use std::path::PathBuf;

/// Errors that can occur while routing and placing objects.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// The object to place cannot be located at the given path.
    #[error("object not found: {}", path.display())]
    ObjectNotFound {
        /// The identifier that did not resolve to readable content.
        path: PathBuf,
    },

    /// The storage collaborator failed to copy the payload.
    #[error("store error: {0}")]
    Store(#[from] berth_store::StoreError),

    /// The ring could not be constructed.
    #[error("ring error: {0}")]
    Ring(#[from] berth_placement::RingError),
}
