//! Storage collaborator trait.

use berth_types::BackendId;
use bytes::Bytes;

use crate::error::StoreError;

/// A pool of storage targets that can receive placed objects.
///
/// The router decides *which* backend owns an object; the store owns the
/// mechanics of getting the payload there (local directories, a network
/// copy, or an object-store client). Implementations must be
/// `Send + Sync` for use across async tasks; payloads are passed as
/// [`Bytes`] so the router's single read of the source is shared, not
/// re-copied.
///
/// Copying the same name twice overwrites. Routing upstream is
/// deterministic, so a re-copy always lands on the backend that already
/// holds the object.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Copy an object's payload onto the given backend, keyed by name.
    async fn copy(&self, name: &str, data: Bytes, backend: BackendId) -> Result<(), StoreError>;
}
