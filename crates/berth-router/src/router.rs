//! The placement router.

use std::path::Path;
use std::sync::Arc;

use berth_placement::{content_key, Ring};
use berth_store::ObjectStore;
use berth_types::{BackendId, RingConfig};
use bytes::Bytes;
use tracing::debug;

use crate::error::RouterError;

/// Where an object landed: its routing key and owning backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// 32-bit routing key derived from the payload digest.
    pub key: u32,
    /// The backend that owns the key.
    pub backend: BackendId,
}

/// Routes objects to backends and delegates the copy.
///
/// The ring is built once at construction and never mutated afterwards:
/// [`resolve`](Router::resolve) is a pure read and
/// [`store`](Router::store) only touches the collaborator, so a shared
/// router is safe under any number of concurrent callers. To resize the
/// pool, build a new router and swap it in at the call site; in-flight
/// placements against the old ring are unaffected.
pub struct Router {
    ring: Ring,
    store: Arc<dyn ObjectStore>,
}

impl Router {
    /// Build a router over a fixed pool.
    pub fn new(config: RingConfig, store: Arc<dyn ObjectStore>) -> Result<Self, RouterError> {
        let ring = Ring::new(config)?;
        Ok(Self { ring, store })
    }

    /// Resolve a payload to its owning backend without copying anything.
    pub fn resolve(&self, content: &[u8]) -> Placement {
        let key = content_key(content);
        Placement {
            key,
            backend: self.ring.resolve(key),
        }
    }

    /// Resolve a precomputed hash key.
    pub fn resolve_key(&self, key: u32) -> BackendId {
        self.ring.resolve(key)
    }

    /// The ring this router places against.
    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    /// Place the file at `path`: hash its content, resolve the owning
    /// backend, and copy the payload there keyed by the file name.
    ///
    /// Fails with [`RouterError::ObjectNotFound`] before touching the
    /// store if the path does not name readable content. Placement is
    /// not idempotency-checked: storing the same file twice re-copies
    /// it, but unchanged content always re-routes to the same backend.
    pub async fn store(&self, path: impl AsRef<Path>) -> Result<Placement, RouterError> {
        let path = path.as_ref();
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => {
                return Err(RouterError::ObjectNotFound {
                    path: path.to_path_buf(),
                })
            }
        };

        let data = match tokio::fs::read(path).await {
            Ok(data) => Bytes::from(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RouterError::ObjectNotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => return Err(berth_store::StoreError::Io(e).into()),
        };

        let placement = self.resolve(&data);
        self.store.copy(&name, data, placement.backend).await?;

        debug!(
            name,
            key = format!("{:08x}", placement.key),
            backend = %placement.backend,
            "placed object"
        );
        Ok(placement)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use berth_store::{MemoryStore, StoreError};
    use tempfile::TempDir;

    use super::*;

    /// Collaborator double that records every copy it receives.
    #[derive(Default)]
    struct RecordingStore {
        calls: AtomicUsize,
        copies: Mutex<Vec<(String, usize, BackendId)>>,
    }

    #[async_trait::async_trait]
    impl ObjectStore for RecordingStore {
        async fn copy(
            &self,
            name: &str,
            data: Bytes,
            backend: BackendId,
        ) -> Result<(), StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.copies
                .lock()
                .unwrap()
                .push((name.to_string(), data.len(), backend));
            Ok(())
        }
    }

    /// Collaborator double whose copies always fail.
    struct FailingStore;

    #[async_trait::async_trait]
    impl ObjectStore for FailingStore {
        async fn copy(&self, _: &str, _: Bytes, _: BackendId) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("backend unreachable")))
        }
    }

    fn write_fixture(dir: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn default_router(store: Arc<dyn ObjectStore>) -> Router {
        Router::new(RingConfig::default(), store).unwrap()
    }

    #[test]
    fn test_resolve_is_pure_and_matches_resolve_key() {
        let router = default_router(Arc::new(MemoryStore::new(u64::MAX)));
        let content = b"routing payload";

        let first = router.resolve(content);
        let second = router.resolve(content);
        assert_eq!(first, second);
        assert_eq!(router.resolve_key(first.key), first.backend);
    }

    #[tokio::test]
    async fn test_store_copies_to_the_resolved_backend() {
        let recording = Arc::new(RecordingStore::default());
        let router = default_router(recording.clone());

        let dir = TempDir::new().unwrap();
        // md5("hello") -> key 0x5d41402a -> vnode 36 -> backend 1.
        let path = write_fixture(&dir, "greeting.txt", b"hello");

        let placement = router.store(&path).await.unwrap();
        assert_eq!(placement.key, 0x5d41_402a);
        assert_eq!(placement.backend, BackendId::new(1));

        let copies = recording.copies.lock().unwrap();
        assert_eq!(
            copies.as_slice(),
            &[("greeting.txt".to_string(), 5, BackendId::new(1))]
        );
    }

    #[tokio::test]
    async fn test_same_content_always_routes_to_same_backend() {
        let router = default_router(Arc::new(MemoryStore::new(u64::MAX)));
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, "stable.bin", b"same bytes, same berth");

        let first = router.store(&path).await.unwrap();
        let second = router.store(&path).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_missing_object_is_not_found_and_store_untouched() {
        let recording = Arc::new(RecordingStore::default());
        let router = default_router(recording.clone());

        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = router.store(&missing).await.unwrap_err();
        assert!(
            matches!(err, RouterError::ObjectNotFound { ref path } if *path == missing),
            "expected ObjectNotFound, got: {err:?}"
        );
        assert_eq!(recording.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let router = default_router(Arc::new(FailingStore));
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, "doomed", b"will not arrive");

        let err = router.store(&path).await.unwrap_err();
        assert!(matches!(err, RouterError::Store(_)), "got: {err:?}");
    }

    #[tokio::test]
    async fn test_end_to_end_with_memory_store() {
        let memory = Arc::new(MemoryStore::new(u64::MAX));
        let router = default_router(memory.clone());

        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, "greeting.txt", b"hello");

        let placement = router.store(&path).await.unwrap();
        assert!(memory.contains("greeting.txt", placement.backend));
        assert_eq!(
            memory.get("greeting.txt", placement.backend),
            Some(Bytes::from_static(b"hello"))
        );
    }

    #[test]
    fn test_invalid_pool_fails_construction() {
        let err = Router::new(
            RingConfig {
                backends: 0,
                vnodes: 0,
            },
            Arc::new(MemoryStore::new(u64::MAX)),
        )
        .map(|_| ())
        .unwrap_err();
        assert!(matches!(err, RouterError::Ring(_)));
    }
}
