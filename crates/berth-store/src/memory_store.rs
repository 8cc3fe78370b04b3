//! In-memory object store.

use std::collections::HashMap;
use std::sync::RwLock;

use berth_types::BackendId;
use bytes::Bytes;
use tracing::debug;

use crate::error::StoreError;
use crate::traits::ObjectStore;

/// In-memory object store backed by a `RwLock<HashMap>`.
///
/// Useful for tests and for dry runs where nothing should touch disk.
/// Tracks total bytes held against a configurable maximum.
pub struct MemoryStore {
    objects: RwLock<HashMap<BackendId, HashMap<String, Bytes>>>,
    max_bytes: u64,
}

impl MemoryStore {
    /// Create a new in-memory store with the given capacity limit.
    pub fn new(max_bytes: u64) -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            max_bytes,
        }
    }

    /// Payload held for `name` on `backend`, if any.
    pub fn get(&self, name: &str, backend: BackendId) -> Option<Bytes> {
        let map = self.objects.read().expect("lock poisoned");
        map.get(&backend).and_then(|objs| objs.get(name)).cloned()
    }

    /// Whether `name` is present on `backend`.
    pub fn contains(&self, name: &str, backend: BackendId) -> bool {
        let map = self.objects.read().expect("lock poisoned");
        map.get(&backend).is_some_and(|objs| objs.contains_key(name))
    }

    /// Number of objects held for one backend.
    pub fn object_count(&self, backend: BackendId) -> usize {
        let map = self.objects.read().expect("lock poisoned");
        map.get(&backend).map_or(0, HashMap::len)
    }

    fn used_bytes_unlocked(map: &HashMap<BackendId, HashMap<String, Bytes>>) -> u64 {
        map.values()
            .flat_map(HashMap::values)
            .map(|data| data.len() as u64)
            .sum()
    }
}

#[async_trait::async_trait]
impl ObjectStore for MemoryStore {
    async fn copy(&self, name: &str, data: Bytes, backend: BackendId) -> Result<(), StoreError> {
        let mut map = self.objects.write().expect("lock poisoned");
        let used = Self::used_bytes_unlocked(&map);
        let data_len = data.len() as u64;

        // Replacing an existing object frees its bytes.
        let existing_len = map
            .get(&backend)
            .and_then(|objs| objs.get(name))
            .map_or(0, |d| d.len() as u64);
        let net_increase = data_len.saturating_sub(existing_len);

        if used + net_increase > self.max_bytes {
            return Err(StoreError::CapacityExceeded {
                needed: net_increase,
                available: self.max_bytes.saturating_sub(used),
            });
        }

        debug!(name, %backend, size = data.len(), "copied object into memory");
        map.entry(backend).or_default().insert(name.to_string(), data);
        Ok(())
    }
}
