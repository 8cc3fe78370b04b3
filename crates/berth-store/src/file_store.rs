//! Filesystem-backed object store.
//!
//! Keeps one subdirectory per backend under a common root:
//! `{root}/backend-{id}/{name}`.

use std::path::{Path, PathBuf};

use berth_types::BackendId;
use bytes::Bytes;
use tracing::debug;

use crate::error::StoreError;
use crate::traits::ObjectStore;

/// File-based object store with a per-backend directory layout.
///
/// Each placed object lands at `{root}/backend-{id}/{name}`. Writes are
/// atomic: data goes to a temporary file first, then is renamed into
/// place, so a failed copy never leaves a half-written object.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a file store rooted at the given directory.
    ///
    /// The root is created if it does not exist; per-backend directories
    /// are created on first copy.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Directory receiving objects for one backend.
    pub fn backend_dir(&self, backend: BackendId) -> PathBuf {
        self.root.join(format!("backend-{backend}"))
    }

    fn object_path(&self, name: &str, backend: BackendId) -> PathBuf {
        self.backend_dir(backend).join(name)
    }
}

#[async_trait::async_trait]
impl ObjectStore for FileStore {
    async fn copy(&self, name: &str, data: Bytes, backend: BackendId) -> Result<(), StoreError> {
        let path = self.object_path(name, backend);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Write to a sibling temp file, then rename into place.
        let tmp = path.with_file_name(format!("{name}.tmp"));
        tokio::fs::write(&tmp, &data).await?;
        tokio::fs::rename(&tmp, &path).await?;

        debug!(name, %backend, size = data.len(), "copied object to backend directory");
        Ok(())
    }
}
