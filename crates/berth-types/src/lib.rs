//! Shared types for the Berth workspace.
//!
//! This crate defines the types shared across the workspace: the backend
//! pool identifier ([`BackendId`]), ring sizing configuration
//! ([`RingConfig`]), and the storage backend selector ([`StorageKind`]).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for a backend storage target, unique within the pool.
///
/// Backends are indexed `0..pool_size` and the id is that index. Kept as
/// a newtype so a backend id cannot be confused with a virtual-node index
/// or a hash key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BackendId(u32);

impl BackendId {
    /// Create a backend id from its pool index.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw pool index.
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// The pool index widened for slice indexing.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for BackendId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sizing for the placement ring.
///
/// The pool is static for the lifetime of a ring: resizing means building
/// a new ring from a new config and swapping it in at the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingConfig {
    /// Number of backend storage targets in the pool.
    pub backends: usize,
    /// Number of virtual nodes on the ring.
    ///
    /// Should be at least `backends` for balance; a multiple of `backends`
    /// gives each backend exactly the same number of virtual nodes.
    pub vnodes: usize,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            backends: 5,
            vnodes: 100,
        }
    }
}

/// Storage collaborator selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// One directory per backend on the local filesystem.
    File,
    /// In-memory storage (volatile, for tests and dry runs).
    Memory,
}
