//! Hash ring construction and key resolution.

use berth_types::{BackendId, RingConfig};
use tracing::debug;

use crate::error::RingError;

/// Size of the hash space: keys are `u32`, arcs span `[0, 2^32)`.
const RING_SPACE: u64 = 1 << 32;

/// Immutable consistent-hash ring over a fixed backend pool.
///
/// Holds the ascending arc boundaries and the parallel owner sequence.
/// Construction is deterministic: identical configs always produce
/// identical rings. Resolution never mutates, so the ring is safe to
/// share across threads; resizing the pool means building a new ring
/// and swapping the reference at the caller, leaving in-flight
/// resolutions against the old ring unaffected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ring {
    /// Upper bound of each arc, strictly ascending and unique.
    ///
    /// Held as `u64` because the top arc's bound equals `2^32` exactly
    /// whenever the vnode count divides the hash space.
    boundaries: Vec<u64>,
    /// Owner of each arc, parallel to `boundaries`.
    owners: Vec<BackendId>,
    backend_count: usize,
}

impl Ring {
    /// Build a ring from the pool configuration.
    ///
    /// The hash space is partitioned into `vnodes` equal contiguous arcs;
    /// arc *i* ends at `floor(2^32 / vnodes) * (i + 1)` and is owned by
    /// backend `i mod backends`. When `vnodes` is a multiple of
    /// `backends` every backend owns exactly `vnodes / backends` arcs;
    /// otherwise the counts differ by at most one.
    pub fn new(config: RingConfig) -> Result<Self, RingError> {
        let RingConfig { backends, vnodes } = config;
        if backends == 0 || vnodes == 0 {
            return Err(RingError::InvalidConfiguration { backends, vnodes });
        }
        if vnodes as u64 > RING_SPACE {
            return Err(RingError::TooManyVnodes { vnodes });
        }

        let step = RING_SPACE / vnodes as u64;
        let mut boundaries = Vec::with_capacity(vnodes);
        let mut owners = Vec::with_capacity(vnodes);
        for i in 0..vnodes {
            boundaries.push(step * (i as u64 + 1));
            owners.push(BackendId::new((i % backends) as u32));
        }

        debug!(backends, vnodes, step, "built placement ring");
        Ok(Self {
            boundaries,
            owners,
            backend_count: backends,
        })
    }

    /// Resolve a hash key to its owning backend.
    ///
    /// Lower-bound search: the first arc whose boundary is >= the key
    /// owns it, so a key exactly equal to a boundary belongs to the arc
    /// that boundary terminates. A key past the last boundary falls in
    /// the wrap-around arc and resolves to arc 0's owner.
    ///
    /// Total over all `u32` keys; a constructed ring cannot fail here.
    pub fn resolve(&self, key: u32) -> BackendId {
        let idx = self.boundaries.partition_point(|&b| b < u64::from(key));
        self.owners[idx % self.owners.len()]
    }

    /// Number of virtual nodes on the ring.
    pub fn vnode_count(&self) -> usize {
        self.owners.len()
    }

    /// Number of backends in the pool.
    pub fn backend_count(&self) -> usize {
        self.backend_count
    }

    /// Arc boundaries, ascending. Exposed for inspection tooling.
    pub fn boundaries(&self) -> &[u64] {
        &self.boundaries
    }

    /// Arc owners, parallel to [`boundaries`](Self::boundaries).
    pub fn owners(&self) -> &[BackendId] {
        &self.owners
    }

    /// Number of virtual nodes owned by each backend, indexed by pool id.
    pub fn vnode_distribution(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.backend_count];
        for owner in &self.owners {
            counts[owner.index()] += 1;
        }
        counts
    }
}
