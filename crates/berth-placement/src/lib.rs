//! Consistent hashing ring for deterministic file placement.
//!
//! This crate maps a file's content digest to exactly one backend in a
//! fixed pool. The ring partitions the 32-bit hash space into equal arcs
//! (virtual nodes) assigned round-robin to backends; resolution is a
//! lower-bound binary search over the arc boundaries.
//!
//! The ring is immutable after construction, so a shared reference can be
//! used concurrently from any number of callers without synchronization.

mod error;
mod key;
mod ring;

pub use error::RingError;
pub use key::content_key;
pub use ring::Ring;
