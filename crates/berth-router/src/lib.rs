//! Placement router tying content hashing, ring resolution, and store
//! delegation together.
//!
//! A [`Router`] owns an immutable [`Ring`](berth_placement::Ring) and a
//! storage collaborator. Callers hand it a file path; it hashes the
//! content, resolves the owning backend, and delegates the copy.

mod error;
mod router;

pub use error::RouterError;
pub use router::{Placement, Router};
