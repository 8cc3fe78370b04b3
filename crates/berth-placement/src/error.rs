//! Error types for ring construction.

/// Errors that can occur when building a placement ring.
///
/// All variants are fatal and raised synchronously at construction; a
/// constructed ring cannot fail afterwards.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RingError {
    /// The pool or virtual node count is zero; no ring can be formed.
    #[error("invalid ring configuration: backends={backends}, vnodes={vnodes} (both must be at least 1)")]
    InvalidConfiguration {
        /// Configured backend count.
        backends: usize,
        /// Configured virtual node count.
        vnodes: usize,
    },

    /// More virtual nodes than points in the hash space; arc width would
    /// be zero and boundaries could not be unique.
    #[error("invalid ring configuration: {vnodes} virtual nodes exceed the 32-bit hash space")]
    TooManyVnodes {
        /// Configured virtual node count.
        vnodes: usize,
    },
}
