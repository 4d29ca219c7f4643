//! Error types.

/// Errors raised when a vector is built from data whose size is only known at
/// runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DimensionError {
    /// The source buffer holds fewer elements than the vector has components.
    #[error("Buffer too short: expected at least {expected} elements, got {actual}")]
    BufferTooShort {
        /// Number of components of the vector.
        expected: usize,
        /// Length of the buffer.
        actual: usize,
    },
}
