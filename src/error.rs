//! Positional access errors.

use thiserror::Error;

/// Result alias for positional accessors.
pub type IndexResult<T> = Result<T, IndexError>;

/// Failure of a positional read.
///
/// Key lookups never produce this; they return `None` on a miss.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IndexError {
    /// `index` is not in `[0, len)`.
    #[error("index {index} out of range for map of length {len}")]
    OutOfRange { index: usize, len: usize },

    /// `first`/`last` on a map with no entries.
    #[error("map is empty")]
    Empty,
}
