//! Error types for array operations.

use std::error::Error;
use std::fmt;

/// Errors returned by [`Array`](crate::Array) operations.
///
/// Bounds violations are reported, never fatal: an out-of-range `get`,
/// `set`, or `insert` returns [`ArrayError::IndexOutOfRange`] instead of
/// terminating anything. An empty array has no valid index, so index 0 is
/// out of range there too.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// The reference table could not be resized.
    AllocationFailed,
    /// Positional access outside the live entries.
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Array length at the time of the access.
        len: usize,
    },
    /// The operation needs at least one element.
    Empty,
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed => write!(f, "reference table allocation failed"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            Self::Empty => write!(f, "array is empty"),
        }
    }
}

impl Error for ArrayError {}
