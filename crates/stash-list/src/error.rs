//! Error types for list operations.

use std::error::Error;
use std::fmt;

/// Errors returned by [`List`](crate::List) operations.
///
/// Every failure is a recoverable value; no list operation panics or
/// terminates the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListError {
    /// Node or payload storage could not be obtained.
    AllocationFailed,
    /// No node matches the requested index or value.
    NotFound,
    /// A required handle is stale, the list is empty where it must not be,
    /// or the payload is zero-length.
    InvalidArgument,
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed => write!(f, "node allocation failed"),
            Self::NotFound => write!(f, "no matching node"),
            Self::InvalidArgument => write!(f, "stale handle, empty list, or empty payload"),
        }
    }
}

impl Error for ListError {}
