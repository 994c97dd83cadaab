//! Doubly-linked list with owned byte payloads.
//!
//! [`List`] clones every inserted payload into node-owned storage and links
//! the node into a head/tail chain. Callers address nodes through
//! [`NodeRef`] handles rather than pointers: a handle encodes a slot index
//! plus the slot's generation, so a handle held across the node's deletion
//! is detectably stale in O(1) instead of dangling.
//!
//! # Ownership
//!
//! The list owns the cloned payloads. Mutating the caller's original buffer
//! after insertion never affects the stored copy, and dropping the list
//! releases every node and its payload.
//!
//! # Concurrency
//!
//! Single-threaded by design. The list is an unsynchronized mutable value;
//! callers needing cross-thread access must serialize it externally.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod list;
pub mod node;

pub use error::ListError;
pub use list::{Iter, List};
pub use node::NodeRef;
