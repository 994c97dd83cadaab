//! Growable ordered table of type-tagged opaque references.
//!
//! [`Array`] stores [`ValueRef`] handles to caller-owned payloads in a
//! contiguous reference table. A runtime [`TypeTag`] fixed at creation (or
//! re-init) selects how elements are displayed, compared, summed, and
//! sorted.
//!
//! # Ownership
//!
//! The array owns only the reference table, never the referenced payloads.
//! Dropping or clearing an array releases the table alone; payload lifetime
//! is governed by whoever created the payloads. [`Array::copy_from`]
//! duplicates the table, not the payloads — afterward both arrays name the
//! same payloads through independent tables.
//!
//! # Storage policy
//!
//! The table never holds spare capacity: every append, insert, and pop
//! rebuilds it at the exact new size. Mutation is O(n) by design — a
//! minimal-footprint trade, not an oversight to amortize away.
//!
//! # Concurrency
//!
//! `Rc`/`RefCell` sharing makes the array structurally single-threaded
//! (`!Send`, `!Sync`).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod array;
pub mod error;
pub mod value;

pub use array::Array;
pub use error::ArrayError;
pub use value::{TypeTag, Value, ValueRef};
