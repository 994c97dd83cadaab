//! Stash: type-erased container primitives.
//!
//! This is the facade crate re-exporting the public API of the two
//! independent container sub-crates:
//!
//! - [`list`] (`stash-list`): a doubly-linked list that clones and owns
//!   byte payloads, addressed through generation-checked [`NodeRef`]
//!   handles.
//! - [`array`] (`stash-array`): a growable, exact-size table of shared
//!   opaque references whose display, equality, sum, and sort behavior is
//!   selected by a runtime [`TypeTag`].
//!
//! # Quick start
//!
//! ```rust
//! use stash::{Array, List, TypeTag, ValueRef};
//!
//! // List: payloads are cloned in, owned by the list.
//! let mut list = List::new();
//! list.push_back(b"alpha").unwrap();
//! let beta = list.push_back(b"beta").unwrap();
//! list.insert_after(beta, b"gamma").unwrap();
//! assert_eq!(list.len(), 3);
//! list.remove_value(b"beta").unwrap();
//! assert!(list.find(b"alpha").is_ok());
//!
//! // Array: references are shared, payloads stay caller-owned.
//! let mut arr = Array::new(TypeTag::Integer);
//! for v in [5, 3, 8, 1] {
//!     arr.push(ValueRef::int(v)).unwrap();
//! }
//! arr.sort();
//! assert_eq!(arr.sum(), 17);
//! assert_eq!(arr.to_string(), "{ 1, 3, 5, 8 }");
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub use stash_array as array;
pub use stash_list as list;

pub use stash_array::{Array, ArrayError, TypeTag, Value, ValueRef};
pub use stash_list::{List, ListError, NodeRef};
