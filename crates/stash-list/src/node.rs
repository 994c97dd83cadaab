//! Node handles and slot storage.
//!
//! A [`NodeRef`] names a node by its slot index within the owning list's
//! slab, scoped by the slot's generation. Deleting a node bumps the slot
//! generation, so any handle minted before the deletion stops resolving —
//! there is no way to reach a reused slot through an old handle.

use std::fmt;

/// Handle to a node within a [`List`](crate::List).
///
/// Handles are `Copy` and remain cheap to hold, but they are only
/// meaningful to the list that issued them. Passing a handle from one list
/// to another, or using it after the node was removed, yields
/// [`ListError::InvalidArgument`](crate::ListError::InvalidArgument) from
/// the resolving operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct NodeRef {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeRef {
    /// Slot generation this handle was minted in.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeRef(slot={}, gen={})", self.index, self.generation)
    }
}

/// A chain node: owned cloned payload plus non-owning neighbor links.
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) data: Box<[u8]>,
    pub(crate) prev: Option<NodeRef>,
    pub(crate) next: Option<NodeRef>,
}

/// One slab slot. `node` is `None` while the slot sits on the free-list.
#[derive(Debug, Default)]
pub(crate) struct Slot {
    pub(crate) generation: u32,
    pub(crate) node: Option<Node>,
}
