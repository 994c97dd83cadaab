//! The doubly-linked list and its splice operations.
//!
//! Nodes live in a slab (`Vec` of slots plus a free-list); the chain itself
//! is expressed through `prev`/`next` handles. Every mutating operation
//! keeps both link directions consistent before it returns — callers never
//! observe a half-spliced chain.
//!
//! Chain invariants:
//! - no cycles; the head node has no `prev`, the tail node has no `next`
//! - walking head→tail via `next` visits exactly `len()` nodes, and the
//!   tail→head walk via `prev` visits the same nodes in reverse

use crate::error::ListError;
use crate::node::{Node, NodeRef, Slot};

/// Doubly-linked list of owned byte payloads.
///
/// Created empty with no element allocation. Grows via [`push_back`],
/// [`push_front`], [`insert_at`], and [`insert_after`]; shrinks via the
/// `remove_*` operations, each of which frees exactly the removed node's
/// payload and slot. There is no cached element count: [`len`] walks the
/// chain.
///
/// [`push_back`]: List::push_back
/// [`push_front`]: List::push_front
/// [`insert_at`]: List::insert_at
/// [`insert_after`]: List::insert_after
/// [`len`]: List::len
#[derive(Debug, Default)]
pub struct List {
    head: Option<NodeRef>,
    tail: Option<NodeRef>,
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl List {
    /// Create an empty list. Allocates nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the chain holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of nodes, by walking the chain from head. O(n).
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut cursor = self.head;
        while let Some(r) = cursor {
            count += 1;
            cursor = self.node(r).and_then(|n| n.next);
        }
        count
    }

    /// Handle to the first node, if any.
    pub fn head(&self) -> Option<NodeRef> {
        self.head
    }

    /// Handle to the last node, if any.
    pub fn tail(&self) -> Option<NodeRef> {
        self.tail
    }

    /// The payload stored in `node`.
    ///
    /// Fails with [`ListError::InvalidArgument`] if the handle is stale or
    /// belongs to a different list's slot layout.
    pub fn data(&self, node: NodeRef) -> Result<&[u8], ListError> {
        self.node(node)
            .map(|n| n.data.as_ref())
            .ok_or(ListError::InvalidArgument)
    }

    /// Handle to the node after `node`, or `None` at the tail.
    pub fn next_of(&self, node: NodeRef) -> Result<Option<NodeRef>, ListError> {
        self.node(node).map(|n| n.next).ok_or(ListError::InvalidArgument)
    }

    /// Handle to the node before `node`, or `None` at the head.
    pub fn prev_of(&self, node: NodeRef) -> Result<Option<NodeRef>, ListError> {
        self.node(node).map(|n| n.prev).ok_or(ListError::InvalidArgument)
    }

    /// Clone `value` into a new node linked at the tail. O(1).
    ///
    /// The list owns the clone: later mutation of the caller's buffer does
    /// not affect the stored copy. Fails with
    /// [`ListError::InvalidArgument`] on an empty payload and
    /// [`ListError::AllocationFailed`] if node or payload storage cannot be
    /// reserved; on failure the chain is untouched.
    pub fn push_back(&mut self, value: &[u8]) -> Result<NodeRef, ListError> {
        let node = self.alloc(value)?;
        match self.tail {
            None => self.head = Some(node),
            Some(tail) => {
                self.set_prev(node, Some(tail));
                self.set_next(tail, Some(node));
            }
        }
        self.tail = Some(node);
        Ok(node)
    }

    /// Clone `value` into a new node linked at the head. O(1).
    ///
    /// Same failure contract as [`List::push_back`].
    pub fn push_front(&mut self, value: &[u8]) -> Result<NodeRef, ListError> {
        let node = self.alloc(value)?;
        match self.head {
            None => self.tail = Some(node),
            Some(head) => {
                self.set_next(node, Some(head));
                self.set_prev(head, Some(node));
            }
        }
        self.head = Some(node);
        Ok(node)
    }

    /// Handle to the node at 0-based `index`, walking from the head.
    ///
    /// Fails with [`ListError::NotFound`] when `index` is past the end,
    /// including every index on an empty list. O(index).
    pub fn node_at(&self, index: usize) -> Result<NodeRef, ListError> {
        let mut remaining = index;
        let mut cursor = self.head;
        while let Some(r) = cursor {
            if remaining == 0 {
                return Ok(r);
            }
            remaining -= 1;
            cursor = self.node(r).and_then(|n| n.next);
        }
        Err(ListError::NotFound)
    }

    /// First node whose payload is byte-equal to `value` (length and
    /// content both match). Fails with [`ListError::NotFound`] otherwise.
    pub fn find(&self, value: &[u8]) -> Result<NodeRef, ListError> {
        let mut cursor = self.head;
        while let Some(r) = cursor {
            let node = self.node(r).ok_or(ListError::NotFound)?;
            if node.data.as_ref() == value {
                return Ok(r);
            }
            cursor = node.next;
        }
        Err(ListError::NotFound)
    }

    /// Insert a cloned `value` at `index`.
    ///
    /// `index == 0` prepends (valid even on an empty list). An index naming
    /// the current tail appends after it. Any other index splices the new
    /// node immediately before the node currently at `index`, failing with
    /// [`ListError::NotFound`] when that index names no node.
    pub fn insert_at(&mut self, index: usize, value: &[u8]) -> Result<NodeRef, ListError> {
        if value.is_empty() {
            return Err(ListError::InvalidArgument);
        }
        if index == 0 {
            return self.push_front(value);
        }
        let target = self.node_at(index)?;
        if self.next_of(target)?.is_none() {
            return self.push_back(value);
        }
        self.splice_before(target, value)
    }

    /// Insert a cloned `value` immediately after a caller-held node.
    ///
    /// Fails with [`ListError::InvalidArgument`] if the list is empty, the
    /// handle is stale, or the payload is zero-length. Updates the tail
    /// when the insertion point was previously last.
    pub fn insert_after(&mut self, after: NodeRef, value: &[u8]) -> Result<NodeRef, ListError> {
        if self.head.is_none() {
            return Err(ListError::InvalidArgument);
        }
        let next = self.node(after).ok_or(ListError::InvalidArgument)?.next;
        let node = self.alloc(value)?;
        self.set_prev(node, Some(after));
        self.set_next(node, next);
        self.set_next(after, Some(node));
        match next {
            Some(n) => self.set_prev(n, Some(node)),
            None => self.tail = Some(node),
        }
        Ok(node)
    }

    /// Unlink and free the first node byte-equal to `value`.
    ///
    /// Fails with [`ListError::NotFound`] when the list is empty or no node
    /// matches, [`ListError::InvalidArgument`] on an empty payload.
    pub fn remove_value(&mut self, value: &[u8]) -> Result<(), ListError> {
        if value.is_empty() {
            return Err(ListError::InvalidArgument);
        }
        if self.head.is_none() {
            return Err(ListError::NotFound);
        }
        let node = self.find(value)?;
        self.unlink(node);
        Ok(())
    }

    /// Unlink and free the node at `index`.
    ///
    /// Fails with [`ListError::NotFound`] for an out-of-range index or an
    /// empty list.
    pub fn remove_at(&mut self, index: usize) -> Result<(), ListError> {
        let node = self.node_at(index)?;
        self.unlink(node);
        Ok(())
    }

    /// Unlink and free a caller-held node by identity.
    ///
    /// Fails with [`ListError::InvalidArgument`] when the list is empty or
    /// the handle no longer names a live node.
    pub fn remove_node(&mut self, node: NodeRef) -> Result<(), ListError> {
        if self.head.is_none() || self.node(node).is_none() {
            return Err(ListError::InvalidArgument);
        }
        self.unlink(node);
        Ok(())
    }

    /// Free every node and payload, leaving the list empty.
    ///
    /// Safe to call on an already-empty list. Outstanding handles become
    /// stale rather than dangling.
    pub fn clear(&mut self) {
        self.head = None;
        self.tail = None;
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(index as u32);
        }
    }

    /// Iterator over payload slices, head to tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    /// Splice a new node immediately before `target`.
    ///
    /// The no-predecessor case is explicit: when `target` is the head, the
    /// new node becomes the head instead of writing through an absent
    /// back-link.
    fn splice_before(&mut self, target: NodeRef, value: &[u8]) -> Result<NodeRef, ListError> {
        let prev = self.node(target).ok_or(ListError::NotFound)?.prev;
        let node = self.alloc(value)?;
        self.set_next(node, Some(target));
        self.set_prev(node, prev);
        self.set_prev(target, Some(node));
        match prev {
            Some(p) => self.set_next(p, Some(node)),
            None => self.head = Some(node),
        }
        Ok(node)
    }

    /// Four-case unlink: sole node, head, tail, interior. Frees the slot.
    fn unlink(&mut self, node: NodeRef) {
        let (prev, next) = match self.node(node) {
            Some(n) => (n.prev, n.next),
            None => return,
        };
        match (prev, next) {
            (None, None) => {
                self.head = None;
                self.tail = None;
            }
            (None, Some(n)) => {
                self.set_prev(n, None);
                self.head = Some(n);
            }
            (Some(p), None) => {
                self.set_next(p, None);
                self.tail = Some(p);
            }
            (Some(p), Some(n)) => {
                self.set_next(p, Some(n));
                self.set_prev(n, Some(p));
            }
        }
        self.release(node);
    }

    /// Clone the payload and place the node in a free slot, unlinked.
    fn alloc(&mut self, value: &[u8]) -> Result<NodeRef, ListError> {
        if value.is_empty() {
            return Err(ListError::InvalidArgument);
        }
        let mut data = Vec::new();
        data.try_reserve_exact(value.len())
            .map_err(|_| ListError::AllocationFailed)?;
        data.extend_from_slice(value);

        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                if self.slots.try_reserve(1).is_err() {
                    return Err(ListError::AllocationFailed);
                }
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };
        let slot = &mut self.slots[index as usize];
        slot.node = Some(Node {
            data: data.into_boxed_slice(),
            prev: None,
            next: None,
        });
        Ok(NodeRef {
            index,
            generation: slot.generation,
        })
    }

    /// Drop the node and bump the slot generation so outstanding handles
    /// stop resolving.
    fn release(&mut self, node: NodeRef) {
        if let Some(slot) = self.slots.get_mut(node.index as usize) {
            if slot.generation == node.generation && slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(node.index);
            }
        }
    }

    /// Resolve a handle to its node, `None` if stale.
    fn node(&self, r: NodeRef) -> Option<&Node> {
        let slot = self.slots.get(r.index as usize)?;
        if slot.generation != r.generation {
            return None;
        }
        slot.node.as_ref()
    }

    fn node_mut(&mut self, r: NodeRef) -> Option<&mut Node> {
        let slot = self.slots.get_mut(r.index as usize)?;
        if slot.generation != r.generation {
            return None;
        }
        slot.node.as_mut()
    }

    // Link writers. Callers only pass live handles; a stale handle here is
    // a no-op rather than a panic.
    fn set_next(&mut self, r: NodeRef, next: Option<NodeRef>) {
        if let Some(node) = self.node_mut(r) {
            node.next = next;
        }
    }

    fn set_prev(&mut self, r: NodeRef, prev: Option<NodeRef>) {
        if let Some(node) = self.node_mut(r) {
            node.prev = prev;
        }
    }
}

/// Simple head-to-tail traversal over payload slices.
#[derive(Debug)]
pub struct Iter<'a> {
    list: &'a List,
    cursor: Option<NodeRef>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let r = self.cursor?;
        let node = self.list.node(r)?;
        self.cursor = node.next;
        Some(&node.data)
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a [u8];
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
