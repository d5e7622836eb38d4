/// Handle to a node slot inside a [`NodeSlots`] arena.
///
/// Only meaningful for the arena that produced it. Handles of released
/// slots must not be dereferenced again until realloc hands them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SlotId {
    pub(crate) internal: usize,
}

/// A single chain node: one payload plus the handle of its successor.
#[derive(Debug)]
pub(crate) struct LinkNode<T> {
    pub(crate) data: T,
    pub(crate) next: Option<SlotId>,
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(LinkNode<T>),
    Vacant { next_free: Option<SlotId> },
}

/// Slab-style arena backing the singly-linked structures.
///
/// Nodes live in one contiguous `Vec` and refer to each other by index
/// instead of by pointer, so chains can be rewired in safe code with
/// plain assignments. Released slots are threaded into an intrusive
/// free list and handed out again before the vector grows.
///
/// # Complexity
/// `alloc`, `release`, `get` and `get_mut` are all O(1).
#[derive(Debug)]
pub(crate) struct NodeSlots<T> {
    slots: Vec<Slot<T>>,
    free: Option<SlotId>,
}

impl<T> NodeSlots<T> {
    pub(crate) fn new() -> Self {
        NodeSlots {
            slots: Vec::new(),
            free: None,
        }
    }

    /// Stores a fresh node and returns its handle, recycling a vacant
    /// slot when one is available.
    pub(crate) fn alloc(&mut self, data: T, next: Option<SlotId>) -> SlotId {
        let node = LinkNode { data, next };
        match self.free {
            Some(id) => {
                let vacant = std::mem::replace(&mut self.slots[id.internal], Slot::Occupied(node));
                match vacant {
                    Slot::Vacant { next_free } => self.free = next_free,
                    Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
                }
                id
            }
            None => {
                let id = SlotId {
                    internal: self.slots.len(),
                };
                self.slots.push(Slot::Occupied(node));
                id
            }
        }
    }

    /// Vacates a slot and returns the node that lived there.
    ///
    /// # Panics
    /// Panics if `id` refers to a slot that is already vacant.
    pub(crate) fn release(&mut self, id: SlotId) -> LinkNode<T> {
        let occupied = std::mem::replace(
            &mut self.slots[id.internal],
            Slot::Vacant { next_free: self.free },
        );
        self.free = Some(id);
        match occupied {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("released a slot that was already vacant"),
        }
    }

    /// # Panics
    /// Panics if `id` refers to a vacant slot.
    pub(crate) fn get(&self, id: SlotId) -> &LinkNode<T> {
        match &self.slots[id.internal] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("dereferenced a vacant slot"),
        }
    }

    /// # Panics
    /// Panics if `id` refers to a vacant slot.
    pub(crate) fn get_mut(&mut self, id: SlotId) -> &mut LinkNode<T> {
        match &mut self.slots[id.internal] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("dereferenced a vacant slot"),
        }
    }

    /// Number of slots in the backing vector, vacant ones included.
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Drops every node and forgets the free list.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
    }
}
