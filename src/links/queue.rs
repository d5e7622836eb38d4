use tracing::trace;

use crate::links::slots::{NodeSlots, SlotId};

/// A singly-linked FIFO queue for the service window.
///
/// Elements leave in exactly the order they arrived. The chain keeps a
/// handle to both ends, so `enqueue` appends at the tail and `dequeue`
/// pops the head without ever walking the chain.
///
/// # Semantics
/// * `dequeue` and `peek` on an empty queue return `None`, nothing panics.
/// * `search` walks from oldest to newest and stops at the first match.
/// * `to_vec` is a snapshot in service order and never drains the queue.
///
/// # Complexity
/// `enqueue`, `dequeue` and `peek` are O(1); `search` and `to_vec` are O(n).
///
/// # Examples
/// ```
/// use mortar::links::LinkedQueue;
///
/// let mut window = LinkedQueue::new();
/// window.enqueue(101);
/// window.enqueue(102);
/// assert_eq!(window.dequeue(), Some(101));
/// assert_eq!(window.peek(), Some(&102));
/// ```
pub struct LinkedQueue<T> {
    slots: NodeSlots<T>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl<T> LinkedQueue<T> {
    /// Creates a new empty queue.
    pub fn new() -> Self {
        LinkedQueue {
            slots: NodeSlots::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Appends `value` behind the current tail.
    pub fn enqueue(&mut self, value: T) {
        let id = self.slots.alloc(value, None);
        match self.tail {
            Some(tail) => self.slots.get_mut(tail).next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
        trace!(len = self.len, "enqueue");
    }

    /// Removes and returns the oldest element, or `None` when empty.
    pub fn dequeue(&mut self) -> Option<T> {
        let id = self.head?;
        let node = self.slots.release(id);
        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        self.len -= 1;
        trace!(len = self.len, "dequeue");
        Some(node.data)
    }

    /// Borrows the oldest element without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.head.map(|id| &self.slots.get(id).data)
    }

    /// Walks from the head and returns the first element matching
    /// `predicate`, or `None` when nothing matches.
    pub fn search(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<&T> {
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let node = self.slots.get(id);
            if predicate(&node.data) {
                return Some(&node.data);
            }
            cursor = node.next;
        }
        None
    }

    /// Clones the queue contents in head-to-tail order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.len);
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let node = self.slots.get(id);
            out.push(node.data.clone());
            cursor = node.next;
        }
        out
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every queued element at once.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
        trace!("queue cleared");
    }
}

impl<T> Default for LinkedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for LinkedQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let node = self.slots.get(id);
            list.entry(&node.data);
            cursor = node.next;
        }
        list.finish()
    }
}
