use tracing::trace;

use crate::links::slots::{NodeSlots, SlotId};

/// A singly-linked list with newest-first ordering.
///
/// `prepend` pushes at the head, so iteration always yields the most
/// recent entry first. Removal unlinks the first node the predicate
/// accepts and reports whether anything was dropped.
///
/// # Semantics
/// * `remove` unlinks at most one node per call, the one closest to the head.
/// * `remove` and `find` on an empty list are no-ops returning `false` / `None`.
/// * `to_vec` is a snapshot in head-to-tail order and never drains the list.
///
/// # Complexity
/// `prepend` is O(1); `remove`, `find` and `to_vec` are O(n).
///
/// # Examples
/// ```
/// use mortar::links::LinkedList;
///
/// let mut history = LinkedList::new();
/// history.prepend("S1");
/// history.prepend("S2");
/// assert_eq!(history.to_vec(), vec!["S2", "S1"]);
/// assert!(history.remove_value(&"S1"));
/// assert_eq!(history.to_vec(), vec!["S2"]);
/// ```
pub struct LinkedList<T> {
    slots: NodeSlots<T>,
    head: Option<SlotId>,
    len: usize,
}

impl<T> LinkedList<T> {
    /// Creates a new empty list.
    pub fn new() -> Self {
        LinkedList {
            slots: NodeSlots::new(),
            head: None,
            len: 0,
        }
    }

    /// Pushes `value` in front of the current head.
    pub fn prepend(&mut self, value: T) {
        let id = self.slots.alloc(value, self.head);
        self.head = Some(id);
        self.len += 1;
        trace!(len = self.len, "prepend");
    }

    /// Unlinks the first element matching `predicate`.
    ///
    /// Returns `true` when a node was dropped, `false` when nothing
    /// matched. Later duplicates are left in place.
    pub fn remove(&mut self, mut predicate: impl FnMut(&T) -> bool) -> bool {
        let mut previous: Option<SlotId> = None;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            if predicate(&self.slots.get(id).data) {
                let node = self.slots.release(id);
                match previous {
                    Some(prev) => self.slots.get_mut(prev).next = node.next,
                    None => self.head = node.next,
                }
                self.len -= 1;
                trace!(len = self.len, "remove");
                return true;
            }
            previous = cursor;
            cursor = self.slots.get(id).next;
        }
        false
    }

    /// Unlinks the first element equal to `value`.
    pub fn remove_value(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.remove(|item| item == value)
    }

    /// Walks from the head and returns the first element matching
    /// `predicate`, or `None` when nothing matches.
    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<&T> {
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

    /// Clones the list contents in head-to-tail order.
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

    /// Drops every element at once.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.len = 0;
        trace!("list cleared");
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for LinkedList<T> {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_list_is_empty() {
        let list: LinkedList<u32> = LinkedList::new();
        assert!(list.is_empty());
        assert_eq!(list.head, None);
        assert_eq!(list.to_vec(), Vec::<u32>::new());
    }

    #[test]
    fn prepend_yields_newest_first() {
        let mut list = LinkedList::new();
        list.prepend("a");
        list.prepend("b");
        list.prepend("c");

        assert_eq!(list.to_vec(), vec!["c", "b", "a"]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn remove_unlinks_only_the_first_match() {
        let mut list = LinkedList::new();
        list.prepend(1);
        list.prepend(2);
        list.prepend(1);
        // List: [1, 2, 1]

        assert!(list.remove(|&x| x == 1));
        assert_eq!(list.to_vec(), vec![2, 1]);
    }

    #[test]
    fn remove_miss_returns_false_and_keeps_order() {
        let mut list = LinkedList::new();
        list.prepend(1);
        list.prepend(2);

        assert!(!list.remove(|&x| x == 9));
        assert_eq!(list.to_vec(), vec![2, 1]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn remove_on_empty_list_is_a_noop() {
        let mut list: LinkedList<u32> = LinkedList::new();
        assert!(!list.remove(|_| true));
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn remove_head_relinks_to_the_second_node() {
        let mut list = LinkedList::new();
        list.prepend(1);
        list.prepend(2);
        list.prepend(3);
        // List: [3, 2, 1]

        assert!(list.remove(|&x| x == 3));
        assert_eq!(list.to_vec(), vec![2, 1]);
        assert_eq!(list.slots.get(list.head.unwrap()).data, 2);
    }

    #[test]
    fn remove_last_node_terminates_the_chain() {
        let mut list = LinkedList::new();
        list.prepend(1);
        list.prepend(2);
        // List: [2, 1]

        assert!(list.remove(|&x| x == 1));
        assert_eq!(list.to_vec(), vec![2]);
        assert_eq!(list.slots.get(list.head.unwrap()).next, None);
    }

    #[test]
    fn remove_value_drops_by_equality() {
        let mut list = LinkedList::new();
        list.prepend("S1");
        list.prepend("S2");

        assert!(list.remove_value(&"S1"));
        assert!(!list.remove_value(&"S1"));
        assert_eq!(list.to_vec(), vec!["S2"]);
    }

    #[test]
    fn find_returns_first_match_from_the_head() {
        let mut list = LinkedList::new();
        list.prepend((1, 10));
        list.prepend((2, 10));
        // List: [(2, 10), (1, 10)]

        assert_eq!(list.find(|&(_, v)| v == 10), Some(&(2, 10)));
        assert_eq!(list.find(|&(k, _)| k == 1), Some(&(1, 10)));
        assert_eq!(list.find(|&(k, _)| k == 9), None);
    }

    #[test]
    fn sales_history_drops_a_voided_sale() {
        let mut history = LinkedList::new();
        history.prepend("S1");
        history.prepend("S2");
        history.prepend("S3");
        // History: [S3, S2, S1]

        assert_eq!(history.to_vec(), vec!["S3", "S2", "S1"]);
        assert!(history.remove_value(&"S2"));
        assert_eq!(history.to_vec(), vec!["S3", "S1"]);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn released_slots_are_reused_by_later_prepends() {
        let mut list = LinkedList::new();
        for i in 0..4 {
            list.prepend(i);
        }
        assert_eq!(list.slots.capacity(), 4);

        list.remove(|&x| x == 2);
        list.prepend(9);

        assert_eq!(list.slots.capacity(), 4);
        assert_eq!(list.to_vec(), vec![9, 3, 1, 0]);
    }

    #[test]
    fn clear_empties_and_list_stays_usable() {
        let mut list = LinkedList::new();
        list.prepend(1);
        list.prepend(2);
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.find(|_| true), None);

        list.prepend(3);
        assert_eq!(list.to_vec(), vec![3]);
    }

    #[test]
    fn test_debug() {
        let mut list = LinkedList::new();
        list.prepend(1);
        list.prepend(2);
        assert_eq!(format!("{list:?}"), "[2, 1]");
    }
}
