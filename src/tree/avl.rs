use std::cmp::Ordering;

use tracing::trace;

type Link<T> = Option<Box<AvlNode<T>>>;

struct AvlNode<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
    height: i32,
}

impl<T> AvlNode<T> {
    fn new(value: T) -> Self {
        AvlNode {
            value,
            left: None,
            right: None,
            height: 1,
        }
    }

    fn height(link: &Link<T>) -> i32 {
        link.as_ref().map_or(0, |node| node.height)
    }

    fn update_height(&mut self) {
        self.height = 1 + Self::height(&self.left).max(Self::height(&self.right));
    }

    fn balance_factor(&self) -> i32 {
        Self::height(&self.left) - Self::height(&self.right)
    }
}

/// A self-balancing binary search tree ordered by a caller-supplied
/// comparator.
///
/// The client registry keeps its records here: lookups, inserts and
/// removals all stay O(log n) because every mutation rebalances the
/// path it touched. Elements are ordered by the comparator alone, so
/// payload fields that the comparator ignores can differ freely
/// between a stored element and a probe.
///
/// # Invariants
/// * For every node, the heights of its two subtrees differ by at most one.
/// * An in-order walk visits elements in strictly ascending comparator order.
/// * No two stored elements compare `Equal`; inserting an equal element
///   replaces the stored payload instead of adding a node.
///
/// # Examples
/// ```
/// use mortar::tree::AvlTree;
///
/// let mut registry = AvlTree::new();
/// registry.insert(7);
/// registry.insert(3);
/// registry.insert(9);
/// assert_eq!(registry.in_order(), vec![3, 7, 9]);
/// assert_eq!(registry.search(&9), Some(&9));
/// ```
pub struct AvlTree<T, C = fn(&T, &T) -> Ordering>
where
    C: Fn(&T, &T) -> Ordering,
{
    root: Link<T>,
    len: usize,
    compare: C,
}

impl<T: Ord> AvlTree<T> {
    /// Creates an empty tree ordered by `T`'s natural ordering.
    pub fn new() -> Self {
        Self::with_comparator(|a, b| a.cmp(b))
    }
}

impl<T: Ord> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> AvlTree<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Creates an empty tree ordered by `compare`.
    ///
    /// The comparator must be a total order over the element type. It
    /// commonly inspects a single key field, leaving the rest of the
    /// element as payload.
    ///
    /// # Examples
    /// ```
    /// use mortar::tree::AvlTree;
    ///
    /// let mut ledger = AvlTree::with_comparator(|a: &(u32, &str), b: &(u32, &str)| a.0.cmp(&b.0));
    /// assert_eq!(ledger.insert((7, "opened")), None);
    /// assert_eq!(ledger.insert((7, "settled")), Some((7, "opened")));
    /// assert_eq!(ledger.len(), 1);
    /// ```
    pub fn with_comparator(compare: C) -> Self {
        AvlTree {
            root: None,
            len: 0,
            compare,
        }
    }

    /// Inserts `value`, rebalancing the path from the insertion point
    /// back to the root.
    ///
    /// # Semantics
    /// When an existing element compares `Equal` to `value`, the stored
    /// element is replaced in place and handed back, the tree shape and
    /// length do not change. Otherwise a new leaf is added and `None`
    /// is returned.
    pub fn insert(&mut self, value: T) -> Option<T> {
        let root = self.root.take();
        let (root, displaced) = Self::insert_in(root, value, &self.compare);
        self.root = root;
        if displaced.is_none() {
            self.len += 1;
        }
        trace!(len = self.len, replaced = displaced.is_some(), "avl insert");
        displaced
    }

    fn insert_in(link: Link<T>, value: T, compare: &C) -> (Link<T>, Option<T>) {
        let mut node = match link {
            None => return (Some(Box::new(AvlNode::new(value))), None),
            Some(node) => node,
        };
        match compare(&value, &node.value) {
            Ordering::Less => {
                let (left, displaced) = Self::insert_in(node.left.take(), value, compare);
                node.left = left;
                if displaced.is_some() {
                    // Replacement deeper down, no heights changed
                    return (Some(node), displaced);
                }
                node.update_height();
                (Some(Self::rebalance(node)), None)
            }
            Ordering::Greater => {
                let (right, displaced) = Self::insert_in(node.right.take(), value, compare);
                node.right = right;
                if displaced.is_some() {
                    return (Some(node), displaced);
                }
                node.update_height();
                (Some(Self::rebalance(node)), None)
            }
            Ordering::Equal => {
                let displaced = std::mem::replace(&mut node.value, value);
                (Some(node), Some(displaced))
            }
        }
    }

    /// Returns the stored element comparing `Equal` to `probe`, if any.
    ///
    /// The probe only needs valid key fields, everything the comparator
    /// ignores may be left blank.
    pub fn search(&self, probe: &T) -> Option<&T> {
        let mut current = &self.root;
        while let Some(node) = current {
            match (self.compare)(probe, &node.value) {
                Ordering::Less => current = &node.left,
                Ordering::Greater => current = &node.right,
                Ordering::Equal => return Some(&node.value),
            }
        }
        None
    }

    /// Removes and returns the element comparing `Equal` to `probe`.
    ///
    /// A node with two children swaps its value with the in-order
    /// successor and the successor's node is unlinked instead. Every
    /// node on the way back up is rebalanced, so a single removal may
    /// cascade several rotations.
    pub fn remove(&mut self, probe: &T) -> Option<T> {
        let root = self.root.take();
        let (root, removed) = Self::remove_in(root, probe, &self.compare);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        trace!(len = self.len, hit = removed.is_some(), "avl remove");
        removed
    }

    fn remove_in(link: Link<T>, probe: &T, compare: &C) -> (Link<T>, Option<T>) {
        let mut node = match link {
            None => return (None, None),
            Some(node) => node,
        };
        match compare(probe, &node.value) {
            Ordering::Less => {
                let (left, removed) = Self::remove_in(node.left.take(), probe, compare);
                node.left = left;
                if removed.is_none() {
                    return (Some(node), None);
                }
                node.update_height();
                (Some(Self::rebalance(node)), removed)
            }
            Ordering::Greater => {
                let (right, removed) = Self::remove_in(node.right.take(), probe, compare);
                node.right = right;
                if removed.is_none() {
                    return (Some(node), None);
                }
                node.update_height();
                (Some(Self::rebalance(node)), removed)
            }
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                (None, None) => (None, Some(node.value)),
                (Some(child), None) | (None, Some(child)) => (Some(child), Some(node.value)),
                (Some(left), Some(right)) => {
                    let (right, successor) = Self::detach_min(right);
                    let removed = std::mem::replace(&mut node.value, successor);
                    node.left = Some(left);
                    node.right = right;
                    node.update_height();
                    (Some(Self::rebalance(node)), Some(removed))
                }
            },
        }
    }

    /// Unlinks the leftmost node of the subtree and returns its value
    /// together with the rebalanced remainder.
    fn detach_min(mut node: Box<AvlNode<T>>) -> (Link<T>, T) {
        match node.left.take() {
            None => (node.right.take(), node.value),
            Some(left) => {
                let (left, min) = Self::detach_min(left);
                node.left = left;
                node.update_height();
                (Some(Self::rebalance(node)), min)
            }
        }
    }

    fn rebalance(mut node: Box<AvlNode<T>>) -> Box<AvlNode<T>> {
        let balance = node.balance_factor();
        if balance > 1 {
            // Left-right: align the left spine before the main rotation
            if node.left.as_ref().is_some_and(|left| left.balance_factor() < 0) {
                let left = node.left.take().expect("left-heavy node lost its left child");
                node.left = Some(Self::rotate_left(left));
            }
            return Self::rotate_right(node);
        }
        if balance < -1 {
            if node.right.as_ref().is_some_and(|right| right.balance_factor() > 0) {
                let right = node.right.take().expect("right-heavy node lost its right child");
                node.right = Some(Self::rotate_right(right));
            }
            return Self::rotate_left(node);
        }
        node
    }

    fn rotate_left(mut node: Box<AvlNode<T>>) -> Box<AvlNode<T>> {
        let mut pivot = node.right.take().expect("rotate_left requires a right child");
        node.right = pivot.left.take();
        node.update_height();
        pivot.left = Some(node);
        pivot.update_height();
        pivot
    }

    fn rotate_right(mut node: Box<AvlNode<T>>) -> Box<AvlNode<T>> {
        let mut pivot = node.left.take().expect("rotate_right requires a left child");
        node.left = pivot.right.take();
        node.update_height();
        pivot.right = Some(node);
        pivot.update_height();
        pivot
    }

    /// Clones the elements in ascending comparator order.
    pub fn in_order(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.len);
        Self::push_in_order(&self.root, &mut out);
        out
    }

    fn push_in_order(link: &Link<T>, out: &mut Vec<T>)
    where
        T: Clone,
    {
        if let Some(node) = link {
            Self::push_in_order(&node.left, out);
            out.push(node.value.clone());
            Self::push_in_order(&node.right, out);
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the tree, where an empty tree has height 0 and a lone
    /// root has height 1.
    pub fn height(&self) -> i32 {
        AvlNode::height(&self.root)
    }

    /// Drops every element at once.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
        trace!("avl cleared");
    }
}

impl<T, C> std::fmt::Debug for AvlTree<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvlTree")
            .field("len", &self.len)
            .field("height", &self.height())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Recomputes heights bottom-up, checking the stored height and the
    /// balance factor of every node on the way.
    fn checked_height<T>(link: &Link<T>) -> i32 {
        match link {
            None => 0,
            Some(node) => {
                let left = checked_height(&node.left);
                let right = checked_height(&node.right);
                assert_eq!(node.height, 1 + left.max(right), "stored height is stale");
                assert!((left - right).abs() <= 1, "balance factor out of range");
                node.height
            }
        }
    }

    fn assert_avl<T, C>(tree: &AvlTree<T, C>)
    where
        T: Clone,
        C: Fn(&T, &T) -> Ordering,
    {
        checked_height(&tree.root);
        let items = tree.in_order();
        assert_eq!(items.len(), tree.len());
        for pair in items.windows(2) {
            assert_eq!(
                (tree.compare)(&pair[0], &pair[1]),
                Ordering::Less,
                "in-order walk is not strictly ascending"
            );
        }
    }

    #[test]
    fn empty_tree_has_no_matches() {
        let tree: AvlTree<u32> = AvlTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.search(&5), None);
        assert_eq!(tree.in_order(), Vec::<u32>::new());
    }

    #[test]
    fn remove_from_empty_returns_none() {
        let mut tree: AvlTree<u32> = AvlTree::new();
        assert_eq!(tree.remove(&5), None);
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn first_insert_creates_a_root_leaf() {
        let mut tree = AvlTree::new();
        assert_eq!(tree.insert(11), None);

        let root = tree.root.as_ref().unwrap();
        assert_eq!(root.value, 11);
        assert_eq!(root.height, 1);
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn left_left_insertion_rotates_right() {
        let mut tree = AvlTree::new();
        tree.insert(3);
        tree.insert(2);
        tree.insert(1);
        // Root: 2, children 1 and 3

        let root = tree.root.as_ref().unwrap();
        assert_eq!(root.value, 2);
        assert_eq!(root.left.as_ref().unwrap().value, 1);
        assert_eq!(root.right.as_ref().unwrap().value, 3);
        assert_eq!(tree.height(), 2);
    }

    #[test]
    fn right_right_insertion_rotates_left() {
        let mut tree = AvlTree::new();
        tree.insert(1);
        tree.insert(2);
        tree.insert(3);

        let root = tree.root.as_ref().unwrap();
        assert_eq!(root.value, 2);
        assert_eq!(root.left.as_ref().unwrap().value, 1);
        assert_eq!(root.right.as_ref().unwrap().value, 3);
        assert_eq!(tree.height(), 2);
    }

    #[test]
    fn left_right_insertion_needs_a_double_rotation() {
        let mut tree = AvlTree::new();
        tree.insert(3);
        tree.insert(1);
        tree.insert(2);

        let root = tree.root.as_ref().unwrap();
        assert_eq!(root.value, 2);
        assert_eq!(root.left.as_ref().unwrap().value, 1);
        assert_eq!(root.right.as_ref().unwrap().value, 3);
        assert_eq!(tree.height(), 2);
    }

    #[test]
    fn right_left_insertion_needs_a_double_rotation() {
        let mut tree = AvlTree::new();
        tree.insert(1);
        tree.insert(3);
        tree.insert(2);

        let root = tree.root.as_ref().unwrap();
        assert_eq!(root.value, 2);
        assert_eq!(root.left.as_ref().unwrap().value, 1);
        assert_eq!(root.right.as_ref().unwrap().value, 3);
        assert_eq!(tree.height(), 2);
    }

    #[test]
    fn client_registry_scenario_stays_balanced() {
        let mut tree = AvlTree::new();
        for id in [5, 3, 8, 1, 4, 7, 9, 2] {
            assert_eq!(tree.insert(id), None);
        }

        assert_eq!(tree.in_order(), vec![1, 2, 3, 4, 5, 7, 8, 9]);
        assert_eq!(tree.height(), 4);
        assert_avl(&tree);
    }

    #[test]
    fn insert_equal_replaces_payload_in_place() {
        let mut tree =
            AvlTree::with_comparator(|a: &(u32, &str), b: &(u32, &str)| a.0.cmp(&b.0));
        assert_eq!(tree.insert((7, "Imogen")), None);
        assert_eq!(tree.insert((3, "Piotr")), None);

        let displaced = tree.insert((7, "Imogen H."));
        assert_eq!(displaced, Some((7, "Imogen")));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.search(&(7, "")), Some(&(7, "Imogen H.")));
        assert_avl(&tree);
    }

    #[test]
    fn search_follows_comparator_decisions() {
        let mut tree = AvlTree::new();
        for id in [50, 20, 80, 10, 30, 70, 90] {
            tree.insert(id);
        }

        assert_eq!(tree.search(&10), Some(&10));
        assert_eq!(tree.search(&90), Some(&90));
        assert_eq!(tree.search(&55), None);
    }

    #[test]
    fn remove_leaf_keeps_the_rest_intact() {
        let mut tree = AvlTree::new();
        for v in [2, 1, 3] {
            tree.insert(v);
        }

        assert_eq!(tree.remove(&1), Some(1));
        assert_eq!(tree.in_order(), vec![2, 3]);
        assert_eq!(tree.search(&1), None);
        assert_avl(&tree);
    }

    #[test]
    fn remove_node_with_one_child_promotes_it() {
        let mut tree = AvlTree::new();
        for v in [5, 3, 8, 2] {
            tree.insert(v);
        }

        assert_eq!(tree.remove(&3), Some(3));
        assert_eq!(tree.in_order(), vec![2, 5, 8]);
        assert_avl(&tree);
    }

    #[test]
    fn remove_node_with_two_children_swaps_in_the_successor() {
        let mut tree = AvlTree::new();
        for v in [5, 3, 8, 7, 9] {
            tree.insert(v);
        }

        assert_eq!(tree.remove(&5), Some(5));
        // The in-order successor of 5 takes over the root
        assert_eq!(tree.root.as_ref().unwrap().value, 7);
        assert_eq!(tree.in_order(), vec![3, 7, 8, 9]);
        assert_avl(&tree);
    }

    #[test]
    fn removal_rebalances_the_survivors() {
        let mut tree = AvlTree::new();
        for v in [2, 1, 3, 4] {
            tree.insert(v);
        }

        assert_eq!(tree.remove(&1), Some(1));
        assert_eq!(tree.root.as_ref().unwrap().value, 3);
        assert_eq!(tree.height(), 2);
        assert_avl(&tree);
    }

    #[test]
    fn remove_only_node_empties_the_tree() {
        let mut tree = AvlTree::new();
        tree.insert(1);

        assert_eq!(tree.remove(&1), Some(1));
        assert!(tree.root.is_none());
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn remove_missing_leaves_the_tree_alone() {
        let mut tree = AvlTree::new();
        for v in [5, 3, 8] {
            tree.insert(v);
        }

        assert_eq!(tree.remove(&6), None);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.in_order(), vec![3, 5, 8]);
    }

    #[test]
    fn stays_balanced_under_modular_churn() {
        let mut tree = AvlTree::new();
        for i in 0..500u32 {
            tree.insert((i * 37) % 1000);
        }
        assert_eq!(tree.len(), 500);
        assert_avl(&tree);

        for i in 0..250u32 {
            assert!(tree.remove(&((i * 37) % 1000)).is_some());
        }
        assert_eq!(tree.len(), 250);
        assert_avl(&tree);
    }

    #[test]
    fn randomized_ops_agree_with_btreeset() {
        use rand::prelude::*;
        use std::collections::BTreeSet;

        let mut rng = StdRng::seed_from_u64(42);
        let mut tree = AvlTree::new();
        let mut reference = BTreeSet::new();

        for _ in 0..2000 {
            let value = rng.random_range(0..200u32);
            if rng.random_bool(0.4) {
                assert_eq!(tree.remove(&value).is_some(), reference.remove(&value));
            } else {
                assert_eq!(tree.insert(value).is_some(), !reference.insert(value));
            }
        }

        assert_eq!(tree.in_order(), reference.iter().copied().collect::<Vec<_>>());
        assert_avl(&tree);
    }

    #[test]
    fn height_stays_logarithmic_for_sequential_inserts() {
        let mut tree = AvlTree::new();
        for i in 0..1024u32 {
            tree.insert(i);
        }

        let bound = (1.4405 * ((tree.len() as f64) + 2.0).log2()) as i32;
        assert!(tree.height() <= bound);
        assert_avl(&tree);
    }

    #[test]
    fn clear_empties_and_tree_stays_usable() {
        let mut tree = AvlTree::new();
        tree.insert(1);
        tree.insert(2);
        tree.clear();

        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);

        tree.insert(3);
        assert_eq!(tree.in_order(), vec![3]);
    }

    #[test]
    fn test_debug() {
        let mut tree = AvlTree::new();
        tree.insert(2);
        tree.insert(1);
        assert_eq!(format!("{tree:?}"), "AvlTree { len: 2, height: 2 }");
    }
}
