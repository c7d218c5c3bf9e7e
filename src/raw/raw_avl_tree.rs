use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Element, Node, Side};

/// The core AVL tree backing `AvlTree`.
pub(crate) struct RawAvlTree<T> {
    /// Arena storing the tree shape.
    nodes: Arena<Node>,
    /// Arena storing payloads. A payload keeps its handle for as long as it is in the tree.
    values: Arena<Element<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Number of elements in the tree.
    len: usize,
}

impl<T> RawAvlTree<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            values: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates a new tree with room for `capacity` elements.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            values: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.values.capacity()
    }

    /// Height of the whole tree; 0 when empty.
    pub(crate) fn height(&self) -> usize {
        usize::from(self.height_of(self.root))
    }

    /// Drops every element. Handles issued before the clear no longer resolve.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.values.clear();
        self.root = None;
        self.len = 0;
    }

    /// Returns the payload behind `value`, or `None` if it has been removed.
    pub(crate) fn try_item(&self, value: Handle) -> Option<&T> {
        self.values.try_get(value).map(|element| &element.item)
    }

    pub(crate) fn try_item_mut(&mut self, value: Handle) -> Option<&mut T> {
        self.values.try_get_mut(value).map(|element| &mut element.item)
    }

    /// Returns the payload carried by `node`.
    #[inline]
    pub(crate) fn item_at(&self, node: Handle) -> &T {
        &self.values.get(self.nodes.get(node).value()).item
    }

    #[inline]
    pub(crate) fn item_at_mut(&mut self, node: Handle) -> &mut T {
        let value = self.nodes.get(node).value();
        &mut self.values.get_mut(value).item
    }

    /// Returns the payload handle carried by `node`.
    #[inline]
    pub(crate) fn value_at(&self, node: Handle) -> Handle {
        self.nodes.get(node).value()
    }

    /// Returns the node currently carrying `value`, or `None` if it has been removed.
    pub(crate) fn node_of(&self, value: Handle) -> Option<Handle> {
        self.values.try_get(value).map(|element| element.node)
    }

    pub(crate) fn first_node(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, Side::Left))
    }

    pub(crate) fn last_node(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, Side::Right))
    }

    /// In-order successor of `node`.
    pub(crate) fn next_node(&self, node: Handle) -> Option<Handle> {
        self.neighbor(node, Side::Right)
    }

    /// In-order predecessor of `node`.
    pub(crate) fn prev_node(&self, node: Handle) -> Option<Handle> {
        self.neighbor(node, Side::Left)
    }

    /// Consumes the tree, returning its elements in ascending order.
    pub(crate) fn into_sorted_vec(mut self) -> Vec<T> {
        let mut order = Vec::with_capacity(self.len);
        let mut current = self.first_node();
        while let Some(node) = current {
            order.push(self.nodes.get(node).value());
            current = self.next_node(node);
        }

        order.into_iter().map(|value| self.values.take(value).item).collect()
    }

    /// Removes the element carried by `value`, if it is still present.
    pub(crate) fn remove_value(&mut self, value: Handle) -> Option<T> {
        let node = self.node_of(value)?;
        Some(self.remove_node(node))
    }

    /// Unlinks `node` and returns its payload.
    pub(crate) fn remove_node(&mut self, node: Handle) -> T {
        let mut target = node;
        let (left, right) = {
            let n = self.nodes.get(node);
            (n.left(), n.right())
        };
        if let (Some(_), Some(right)) = (left, right) {
            // Two children: trade payloads with the in-order successor, which has no left child,
            // and unlink the successor's node instead.
            let successor = self.extreme(right, Side::Left);
            self.swap_values(node, successor);
            target = successor;
        }

        let (parent, child) = {
            let n = self.nodes.get(target);
            (n.parent(), n.left().or(n.right()))
        };
        self.replace_child(parent, target, child);

        let removed = self.nodes.take(target);
        let element = self.values.take(removed.value());
        self.len -= 1;
        self.retrace(parent);
        element.item
    }

    /// Walks from `node` to the extreme end of its subtree on `side`.
    fn extreme(&self, mut node: Handle, side: Side) -> Handle {
        while let Some(child) = self.nodes.get(node).child(side) {
            node = child;
        }
        node
    }

    /// In-order neighbour of `node` in direction `side`.
    fn neighbor(&self, node: Handle, side: Side) -> Option<Handle> {
        if let Some(child) = self.nodes.get(node).child(side) {
            return Some(self.extreme(child, side.opposite()));
        }

        let mut child = node;
        let mut parent = self.nodes.get(node).parent();
        while let Some(p) = parent {
            if self.nodes.get(p).child(side) != Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.nodes.get(p).parent();
        }
        None
    }

    /// Allocates a detached leaf carrying `item`.
    fn alloc_node(&mut self, item: T, parent: Option<Handle>) -> Handle {
        let node = self.nodes.next_handle();
        let value = self.values.alloc(Element { item, node });
        let allocated = self.nodes.alloc(Node::leaf(value, parent));
        debug_assert_eq!(allocated, node, "`RawAvlTree::alloc_node()` - handle prediction failed!");
        node
    }

    fn swap_values(&mut self, a: Handle, b: Handle) {
        let value_a = self.nodes.get(a).value();
        let value_b = self.nodes.get(b).value();
        self.nodes.get_mut(a).set_value(value_b);
        self.nodes.get_mut(b).set_value(value_a);
        self.values.get_mut(value_a).node = b;
        self.values.get_mut(value_b).node = a;
    }

    /// Points the slot in `parent` that held `old` at `new` and fixes `new`'s parent link.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let side = self.nodes.get(p).side_of(old).expect("`RawAvlTree::replace_child()` - broken parent link!");
                self.nodes.get_mut(p).set_child(side, new);
            }
        }
        if let Some(new) = new {
            self.nodes.get_mut(new).set_parent(parent);
        }
    }

    fn attach(&mut self, node: Handle, side: Side, child: Option<Handle>) {
        self.nodes.get_mut(node).set_child(side, child);
        if let Some(child) = child {
            self.nodes.get_mut(child).set_parent(Some(node));
        }
    }

    #[inline]
    fn height_of(&self, node: Option<Handle>) -> u8 {
        node.map_or(0, |node| self.nodes.get(node).height())
    }

    fn update_height(&mut self, node: Handle) {
        let (left, right) = {
            let n = self.nodes.get(node);
            (n.left(), n.right())
        };
        let height = self.height_of(left).max(self.height_of(right)) + 1;
        self.nodes.get_mut(node).set_height(height);
    }

    /// Left height minus right height.
    fn balance(&self, node: Handle) -> i16 {
        let n = self.nodes.get(node);
        i16::from(self.height_of(n.left())) - i16::from(self.height_of(n.right()))
    }

    /// Lifts the `side` child of `node` into `node`'s position and returns it.
    ///
    /// `rotate(n, Side::Left)` is the classic right rotation used for the outer-left case.
    fn rotate(&mut self, node: Handle, side: Side) -> Handle {
        let opposite = side.opposite();
        let pivot = self.nodes.get(node).child(side).expect("`RawAvlTree::rotate()` - missing pivot!");
        let parent = self.nodes.get(node).parent();
        let inner = self.nodes.get(pivot).child(opposite);

        self.attach(node, side, inner);
        self.replace_child(parent, node, Some(pivot));
        self.attach(pivot, opposite, Some(node));

        self.update_height(node);
        self.update_height(pivot);
        pivot
    }

    /// Restores the AVL balance at `node`, returning the root of the (possibly rotated) subtree.
    fn rebalance(&mut self, node: Handle) -> Handle {
        let balance = self.balance(node);
        let heavy = if balance > 1 {
            Side::Left
        } else if balance < -1 {
            Side::Right
        } else {
            return node;
        };

        let child = self.nodes.get(node).child(heavy).expect("`RawAvlTree::rebalance()` - heavy side is empty!");
        let child_balance = self.balance(child);
        let inner_heavy = match heavy {
            Side::Left => child_balance < 0,
            Side::Right => child_balance > 0,
        };
        if inner_heavy {
            // Left-right or right-left: straighten the child first.
            self.rotate(child, heavy.opposite());
        }
        self.rotate(node, heavy)
    }

    /// Recomputes heights and rebalances from `from` up to the root.
    fn retrace(&mut self, from: Option<Handle>) {
        let mut current = from;
        while let Some(node) = current {
            self.update_height(node);
            let subtree = self.rebalance(node);
            current = self.nodes.get(subtree).parent();
        }
    }

    /// Builds a minimum-height subtree from the next `count` items, returning its root.
    fn build<I: Iterator<Item = T>>(&mut self, items: &mut I, count: usize) -> Option<Handle> {
        if count == 0 {
            return None;
        }

        let left_count = (count - 1) / 2;
        let left = self.build(items, left_count);
        let item = items.next().expect("`RawAvlTree::build()` - ran out of items!");
        let node = self.alloc_node(item, None);
        let right = self.build(items, count - left_count - 1);

        self.attach(node, Side::Left, left);
        self.attach(node, Side::Right, right);
        self.update_height(node);
        Some(node)
    }
}

impl<T: Ord> RawAvlTree<T> {
    /// Returns the node carrying an element equal to `key`.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(node) = current {
            let n = self.nodes.get(node);
            current = match key.cmp(self.values.get(n.value()).item.borrow()) {
                Ordering::Less => n.left(),
                Ordering::Greater => n.right(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Inserts `item`, returning the handle of its payload.
    ///
    /// If an equal element is already present the tree is left untouched and `item` is handed back.
    pub(crate) fn insert(&mut self, item: T) -> Result<Handle, T> {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;
        while let Some(node) = current {
            side = match item.cmp(self.item_at(node)) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Err(item),
            };
            parent = Some(node);
            current = self.nodes.get(node).child(side);
        }

        let node = self.alloc_node(item, parent);
        match parent {
            None => self.root = Some(node),
            Some(p) => self.nodes.get_mut(p).set_child(side, Some(node)),
        }
        self.len += 1;
        self.retrace(parent);
        Ok(self.nodes.get(node).value())
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let node = self.search(key)?;
        Some(self.remove_node(node))
    }

    /// Builds a minimum-height tree from strictly ascending `items` in O(n), without rotations.
    pub(crate) fn from_sorted(items: Vec<T>) -> Self {
        debug_assert!(
            items.windows(2).all(|pair| pair[0] < pair[1]),
            "`RawAvlTree::from_sorted()` - items are not strictly ascending!"
        );

        let len = items.len();
        let mut tree = Self::with_capacity(len);
        let mut items = items.into_iter();
        tree.root = tree.build(&mut items, len);
        tree.len = len;
        tree
    }

    /// Moves every element of `other` into `self` in O(n + m), leaving `other` empty.
    ///
    /// When both trees hold equal elements the one from `other` is kept.
    pub(crate) fn append(&mut self, other: &mut Self) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            core::mem::swap(self, other);
            return;
        }

        let ours = core::mem::replace(self, Self::new()).into_sorted_vec();
        let theirs = core::mem::replace(other, Self::new()).into_sorted_vec();
        *self = Self::from_sorted(merge_sorted(ours, theirs));
    }
}

/// Linear merge of two strictly ascending sequences. On ties the element from `right` survives.
pub(crate) fn merge_sorted<T: Ord>(left: Vec<T>, right: Vec<T>) -> Vec<T> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let order = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => l.cmp(r),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => break,
        };
        match order {
            Ordering::Less => merged.extend(left.next()),
            Ordering::Greater => merged.extend(right.next()),
            Ordering::Equal => {
                left.next();
                merged.extend(right.next());
            }
        }
    }

    merged
}

impl<T: Clone> Clone for RawAvlTree<T> {
    fn clone(&self) -> Self {
        // Handles are positions in the arenas, so cloning both arenas reproduces the exact shape.
        Self {
            nodes: self.nodes.clone(),
            values: self.values.clone(),
            root: self.root,
            len: self.len,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.nodes.clone_from(&source.nodes);
        self.values.clone_from(&source.values);
        self.root = source.root;
        self.len = source.len;
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::manual_assert, clippy::uninlined_format_args, clippy::cast_possible_truncation)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;
    use core::fmt::Debug;
    use proptest::prelude::*;

    impl<T: Ord + Debug> RawAvlTree<T> {
        /// Validates every AVL invariant. Panics with a descriptive message if any are violated.
        pub(crate) fn validate_invariants(&self) {
            let mut errors: Vec<String> = Vec::new();

            if let Some(root) = self.root
                && self.nodes.get(root).parent().is_some()
            {
                errors.push(alloc::format!("root {:?} has a parent", root));
            }

            let mut in_order: Vec<&T> = Vec::new();
            let (_, count) = self.validate_node(self.root, None, &mut in_order, &mut errors);

            if count != self.len {
                errors.push(alloc::format!("len mismatch: self.len={}, reachable={}", self.len, count));
            }
            if self.nodes.len() != self.len || self.values.len() != self.len {
                errors.push(alloc::format!(
                    "arena leak: len={}, nodes={}, values={}",
                    self.len,
                    self.nodes.len(),
                    self.values.len()
                ));
            }
            for pair in in_order.windows(2) {
                if pair[0] >= pair[1] {
                    errors.push(alloc::format!("order violation: {:?} >= {:?}", pair[0], pair[1]));
                }
            }

            assert!(errors.is_empty(), "Tree invariant violations:\n{}", errors.join("\n"));
        }

        /// Returns (height, size) of the subtree, recomputed from scratch.
        fn validate_node<'a>(
            &'a self,
            node: Option<Handle>,
            parent: Option<Handle>,
            in_order: &mut Vec<&'a T>,
            errors: &mut Vec<String>,
        ) -> (u8, usize) {
            let Some(handle) = node else {
                return (0, 0);
            };
            let n = self.nodes.get(handle);

            if n.parent() != parent {
                errors.push(alloc::format!("node {:?}: parent {:?}, expected {:?}", handle, n.parent(), parent));
            }
            let element = self.values.get(n.value());
            if element.node != handle {
                errors.push(alloc::format!("node {:?}: payload points back at {:?}", handle, element.node));
            }

            let (left_height, left_size) = self.validate_node(n.left(), Some(handle), in_order, errors);
            in_order.push(&element.item);
            let (right_height, right_size) = self.validate_node(n.right(), Some(handle), in_order, errors);

            let height = left_height.max(right_height) + 1;
            if n.height() != height {
                errors.push(alloc::format!("node {:?}: stored height {}, actual {}", handle, n.height(), height));
            }
            if left_height.abs_diff(right_height) > 1 {
                errors.push(alloc::format!("node {:?}: unbalanced ({} vs {})", handle, left_height, right_height));
            }

            (height, left_size + right_size + 1)
        }

        fn collect(&self) -> Vec<&T> {
            let mut out = Vec::new();
            let mut current = self.first_node();
            while let Some(node) = current {
                out.push(self.item_at(node));
                current = self.next_node(node);
            }
            out
        }
    }

    /// Smallest height any binary tree with `n` nodes can have.
    fn min_height(n: usize) -> usize {
        (usize::BITS - n.leading_zeros()) as usize
    }

    #[test]
    fn empty_tree() {
        let tree: RawAvlTree<i32> = RawAvlTree::new();
        tree.validate_invariants();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.first_node(), None);
        assert_eq!(tree.last_node(), None);
        assert_eq!(tree.search(&1), None);
    }

    #[test]
    fn duplicate_insert_hands_item_back() {
        let mut tree = RawAvlTree::new();
        assert!(tree.insert(5).is_ok());
        assert_eq!(tree.insert(5), Err(5));
        assert_eq!(tree.len(), 1);
        tree.validate_invariants();
    }

    #[test]
    fn single_and_double_rotations() {
        // Outer-right, outer-left, right-left and left-right shapes in turn.
        for keys in [[1, 2, 3], [3, 2, 1], [1, 3, 2], [3, 1, 2]] {
            let mut tree = RawAvlTree::new();
            for key in keys {
                tree.insert(key).unwrap();
                tree.validate_invariants();
            }
            assert_eq!(tree.height(), 2, "keys {:?}", keys);
            let root = tree.root.unwrap();
            assert_eq!(*tree.item_at(root), 2, "keys {:?}", keys);
        }
    }

    #[test]
    fn ascending_inserts_stay_logarithmic() {
        let mut tree = RawAvlTree::new();
        for key in 0..1024 {
            tree.insert(key).unwrap();
        }
        tree.validate_invariants();
        // AVL height bound: < 1.45 * log2(n + 2).
        assert!(tree.height() <= 15, "height {}", tree.height());
    }

    #[test]
    fn two_child_removal_keeps_payload_handles() {
        let mut tree = RawAvlTree::new();
        let handles: Vec<Handle> = [50, 30, 70, 20, 40, 60, 80].iter().map(|&k| tree.insert(k).unwrap()).collect();

        // 50 is the root with two children; its successor 60 changes node.
        assert_eq!(tree.remove(&50), Some(50));
        tree.validate_invariants();

        assert_eq!(tree.try_item(handles[0]), None);
        for (&key, &handle) in [30, 70, 20, 40, 60, 80].iter().zip(&handles[1..]) {
            assert_eq!(tree.try_item(handle), Some(&key));
        }
        assert_eq!(tree.collect(), vec![&20, &30, &40, &60, &70, &80]);
    }

    #[test]
    fn neighbors_walk_in_order() {
        let mut tree = RawAvlTree::new();
        for key in [8, 4, 12, 2, 6, 10, 14, 1, 3, 5, 7] {
            tree.insert(key).unwrap();
        }

        let mut forward = Vec::new();
        let mut current = tree.first_node();
        while let Some(node) = current {
            forward.push(*tree.item_at(node));
            current = tree.next_node(node);
        }
        let mut backward = Vec::new();
        let mut current = tree.last_node();
        while let Some(node) = current {
            backward.push(*tree.item_at(node));
            current = tree.prev_node(node);
        }

        assert_eq!(forward, vec![1, 2, 3, 4, 5, 6, 7, 8, 10, 12, 14]);
        backward.reverse();
        assert_eq!(backward, forward);
    }

    #[test]
    fn from_sorted_has_minimum_height() {
        for n in [0usize, 1, 2, 3, 4, 7, 8, 15, 16, 100, 1000] {
            let tree = RawAvlTree::from_sorted((0..n).collect());
            tree.validate_invariants();
            assert_eq!(tree.len(), n);
            assert_eq!(tree.height(), min_height(n), "n = {}", n);
        }
    }

    #[test]
    fn from_sorted_tree_accepts_mutations() {
        let mut tree = RawAvlTree::from_sorted((0..64).map(|k| k * 2).collect());
        for key in (0..64).map(|k| k * 2 + 1) {
            tree.insert(key).unwrap();
            tree.validate_invariants();
        }
        for key in (0..128).step_by(3) {
            tree.remove(&key).unwrap();
            tree.validate_invariants();
        }
    }

    #[test]
    fn merge_sorted_prefers_right_on_ties() {
        let merged = merge_sorted(vec![(1, 'l'), (3, 'l'), (5, 'l')], vec![(2, 'r'), (3, 'r'), (6, 'r')]);
        // Tuples compare on both fields, so (3, 'l') and (3, 'r') are distinct here.
        assert_eq!(merged, vec![(1, 'l'), (2, 'r'), (3, 'l'), (3, 'r'), (5, 'l'), (6, 'r')]);

        assert_eq!(merge_sorted(vec![1, 4, 9], vec![4, 5]), vec![1, 4, 5, 9]);
        assert_eq!(merge_sorted(Vec::<i32>::new(), vec![2]), vec![2]);
    }

    #[test]
    fn append_merges_and_empties_other() {
        let mut left = RawAvlTree::from_sorted(vec![1, 3, 5, 7]);
        let mut right = RawAvlTree::from_sorted(vec![2, 3, 8]);
        left.append(&mut right);

        left.validate_invariants();
        right.validate_invariants();
        assert!(right.is_empty());
        assert_eq!(left.collect(), vec![&1, &2, &3, &5, &7, &8]);
        assert_eq!(left.height(), min_height(6));
    }

    #[test]
    fn clone_is_independent() {
        let mut original = RawAvlTree::from_sorted((0..32).collect());
        let copy = original.clone();
        for key in 0..16 {
            original.remove(&key);
        }
        original.validate_invariants();
        copy.validate_invariants();
        assert_eq!(copy.len(), 32);
        assert_eq!(original.len(), 16);

        let mut target = RawAvlTree::from_sorted(vec![100, 200]);
        target.clone_from(&copy);
        target.validate_invariants();
        assert_eq!(target.collect(), copy.collect());
    }

    #[test]
    fn clear_then_reuse() {
        let mut tree = RawAvlTree::from_sorted((0..10).collect());
        let stale = tree.value_at(tree.first_node().unwrap());
        tree.clear();
        tree.validate_invariants();
        assert_eq!(tree.try_item(stale), None);

        tree.insert(42).unwrap();
        tree.validate_invariants();
        assert_eq!(tree.try_item(stale), None);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(i32),
        Remove(i32),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0i32..500).prop_map(Op::Insert),
            2 => (0i32..500).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn tree_invariants_maintained_after_operations(ops in prop::collection::vec(op_strategy(), 0..400)) {
            let mut tree: RawAvlTree<i32> = RawAvlTree::new();
            let mut model = alloc::collections::BTreeSet::new();

            for op in ops {
                match op {
                    Op::Insert(key) => {
                        prop_assert_eq!(tree.insert(key).is_ok(), model.insert(key));
                    }
                    Op::Remove(key) => {
                        prop_assert_eq!(tree.remove(&key), model.take(&key));
                    }
                }
                tree.validate_invariants();
            }

            let expected: Vec<&i32> = model.iter().collect();
            prop_assert_eq!(tree.collect(), expected);
        }

        #[test]
        fn payload_handles_survive_unrelated_removals(keys in prop::collection::btree_set(0i32..1000, 1..200), cut in any::<prop::sample::Index>()) {
            let keys: Vec<i32> = keys.into_iter().collect();
            let mut tree = RawAvlTree::new();
            let handles: Vec<Handle> = keys.iter().map(|&k| tree.insert(k).unwrap()).collect();

            let cut = cut.index(keys.len());
            for key in &keys[..cut] {
                tree.remove(key);
            }
            tree.validate_invariants();

            for (i, (&key, &handle)) in keys.iter().zip(&handles).enumerate() {
                let expected = if i < cut { None } else { Some(&key) };
                prop_assert_eq!(tree.try_item(handle), expected);
            }
        }
    }
}
