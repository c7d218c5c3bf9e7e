use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;

use crate::raw::{Handle, RawAvlTree};

mod capacity;

/// An ordered set based on a height-balanced (AVL) binary search tree.
///
/// Nodes live in an arena and keep a non-owning link to their parent, which gives O(1) amortized
/// in-order stepping in both directions without an explicit stack. Payloads live in a second arena,
/// so every element has a stable [`ItemRef`] for as long as it stays in the tree.
///
/// It is a logic error for an item to be modified in such a way that the item's ordering relative
/// to any other item, as determined by the [`Ord`] trait, changes while it is in the set. The
/// behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `AvlTree` that observed the logic error and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use guild_index::AvlTree;
///
/// let mut tree = AvlTree::new();
/// tree.insert(3).unwrap();
/// tree.insert(1).unwrap();
/// tree.insert(2).unwrap();
///
/// assert!(tree.insert(2).is_err());
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
/// assert_eq!(tree.iter().rev().copied().collect::<Vec<_>>(), [3, 2, 1]);
/// ```
pub struct AvlTree<T> {
    raw: RawAvlTree<T>,
}

/// A weak reference to an element stored in an [`AvlTree`].
///
/// An `ItemRef` survives every rebalancing and every removal of *other* elements. Once its own
/// element is removed (or the tree is cleared, or rebuilt by [`AvlTree::append`]) it no longer
/// resolves. An `ItemRef` is only meaningful for the tree that issued it, or a clone of that tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ItemRef(Handle);

/// An iterator over the items of an `AvlTree`, in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`AvlTree`].
///
/// [`iter`]: AvlTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    raw: &'a RawAvlTree<T>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<T> AvlTree<T> {
    /// Makes a new, empty `AvlTree`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use guild_index::AvlTree;
    ///
    /// let tree: AvlTree<i32> = AvlTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        AvlTree { raw: RawAvlTree::new() }
    }

    /// Returns the number of elements in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the height of the tree: 0 when empty, 1 for a single element.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Clears the tree, removing all elements. Outstanding [`ItemRef`]s stop resolving.
    ///
    /// # Examples
    ///
    /// ```
    /// use guild_index::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// let item = tree.insert(1).unwrap();
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.resolve(item), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the element `item` refers to, or `None` if it has been removed.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn resolve(&self, item: ItemRef) -> Option<&T> {
        self.raw.try_item(item.0)
    }

    /// Returns a mutable reference to the element `item` refers to.
    ///
    /// Mutating the parts of the element that participate in its ordering is a logic error.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn resolve_mut(&mut self, item: ItemRef) -> Option<&mut T> {
        self.raw.try_item_mut(item.0)
    }

    /// Returns the smallest element.
    ///
    /// # Examples
    ///
    /// ```
    /// use guild_index::AvlTree;
    ///
    /// let tree: AvlTree<_> = [4, 2, 9].into_iter().collect();
    /// assert_eq!(tree.first(), Some(&2));
    /// assert_eq!(tree.last(), Some(&9));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.raw.first_node().map(|node| self.raw.item_at(node))
    }

    /// Returns the largest element.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.raw.last_node().map(|node| self.raw.item_at(node))
    }

    /// Returns a reference to the smallest element.
    #[must_use]
    pub fn first_item(&self) -> Option<ItemRef> {
        self.raw.first_node().map(|node| ItemRef(self.raw.value_at(node)))
    }

    /// Returns a reference to the largest element.
    #[must_use]
    pub fn last_item(&self) -> Option<ItemRef> {
        self.raw.last_node().map(|node| ItemRef(self.raw.value_at(node)))
    }

    /// Returns the in-order successor of `item`, or `None` if `item` is the largest element or
    /// no longer resolves.
    ///
    /// # Examples
    ///
    /// ```
    /// use guild_index::AvlTree;
    ///
    /// let tree: AvlTree<_> = [10, 20, 30].into_iter().collect();
    /// let first = tree.first_item().unwrap();
    /// let second = tree.successor(first).unwrap();
    /// assert_eq!(tree.resolve(second), Some(&20));
    /// assert_eq!(tree.predecessor(second), Some(first));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) worst case, O(1) amortized over a full walk.
    #[must_use]
    pub fn successor(&self, item: ItemRef) -> Option<ItemRef> {
        let node = self.raw.node_of(item.0)?;
        self.raw.next_node(node).map(|next| ItemRef(self.raw.value_at(next)))
    }

    /// Returns the in-order predecessor of `item`.
    ///
    /// # Complexity
    ///
    /// O(log n) worst case, O(1) amortized over a full walk.
    #[must_use]
    pub fn predecessor(&self, item: ItemRef) -> Option<ItemRef> {
        let node = self.raw.node_of(item.0)?;
        self.raw.prev_node(node).map(|prev| ItemRef(self.raw.value_at(prev)))
    }

    /// Removes the element `item` refers to, if it is still present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove_item(&mut self, item: ItemRef) -> Option<T> {
        self.raw.remove_value(item.0)
    }

    /// Gets an iterator that visits the elements in ascending order. Reverse it for descending
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use guild_index::AvlTree;
    ///
    /// let tree: AvlTree<_> = [3, 1, 2].into_iter().collect();
    /// let mut iter = tree.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next_back(), Some(&3));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            raw: &self.raw,
            front: self.raw.first_node(),
            back: self.raw.last_node(),
            remaining: self.raw.len(),
        }
    }

    /// Consumes the tree and returns its elements in ascending order.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn into_sorted_vec(self) -> Vec<T> {
        self.raw.into_sorted_vec()
    }
}

impl<T: Ord> AvlTree<T> {
    /// Adds a value to the tree.
    ///
    /// Returns a reference to the new element, or hands `value` back unchanged if the tree
    /// already contained an equal element.
    ///
    /// # Examples
    ///
    /// ```
    /// use guild_index::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// let item = tree.insert(7).unwrap();
    /// assert_eq!(tree.resolve(item), Some(&7));
    /// assert_eq!(tree.insert(7), Err(7));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, value: T) -> Result<ItemRef, T> {
        self.raw.insert(value).map(ItemRef)
    }

    /// Removes the element equal to `key` and returns it.
    ///
    /// The key may be any borrowed form of the element type, but the ordering on the borrowed
    /// form *must* match the ordering on the element type.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key)
    }

    /// Returns a reference to the element equal to `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).map(|node| self.raw.item_at(node))
    }

    /// Returns a mutable reference to the element equal to `key`.
    ///
    /// Mutating the parts of the element that participate in its ordering is a logic error.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let node = self.raw.search(key)?;
        Some(self.raw.item_at_mut(node))
    }

    /// Returns a reference to the element equal to `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn find<Q>(&self, key: &Q) -> Option<ItemRef>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).map(|node| ItemRef(self.raw.value_at(node)))
    }

    /// Returns `true` if the tree contains an element equal to `key`.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).is_some()
    }

    /// Builds a tree of minimum height from strictly ascending values.
    ///
    /// The middle value of every range becomes the root of its subtree, so the result has height
    /// ⌈log₂(n + 1)⌉ and no rotation is ever performed.
    ///
    /// Passing values that are not strictly ascending is a logic error; debug builds panic.
    ///
    /// # Examples
    ///
    /// ```
    /// use guild_index::AvlTree;
    ///
    /// let tree = AvlTree::from_sorted((1..=7).collect());
    /// assert_eq!(tree.len(), 7);
    /// assert_eq!(tree.height(), 3);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn from_sorted(values: Vec<T>) -> Self {
        AvlTree {
            raw: RawAvlTree::from_sorted(values),
        }
    }

    /// Moves all elements from `other` into `self`, leaving `other` empty.
    ///
    /// If an element of `other` is equal to one already in `self`, the one from `other` is kept.
    /// The result is rebuilt with minimum height, so [`ItemRef`]s into either tree stop resolving.
    ///
    /// # Examples
    ///
    /// ```
    /// use guild_index::AvlTree;
    ///
    /// let mut a: AvlTree<_> = [1, 3, 5].into_iter().collect();
    /// let mut b: AvlTree<_> = [2, 4].into_iter().collect();
    /// a.append(&mut b);
    ///
    /// assert!(b.is_empty());
    /// assert_eq!(a.into_sorted_vec(), [1, 2, 3, 4, 5]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n + m)
    pub fn append(&mut self, other: &mut Self) {
        self.raw.append(&mut other.raw);
    }
}

impl<T: Clone> Clone for AvlTree<T> {
    fn clone(&self) -> Self {
        AvlTree { raw: self.raw.clone() }
    }

    fn clone_from(&mut self, source: &Self) {
        self.raw.clone_from(&source.raw);
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        AvlTree::new()
    }
}

impl<T: PartialEq> PartialEq for AvlTree<T> {
    fn eq(&self, other: &AvlTree<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for AvlTree<T> {}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    /// Collects values into a tree. Later duplicates are discarded.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            // Duplicates are dropped.
            let _ = self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front?;
        self.remaining -= 1;
        self.front = self.raw.next_node(node);
        Some(self.raw.item_at(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back?;
        self.remaining -= 1;
        self.back = self.raw.prev_node(node);
        Some(self.raw.item_at(node))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

#[cfg(test)]
impl<T: Ord + fmt::Debug> AvlTree<T> {
    pub(crate) fn validate_invariants(&self) {
        self.raw.validate_invariants();
    }
}
