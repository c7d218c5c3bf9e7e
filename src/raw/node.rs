use super::handle::Handle;

/// Which side of its parent a node hangs from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A node of the AVL tree.
///
/// Nodes never own their payload directly: `value` is a handle into the payload arena, which lets
/// the two-child deletion move payloads between nodes without moving the payloads themselves.
/// `parent` is a traversal aid only; ownership flows strictly from the arena.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    value: Handle,
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
    // A leaf has height 1; an absent child counts as 0.
    height: u8,
}

/// A stored element together with the node currently carrying it.
#[derive(Clone, Debug)]
pub(crate) struct Element<T> {
    pub(crate) item: T,
    pub(crate) node: Handle,
}

impl Node {
    pub(crate) const fn leaf(value: Handle, parent: Option<Handle>) -> Self {
        Self {
            value,
            parent,
            left: None,
            right: None,
            height: 1,
        }
    }

    #[inline]
    pub(crate) const fn value(&self) -> Handle {
        self.value
    }

    #[inline]
    pub(crate) fn set_value(&mut self, value: Handle) {
        self.value = value;
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Returns which side `child` hangs from, or `None` if it is not a child of this node.
    pub(crate) fn side_of(&self, child: Handle) -> Option<Side> {
        if self.left == Some(child) {
            Some(Side::Left)
        } else if self.right == Some(child) {
            Some(Side::Right)
        } else {
            None
        }
    }

    #[inline]
    pub(crate) const fn height(&self) -> u8 {
        self.height
    }

    #[inline]
    pub(crate) fn set_height(&mut self, height: u8) {
        self.height = height;
    }

    #[cfg(test)]
    pub(crate) const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}
