mod arena;
mod handle;
mod node;
mod raw_avl_tree;

pub(crate) use handle::Handle;
pub(crate) use raw_avl_tree::RawAvlTree;
