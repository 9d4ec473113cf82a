use std::fmt;

/// Color tag carried by every node, the sentinel is always black.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// Handle to a node inside a [RbTree][crate::RbTree].
///
/// Handles are cheap to copy and remain valid until the node is deleted.
/// Once deleted, the slot may be reused by a later insert, but the handle's
/// generation will not match and the tree shall reject it. Handles also
/// carry the id of the tree that issued them, a handle passed to another
/// tree is rejected the same way.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct NodeId {
    pub(crate) arena: u32,
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    /// Handle to the sentinel, never returned to callers.
    pub(crate) const NIL: NodeId = NodeId {
        arena: 0,
        index: 0,
        generation: 0,
    };

    #[inline]
    pub(crate) fn is_nil(&self) -> bool {
        self.index == 0
    }

    #[inline]
    pub(crate) fn to_index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NodeId<{}:{}@{}>", self.arena, self.index, self.generation)
    }
}

/// Node corresponds to a single key in RbTree instance.
///
/// `parent`, `left` and `right` of the sentinel are scratch space, written
/// by transplant during delete, never read outside an in-progress delete.
#[derive(Clone)]
pub(crate) struct Node<K> {
    pub(crate) key: Option<K>, // None only for sentinel
    pub(crate) color: Color,
    pub(crate) size: usize, // store: count of nodes in this sub-tree
    pub(crate) parent: NodeId,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
}

impl<K> Node<K> {
    pub(crate) fn new(key: K) -> Node<K> {
        Node {
            key: Some(key),
            color: Color::Red,
            size: 1,
            parent: NodeId::NIL,
            left: NodeId::NIL,
            right: NodeId::NIL,
        }
    }

    pub(crate) fn new_sentinel() -> Node<K> {
        Node {
            key: None,
            color: Color::Black,
            size: 0,
            parent: NodeId::NIL,
            left: NodeId::NIL,
            right: NodeId::NIL,
        }
    }

    #[inline]
    pub(crate) fn as_key(&self) -> &K {
        match self.key.as_ref() {
            Some(key) => key,
            None => panic!("as_key(): sentinel has no key, call the programmer"),
        }
    }

    #[inline]
    pub(crate) fn is_black(&self) -> bool {
        self.color == Color::Black
    }

    #[inline]
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    #[inline]
    pub(crate) fn set_red(&mut self) {
        self.color = Color::Red
    }

    #[inline]
    pub(crate) fn set_black(&mut self) {
        self.color = Color::Black
    }

    #[allow(dead_code)]
    #[cfg(test)]
    pub(crate) fn to_tag(&self) -> &'static str {
        match self.color {
            Color::Black => "(b)",
            Color::Red => "(r)",
        }
    }
}
