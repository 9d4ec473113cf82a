//! Module provide order statistics tree implemented by [RbTree] type.
//!
//! RbTree is a parent linked [red-black][wiki-rbt] tree, every node is
//! additionally augmented with the size of the sub-tree rooted at that node.
//!
//! - All nodes are held by an arena, links between nodes are handles.
//! - A single sentinel node, black in color and of size ZERO, stands for
//!   every missing child and for the parent of root.
//! - Insert, delete, search, rank and select are O(log n).
//! - Keys that compare equal are stored as separate nodes, insert places
//!   a duplicate key to the right of its twin.
//! - No Durability guarantee.
//! - Not thread safe.
//!
//! Constructing a new [RbTree] instance and querying it:
//!
//! ```
//! use osrb::RbTree;
//!
//! let mut tree: RbTree<u32> = RbTree::new();
//! tree.insert(26);
//! tree.insert(17);
//! let node = tree.insert(41);
//!
//! assert_eq!(tree.len(), 3);
//! assert_eq!(tree.rank(node).unwrap(), 3);
//!
//! let node = tree.select(2).unwrap();
//! assert_eq!(tree.key(node), Some(&26));
//! ```
//!
//! [wiki-rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

use log::{debug, trace};
use rand::Rng;

use std::{
    borrow::Borrow,
    cmp::{Ord, Ordering},
    fmt,
    iter::FromIterator,
};

use crate::{
    arena::Arena,
    iter::{self, Iter},
    node::{Color, Node, NodeId},
    Error, Result,
};

/// RbTree manage a single instance of in-memory order statistics tree
/// using [red-black][rbt] tree.
///
/// [rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
pub struct RbTree<K> {
    pub(crate) nodes: Arena<Node<K>>,
    pub(crate) root: NodeId,
}

/// Statistics gathered by [RbTree::validate].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// Number of nodes in the tree.
    pub n_count: usize,
    /// Number of black nodes from root down to any leaf, root included.
    pub n_blacks: usize,
    /// Number of nodes on the longest root-to-leaf path.
    pub max_depth: usize,
}

impl<K> Default for RbTree<K> {
    fn default() -> RbTree<K> {
        RbTree::new()
    }
}

impl<K> RbTree<K> {
    /// Create an empty instance of RbTree.
    pub fn new() -> RbTree<K> {
        RbTree {
            nodes: Arena::new(Node::new_sentinel()),
            root: NodeId::NIL,
        }
    }
}

/// Maintenance API.
impl<K> RbTree<K> {
    /// Return number of keys in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes[self.root].size
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_nil()
    }

    /// Return the root node, None if tree is empty.
    pub fn root(&self) -> Option<NodeId> {
        self.to_handle(self.root)
    }

    /// Drop all the keys in this instance. Handles issued so far become
    /// stale.
    pub fn clear(&mut self) {
        debug!("clear {} nodes", self.len());
        self.nodes.clear();
        self.root = NodeId::NIL;
        self.reset_sentinel();
    }

    /// Return the key held by `node`, None if `node` is stale.
    pub fn key(&self, node: NodeId) -> Option<&K> {
        self.nodes.get(node).and_then(|n| n.key.as_ref())
    }

    /// Return the color of `node`, None if `node` is stale.
    pub fn color(&self, node: NodeId) -> Option<Color> {
        self.live(node).map(|n| n.color)
    }

    /// Return number of nodes in the sub-tree rooted at `node`, including
    /// itself. None if `node` is stale.
    pub fn subtree_size(&self, node: NodeId) -> Option<usize> {
        self.live(node).map(|n| n.size)
    }

    /// Return number of nodes on the longest path from root to a leaf.
    /// An empty tree has height ZERO.
    pub fn height(&self) -> usize {
        self.height_from(self.root)
    }

    /// Return number of edges from root to `node`. None if `node` is stale.
    pub fn depth(&self, node: NodeId) -> Option<usize> {
        self.live(node)?;
        let (mut x, mut depth) = (node, 0);
        while x != self.root {
            x = self.nodes[x].parent;
            if x.is_nil() {
                return None;
            }
            depth += 1;
        }
        Some(depth)
    }

    /// Return number of black nodes on any path from root to a leaf,
    /// excluding the root and counting the sentinel leaf.
    pub fn black_height(&self) -> usize {
        if self.root.is_nil() {
            return 0;
        }
        let (mut x, mut n_blacks) = (self.nodes[self.root].left, 1);
        while !x.is_nil() {
            if self.nodes[x].is_black() {
                n_blacks += 1;
            }
            x = self.nodes[x].left;
        }
        n_blacks
    }

    /// Validate RbTree with following rules:
    ///
    /// * Sentinel is black in color and of size ZERO.
    /// * Root node is always black in color.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks should be same under left child and right child.
    /// * Size of every node is one plus the size of its children.
    /// * Child nodes point back to their parent.
    /// * Make sure keys are in sorted order.
    ///
    /// Additionally return statistics on the tree, refer to [Stats].
    pub fn validate(&self) -> Result<Stats>
    where
        K: Ord + fmt::Debug,
    {
        let sentinel = &self.nodes[NodeId::NIL];
        if !sentinel.is_black() || sentinel.size != 0 {
            err_at!(Fatal, msg: "sentinel {:?} size:{}", sentinel.color, sentinel.size)?;
        }

        if !self.root.is_nil() {
            let root = &self.nodes[self.root];
            if root.is_red() {
                err_at!(Fatal, msg: "root node must be black")?;
            }
            if !root.parent.is_nil() {
                err_at!(Fatal, msg: "root has parent {:?}", root.parent)?;
            }
        }

        let stats = self.validate_tree(self.root, false, Stats::default(), 1)?;

        if stats.n_count != self.len() || stats.n_count != self.nodes.len() {
            let (a, b) = (self.len(), self.nodes.len());
            err_at!(Fatal, msg: "count {} != len:{} arena:{}", stats.n_count, a, b)?;
        }

        let mut keys = self.iter();
        if let Some(mut prev) = keys.next() {
            for key in keys {
                if key.lt(prev) {
                    err_at!(Fatal, msg: "sort order {:?} after {:?}", key, prev)?;
                }
                prev = key;
            }
        }

        Ok(stats)
    }

    #[allow(dead_code)]
    #[cfg(test)]
    pub(crate) fn pretty_print(&self)
    where
        K: fmt::Debug,
    {
        self.pretty_print_node(self.root, "".to_string())
    }

    #[allow(dead_code)]
    #[cfg(test)]
    fn pretty_print_node(&self, x: NodeId, mut prefix: String)
    where
        K: fmt::Debug,
    {
        if x.is_nil() {
            return;
        }
        let node = &self.nodes[x];
        println!("{}{}<{:?}> size:{}", prefix, node.to_tag(), node.key, node.size);
        prefix.push_str("  ");
        self.pretty_print_node(node.left, prefix.clone());
        self.pretty_print_node(node.right, prefix);
    }
}

/// Read API.
impl<K> RbTree<K> {
    /// Search for a node holding `key`. If there are several nodes with
    /// equal keys, any one of them is returned.
    pub fn search<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut x = self.root;
        while !x.is_nil() {
            let node = &self.nodes[x];
            x = match node.as_key().borrow().cmp(key) {
                Ordering::Less => node.right,
                Ordering::Greater => node.left,
                Ordering::Equal => return Some(x),
            };
        }
        None
    }

    /// Return node with the smallest key in the sub-tree rooted at `node`.
    pub fn min(&self, node: NodeId) -> Option<NodeId> {
        self.live(node)?;
        Some(self.minimum(node))
    }

    /// Return node with the largest key in the sub-tree rooted at `node`.
    pub fn max(&self, node: NodeId) -> Option<NodeId> {
        self.live(node)?;
        Some(self.maximum(node))
    }

    /// Return node with the smallest key in this tree.
    pub fn first(&self) -> Option<NodeId> {
        self.to_handle(self.minimum(self.root))
    }

    /// Return node with the largest key in this tree.
    pub fn last(&self) -> Option<NodeId> {
        self.to_handle(self.maximum(self.root))
    }

    /// Return the node that follows `node` in sorted order.
    pub fn successor(&self, node: NodeId) -> Option<NodeId> {
        self.live(node)?;
        let right = self.nodes[node].right;
        if !right.is_nil() {
            return Some(self.minimum(right));
        }
        let (mut x, mut y) = (node, self.nodes[node].parent);
        while !y.is_nil() && x == self.nodes[y].right {
            x = y;
            y = self.nodes[y].parent;
        }
        self.to_handle(y)
    }

    /// Return the node that precedes `node` in sorted order.
    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        self.live(node)?;
        let left = self.nodes[node].left;
        if !left.is_nil() {
            return Some(self.maximum(left));
        }
        let (mut x, mut y) = (node, self.nodes[node].parent);
        while !y.is_nil() && x == self.nodes[y].left {
            x = y;
            y = self.nodes[y].parent;
        }
        self.to_handle(y)
    }

    /// Return the 1-based position of `node` among all keys in sorted
    /// order. Fails with NotFound if `node` is not linked into this tree.
    pub fn rank(&self, node: NodeId) -> Result<usize> {
        if self.live(node).is_none() {
            return err_at!(NotFound, msg: "rank for {:?}", node);
        }

        let mut rank = self.nodes[self.nodes[node].left].size + 1;
        let mut x = node;
        while x != self.root {
            let parent = self.nodes[x].parent;
            if parent.is_nil() {
                return err_at!(NotFound, msg: "rank for {:?}, unreachable", node);
            }
            if x == self.nodes[parent].right {
                rank += self.nodes[self.nodes[parent].left].size + 1;
            }
            x = parent;
        }
        Ok(rank)
    }

    /// Return the 1-based rank of the node holding `key`, searched from
    /// root. None if key is missing.
    ///
    /// With duplicate keys this is the rank of the first equal node met on
    /// the search path, which need not be the smallest rank for that key.
    /// Use [RbTree::rank] on a handle to rank a specific node.
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (mut x, mut n_smaller) = (self.root, 0);
        while !x.is_nil() {
            let node = &self.nodes[x];
            let n_left = self.nodes[node.left].size;
            x = match node.as_key().borrow().cmp(key) {
                Ordering::Equal => return Some(n_smaller + n_left + 1),
                Ordering::Greater => node.left,
                Ordering::Less => {
                    n_smaller += n_left + 1;
                    node.right
                }
            };
        }
        None
    }

    /// Return the node holding the k-th smallest key, `rank` is 1-based.
    /// Fails with OutOfRange if rank is outside `[1, len]`.
    pub fn select(&self, rank: usize) -> Result<NodeId> {
        if rank == 0 || rank > self.len() {
            return err_at!(OutOfRange, msg: "select({}) len:{}", rank, self.len());
        }

        let (mut x, mut n_smaller) = (self.root, 0);
        while !x.is_nil() {
            let node = &self.nodes[x];
            let curr_rank = n_smaller + self.nodes[node.left].size + 1;
            x = match curr_rank.cmp(&rank) {
                Ordering::Equal => return Ok(x),
                Ordering::Greater => node.left,
                Ordering::Less => {
                    n_smaller = curr_rank;
                    node.right
                }
            };
        }
        err_at!(Fatal, msg: "select({}) missed, sub-tree sizes corrupted", rank)
    }

    /// Return a node picked uniformly at random, None if tree is empty.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Option<NodeId> {
        match self.len() {
            0 => None,
            n => self.select(rng.gen_range(1..=n)).ok(),
        }
    }

    /// Return an iterator over all keys in sorted order.
    pub fn iter(&self) -> Iter<K> {
        iter::Iter::new(self)
    }
}

/// Write API.
impl<K> RbTree<K> {
    /// Insert `key` into this tree and return a handle to its node. Equal
    /// keys are allowed, each insert adds a new node.
    pub fn insert(&mut self, key: K) -> NodeId
    where
        K: Ord,
    {
        let (mut parent, mut x, mut go_left) = (NodeId::NIL, self.root, false);
        while !x.is_nil() {
            parent = x;
            let node = &mut self.nodes[x];
            node.size += 1; // new node joins every sub-tree on the way down
            go_left = key.lt(node.as_key());
            x = if go_left { node.left } else { node.right };
        }

        let mut node = Node::new(key);
        node.parent = parent;
        let z = self.nodes.alloc(node);

        if parent.is_nil() {
            self.root = z;
        } else if go_left {
            self.nodes[parent].left = z;
        } else {
            self.nodes[parent].right = z;
        }

        self.insert_fixup(z);
        z
    }

    /// Delete `node` from this tree and return its key. Fails with
    /// NotFound, without touching the tree, if `node` is stale.
    pub fn delete(&mut self, node: NodeId) -> Result<K> {
        if self.live(node).is_none() {
            return err_at!(NotFound, msg: "delete for {:?}", node);
        }
        debug!("delete {:?}", node);

        let z = node;
        let (zl, zr) = (self.nodes[z].left, self.nodes[z].right);
        let mut removed_color = self.nodes[z].color;

        let child = if zl.is_nil() {
            self.transplant(z, zr);
            zr
        } else if zr.is_nil() {
            self.transplant(z, zl);
            zl
        } else {
            // successor has no left child.
            let next = self.minimum(zr);
            let child = self.nodes[next].right;
            removed_color = self.nodes[next].color;

            if next == zr {
                self.nodes[child].parent = next;
            } else {
                self.transplant(next, child);
                self.nodes[next].right = zr;
                self.nodes[zr].parent = next;
            }
            self.transplant(z, next);
            self.nodes[next].left = zl;
            self.nodes[zl].parent = next;
            self.nodes[next].color = self.nodes[z].color;
            child
        };

        // sizes must be whole before fixup rotations patch them locally.
        self.repair_sizes(child);
        if removed_color == Color::Black {
            self.delete_fixup(child);
        }
        self.reset_sentinel();

        match self.nodes.take(z).and_then(|node| node.key) {
            Some(key) => Ok(key),
            None => err_at!(Fatal, msg: "delete {:?} lost its key", z),
        }
    }

    /// Remove a node holding `key` and return the key. If several nodes
    /// hold equal keys, only one of them is removed. If key is not present,
    /// then remove is effectively a no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.search(key)?;
        self.delete(node).ok()
    }
}

impl<K> RbTree<K> {
    #[inline]
    pub(crate) fn node(&self, x: NodeId) -> &Node<K> {
        &self.nodes[x]
    }

    fn live(&self, x: NodeId) -> Option<&Node<K>> {
        match self.nodes.contains(x) {
            true => self.nodes.get(x),
            false => None,
        }
    }

    #[inline]
    fn to_handle(&self, x: NodeId) -> Option<NodeId> {
        if x.is_nil() {
            None
        } else {
            Some(x)
        }
    }

    #[inline]
    fn is_red(&self, x: NodeId) -> bool {
        self.nodes[x].is_red()
    }

    #[inline]
    fn is_black(&self, x: NodeId) -> bool {
        self.nodes[x].is_black()
    }

    #[inline]
    fn parent(&self, x: NodeId) -> NodeId {
        self.nodes[x].parent
    }

    #[inline]
    fn left(&self, x: NodeId) -> NodeId {
        self.nodes[x].left
    }

    #[inline]
    fn right(&self, x: NodeId) -> NodeId {
        self.nodes[x].right
    }

    fn minimum(&self, mut x: NodeId) -> NodeId {
        while !x.is_nil() && !self.left(x).is_nil() {
            x = self.left(x);
        }
        x
    }

    fn maximum(&self, mut x: NodeId) -> NodeId {
        while !x.is_nil() && !self.right(x).is_nil() {
            x = self.right(x);
        }
        x
    }

    fn height_from(&self, x: NodeId) -> usize {
        match x.is_nil() {
            true => 0,
            false => {
                let (left, right) = (self.left(x), self.right(x));
                1 + std::cmp::max(self.height_from(left), self.height_from(right))
            }
        }
    }

    // sentinel links are scratch space, clear them once delete is done.
    fn reset_sentinel(&mut self) {
        let sentinel = &mut self.nodes[NodeId::NIL];
        sentinel.parent = NodeId::NIL;
        sentinel.left = NodeId::NIL;
        sentinel.right = NodeId::NIL;
        sentinel.set_black();
    }

    // replace sub-tree `u` with sub-tree `v` under u's parent. When `v` is
    // the sentinel this writes its parent link, delete_fixup relies on it.
    fn transplant(&mut self, u: NodeId, v: NodeId) {
        let parent = self.parent(u);
        if parent.is_nil() {
            self.root = v;
        } else if u == self.left(parent) {
            self.nodes[parent].left = v;
        } else {
            self.nodes[parent].right = v;
        }
        self.nodes[v].parent = parent;
    }

    // walk up from child's parent to root recomputing sizes.
    fn repair_sizes(&mut self, child: NodeId) {
        let mut x = self.parent(child);
        while !x.is_nil() {
            let (left, right) = (self.left(x), self.right(x));
            let size = 1 + self.nodes[left].size + self.nodes[right].size;
            self.nodes[x].size = size;
            x = self.parent(x);
        }
    }

    fn insert_fixup(&mut self, mut z: NodeId) {
        while self.is_red(self.parent(z)) {
            let parent = self.parent(z);
            let grand = self.parent(parent);

            if parent == self.left(grand) {
                let uncle = self.right(grand);
                if self.is_red(uncle) {
                    trace!("insert_fixup recolor at {:?}", grand);
                    self.nodes[parent].set_black();
                    self.nodes[uncle].set_black();
                    self.nodes[grand].set_red();
                    z = grand;
                    continue;
                }
                if z == self.right(parent) {
                    z = parent;
                    self.rotate_left(z);
                }
                let parent = self.parent(z);
                let grand = self.parent(parent);
                self.nodes[parent].set_black();
                self.nodes[grand].set_red();
                self.rotate_right(grand);
            } else {
                let uncle = self.left(grand);
                if self.is_red(uncle) {
                    trace!("insert_fixup recolor at {:?}", grand);
                    self.nodes[parent].set_black();
                    self.nodes[uncle].set_black();
                    self.nodes[grand].set_red();
                    z = grand;
                    continue;
                }
                if z == self.left(parent) {
                    z = parent;
                    self.rotate_right(z);
                }
                let parent = self.parent(z);
                let grand = self.parent(parent);
                self.nodes[parent].set_black();
                self.nodes[grand].set_red();
                self.rotate_left(grand);
            }
        }

        let root = self.root;
        self.nodes[root].set_black();
    }

    fn delete_fixup(&mut self, mut x: NodeId) {
        while x != self.root && self.is_black(x) {
            let parent = self.parent(x);

            if x == self.left(parent) {
                let mut sibling = self.right(parent);
                if self.is_red(sibling) {
                    self.nodes[sibling].set_black();
                    self.nodes[parent].set_red();
                    self.rotate_left(parent);
                    sibling = self.right(self.parent(x));
                }

                let (near, far) = (self.left(sibling), self.right(sibling));
                if self.is_black(near) && self.is_black(far) {
                    trace!("delete_fixup recolor at {:?}", sibling);
                    self.nodes[sibling].set_red();
                    x = self.parent(x);
                    continue;
                }

                if self.is_black(far) {
                    self.nodes[near].set_black();
                    self.nodes[sibling].set_red();
                    self.rotate_right(sibling);
                    sibling = self.right(self.parent(x));
                }
                let parent = self.parent(x);
                let far = self.right(sibling);
                self.nodes[sibling].color = self.nodes[parent].color;
                self.nodes[parent].set_black();
                self.nodes[far].set_black();
                self.rotate_left(parent);
                x = self.root;
            } else {
                let mut sibling = self.left(parent);
                if self.is_red(sibling) {
                    self.nodes[sibling].set_black();
                    self.nodes[parent].set_red();
                    self.rotate_right(parent);
                    sibling = self.left(self.parent(x));
                }

                let (near, far) = (self.right(sibling), self.left(sibling));
                if self.is_black(near) && self.is_black(far) {
                    trace!("delete_fixup recolor at {:?}", sibling);
                    self.nodes[sibling].set_red();
                    x = self.parent(x);
                    continue;
                }

                if self.is_black(far) {
                    self.nodes[near].set_black();
                    self.nodes[sibling].set_red();
                    self.rotate_left(sibling);
                    sibling = self.left(self.parent(x));
                }
                let parent = self.parent(x);
                let far = self.left(sibling);
                self.nodes[sibling].color = self.nodes[parent].color;
                self.nodes[parent].set_black();
                self.nodes[far].set_black();
                self.rotate_right(parent);
                x = self.root;
            }
        }

        self.nodes[x].set_black();
    }

    //              (p)                       (p)
    //               |                         |
    //               x                         y
    //              / \                       / \
    //             /   \                     /   \
    //            /     \                   /     \
    //          xl       y                 x       yr
    //                  / \               / \
    //                yl   yr           xl   yl
    //
    fn rotate_left(&mut self, x: NodeId) {
        let y = self.right(x);
        if y.is_nil() {
            panic!("rotate_left(): no right child for {:?}, call the programmer", x);
        }
        trace!("rotate_left {:?}", x);

        let yl = self.left(y);
        self.nodes[x].right = yl;
        if !yl.is_nil() {
            self.nodes[yl].parent = x;
        }

        let parent = self.parent(x);
        self.nodes[y].parent = parent;
        if parent.is_nil() {
            self.root = y;
        } else if x == self.left(parent) {
            self.nodes[parent].left = y;
        } else {
            self.nodes[parent].right = y;
        }

        self.nodes[y].left = x;
        self.nodes[x].parent = y;

        self.nodes[y].size = self.nodes[x].size;
        let size = 1 + self.nodes[self.left(x)].size + self.nodes[yl].size;
        self.nodes[x].size = size;
    }

    //              (p)                       (p)
    //               |                         |
    //               x                         y
    //              / \                       / \
    //             /   \                     /   \
    //            /     \                   /     \
    //           y       xr               yl       x
    //          / \                               / \
    //        yl   yr                           yr   xr
    //
    fn rotate_right(&mut self, x: NodeId) {
        let y = self.left(x);
        if y.is_nil() {
            panic!("rotate_right(): no left child for {:?}, call the programmer", x);
        }
        trace!("rotate_right {:?}", x);

        let yr = self.right(y);
        self.nodes[x].left = yr;
        if !yr.is_nil() {
            self.nodes[yr].parent = x;
        }

        let parent = self.parent(x);
        self.nodes[y].parent = parent;
        if parent.is_nil() {
            self.root = y;
        } else if x == self.left(parent) {
            self.nodes[parent].left = y;
        } else {
            self.nodes[parent].right = y;
        }

        self.nodes[y].right = x;
        self.nodes[x].parent = y;

        self.nodes[y].size = self.nodes[x].size;
        let size = 1 + self.nodes[yr].size + self.nodes[self.right(x)].size;
        self.nodes[x].size = size;
    }

    fn validate_tree(
        &self,
        x: NodeId,
        fromred: bool,
        mut stats: Stats,
        depth: usize,
    ) -> Result<Stats>
    where
        K: Ord + fmt::Debug,
    {
        if x.is_nil() {
            return Ok(stats);
        }
        let node = &self.nodes[x];

        let red = node.is_red();
        if fromred && red {
            err_at!(Fatal, msg: "consecutive reds at {:?}", node.key)?;
        }

        let (left, right) = (&self.nodes[node.left], &self.nodes[node.right]);
        if node.size != 1 + left.size + right.size {
            let (l, r) = (left.size, right.size);
            err_at!(Fatal, msg: "size {:?}:{} left:{} right:{}", node.key, node.size, l, r)?;
        }
        if !node.left.is_nil() {
            if left.parent != x {
                err_at!(Fatal, msg: "parent link for left of {:?}", node.key)?;
            }
            if left.as_key().gt(node.as_key()) {
                err_at!(Fatal, msg: "sort left:{:?} parent:{:?}", left.key, node.key)?;
            }
        }
        if !node.right.is_nil() {
            if right.parent != x {
                err_at!(Fatal, msg: "parent link for right of {:?}", node.key)?;
            }
            if right.as_key().lt(node.as_key()) {
                err_at!(Fatal, msg: "sort right:{:?} parent:{:?}", right.key, node.key)?;
            }
        }

        stats.n_count += 1;
        stats.max_depth = std::cmp::max(stats.max_depth, depth);
        let n_blacks = stats.n_blacks + if red { 0 } else { 1 };

        let mut ss_l = Stats { n_blacks, ..stats };
        ss_l = self.validate_tree(node.left, red, ss_l, depth + 1)?;
        let ss_r = Stats { n_blacks, ..ss_l };
        let ss_r = self.validate_tree(node.right, red, ss_r, depth + 1)?;

        if ss_l.n_blacks != ss_r.n_blacks {
            let (l, r) = (ss_l.n_blacks, ss_r.n_blacks);
            err_at!(Fatal, msg: "unbalanced blacks at {:?} {} {}", node.key, l, r)?;
        }

        Ok(ss_r)
    }
}

impl<K> Extend<K> for RbTree<K>
where
    K: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = K>,
    {
        iter.into_iter().for_each(|key| {
            self.insert(key);
        });
    }
}

impl<K> FromIterator<K> for RbTree<K>
where
    K: Ord,
{
    fn from_iter<I>(iter: I) -> RbTree<K>
    where
        I: IntoIterator<Item = K>,
    {
        let mut tree = RbTree::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, K> IntoIterator for &'a RbTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

impl<K> fmt::Debug for RbTree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
#[path = "rbtree_test.rs"]
mod rbtree_test;
