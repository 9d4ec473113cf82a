//! Module implement lazy traversals over [RbTree].
//!
//! Every iterator borrows the tree, holds an explicit stack of pending
//! nodes and yields one item per call to `next()`. Calling the
//! constructor again restarts the traversal.

use std::{
    borrow::Borrow,
    cmp::Ordering,
    marker,
    ops::{Bound, RangeBounds},
};

use crate::{node::NodeId, rbtree::RbTree};

/// Traversal API.
impl<K> RbTree<K> {
    /// Return an iterator over all nodes in sorted order.
    pub fn iter_nodes(&self) -> Nodes<K> {
        Nodes {
            walk: Walk::new(self, IFlag::Left),
        }
    }

    /// Return an iterator over all keys in descending order.
    pub fn reverse(&self) -> Reverse<K> {
        Reverse {
            walk: Walk::new(self, IFlag::Right),
        }
    }

    /// Return an iterator over all keys in pre-order, node before its
    /// left and right sub-trees.
    pub fn pre_order(&self) -> PreOrder<K> {
        let mut stack = Vec::default();
        if !self.root.is_nil() {
            stack.push(self.root);
        }
        PreOrder { tree: self, stack }
    }

    /// Return an iterator over all keys in post-order, left and right
    /// sub-trees before the node.
    pub fn post_order(&self) -> PostOrder<K> {
        let mut paths = Vec::default();
        if !self.root.is_nil() {
            paths.push(Fragment {
                flag: IFlag::Left,
                node: self.root,
            });
        }
        PostOrder { tree: self, paths }
    }

    /// Range over all keys from low to high, in ascending order.
    pub fn range<Q, R>(&self, range: R) -> Range<K, R, Q>
    where
        K: Borrow<Q>,
        R: RangeBounds<Q>,
        Q: Ord + ?Sized,
    {
        let mut walk = Walk {
            tree: self,
            paths: Vec::default(),
            forward: true,
        };
        match range.start_bound() {
            Bound::Unbounded => walk.build(self.root),
            Bound::Included(low) => walk.find_start(self.root, low, true),
            Bound::Excluded(low) => walk.find_start(self.root, low, false),
        };

        Range {
            range,
            walk,
            fin: false,
            high: marker::PhantomData,
        }
    }
}

/// In-order iterator over keys, refer to [RbTree::iter].
pub struct Iter<'a, K> {
    walk: Walk<'a, K>,
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(tree: &'a RbTree<K>) -> Iter<'a, K> {
        Iter {
            walk: Walk::new(tree, IFlag::Left),
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let tree: &'a RbTree<K> = self.walk.tree;
        let x = self.walk.next_node()?;
        Some(tree.node(x).as_key())
    }
}

/// In-order iterator over node handles, refer to [RbTree::iter_nodes].
pub struct Nodes<'a, K> {
    walk: Walk<'a, K>,
}

impl<'a, K> Iterator for Nodes<'a, K> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        self.walk.next_node()
    }
}

/// Descending iterator over keys, refer to [RbTree::reverse].
pub struct Reverse<'a, K> {
    walk: Walk<'a, K>,
}

impl<'a, K> Iterator for Reverse<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let tree: &'a RbTree<K> = self.walk.tree;
        let x = self.walk.next_node()?;
        Some(tree.node(x).as_key())
    }
}

/// Ascending iterator over keys within a range, refer to [RbTree::range].
pub struct Range<'a, K, R, Q>
where
    Q: ?Sized,
{
    range: R,
    walk: Walk<'a, K>,
    fin: bool,
    high: marker::PhantomData<Q>,
}

impl<'a, K, R, Q> Iterator for Range<'a, K, R, Q>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
    R: RangeBounds<Q>,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        match self.fin {
            false => {
                let tree: &'a RbTree<K> = self.walk.tree;
                let x = self.walk.next_node()?;
                let key = tree.node(x).as_key();
                match self.range.end_bound() {
                    Bound::Included(high) if key.borrow().le(high) => Some(key),
                    Bound::Excluded(high) if key.borrow().lt(high) => Some(key),
                    Bound::Unbounded => Some(key),
                    Bound::Included(_) | Bound::Excluded(_) => {
                        self.fin = true;
                        None
                    }
                }
            }
            true => None,
        }
    }
}

/// Pre-order iterator over keys, refer to [RbTree::pre_order].
pub struct PreOrder<'a, K> {
    tree: &'a RbTree<K>,
    stack: Vec<NodeId>,
}

impl<'a, K> Iterator for PreOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let tree: &'a RbTree<K> = self.tree;
        let node = tree.node(self.stack.pop()?);
        if !node.right.is_nil() {
            self.stack.push(node.right);
        }
        if !node.left.is_nil() {
            self.stack.push(node.left);
        }
        Some(node.as_key())
    }
}

/// Post-order iterator over keys, refer to [RbTree::post_order].
pub struct PostOrder<'a, K> {
    tree: &'a RbTree<K>,
    paths: Vec<Fragment>,
}

impl<'a, K> Iterator for PostOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let tree: &'a RbTree<K> = self.tree;
        loop {
            let path = self.paths.last_mut()?;
            let node = tree.node(path.node);
            match path.flag {
                IFlag::Left => {
                    path.flag = IFlag::Center;
                    for child in [node.right, node.left].iter() {
                        if !child.is_nil() {
                            let (flag, node) = (IFlag::Left, *child);
                            self.paths.push(Fragment { flag, node });
                        }
                    }
                }
                IFlag::Center | IFlag::Right => {
                    self.paths.pop();
                    break Some(node.as_key());
                }
            }
        }
    }
}

// Direction of the walk is fixed at construction, `forward` visits the
// left sub-tree first.
struct Walk<'a, K> {
    tree: &'a RbTree<K>,
    paths: Vec<Fragment>,
    forward: bool,
}

impl<'a, K> Walk<'a, K> {
    fn new(tree: &'a RbTree<K>, flag: IFlag) -> Walk<'a, K> {
        let mut walk = Walk {
            tree,
            paths: Vec::default(),
            forward: matches!(flag, IFlag::Left),
        };
        walk.build(tree.root);
        walk
    }

    fn next_node(&mut self) -> Option<NodeId> {
        let (first, last) = match self.forward {
            true => (IFlag::Left, IFlag::Right),
            false => (IFlag::Right, IFlag::Left),
        };
        loop {
            let path = self.paths.last_mut()?;
            match path.flag {
                IFlag::Center => {
                    path.flag = last;
                    let node = self.tree.node(path.node);
                    let next = if self.forward { node.right } else { node.left };
                    self.build(next)
                }
                flag if flag == first => {
                    path.flag = IFlag::Center;
                    break Some(path.node);
                }
                _ => {
                    self.paths.pop();
                }
            }
        }
    }

    // push `x` and its leftmost (rightmost when reversed) spine.
    fn build(&mut self, mut x: NodeId) {
        let flag = if self.forward {
            IFlag::Left
        } else {
            IFlag::Right
        };
        while !x.is_nil() {
            self.paths.push(Fragment { flag, node: x });
            let node = self.tree.node(x);
            x = if self.forward { node.left } else { node.right };
        }
    }

    // position a forward walk at the first key that satisfies the low
    // bound. Equal keys may sit on either side of their twin, hence an
    // inclusive bound keeps descending left on equality.
    fn find_start<Q>(&mut self, mut x: NodeId, low: &Q, incl: bool)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        while !x.is_nil() {
            let node = self.tree.node(x);
            let skip = match node.as_key().borrow().cmp(low) {
                Ordering::Less => true,
                Ordering::Equal => !incl,
                Ordering::Greater => false,
            };
            match skip {
                true => {
                    self.paths.push(Fragment {
                        flag: IFlag::Right,
                        node: x,
                    });
                    x = node.right;
                }
                false => {
                    self.paths.push(Fragment {
                        flag: IFlag::Left,
                        node: x,
                    });
                    x = node.left;
                }
            }
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum IFlag {
    Left,
    Center,
    Right,
}

#[derive(Debug)]
struct Fragment {
    flag: IFlag,
    node: NodeId,
}

#[cfg(test)]
#[path = "iter_test.rs"]
mod iter_test;
