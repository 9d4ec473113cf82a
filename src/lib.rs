//! Package implement an order statistics Red-Black tree.
//!
//! Quoting from [Wikipedia][os-tree]:
//!
//! > An order statistic tree is a variant of the binary search tree (or
//! > more generally, a B-tree) that supports two additional operations
//! > beyond insertion, lookup and deletion: Select(i), find the i'th
//! > smallest element stored in the tree, and Rank(x), find the rank of
//! > element x in the tree.
//!
//! [RbTree] implements a classic, parent linked, [red-black][wiki-rbt] tree
//! where every node is augmented with the size of its sub-tree. Sizes are
//! repaired by rotations and by the insert/delete pipelines, which makes
//! `rank()` and `select()` O(log n) operations.
//!
//! - Parametrised over `key-type`, any type implementing [Ord].
//! - Duplicate keys are allowed, they are stored as separate nodes.
//! - Nodes live in an arena, callers refer to them via [NodeId] handles.
//! - Stale handles, handles to deleted nodes, are detected and rejected.
//! - Full table scan, in-order, reverse, pre-order and post-order.
//! - Range scan, to iterate between a ``low`` and ``high``.
//! - No Durability guarantee.
//! - Not thread safe.
//!
//! Constructing a new [RbTree] instance and CRUD operations:
//!
//! ```
//! use osrb::RbTree;
//!
//! let mut tree: RbTree<u32> = RbTree::new();
//! assert_eq!(tree.len(), 0);
//! assert_eq!(tree.is_empty(), true);
//!
//! for key in [11, 2, 14, 1, 7, 15, 5, 8, 4].iter() {
//!     tree.insert(*key);
//! }
//!
//! let node = tree.search(&7).unwrap();
//! assert_eq!(tree.delete(node).unwrap(), 7);
//!
//! let keys: Vec<u32> = tree.iter().cloned().collect();
//! assert_eq!(keys, vec![1, 2, 4, 5, 8, 11, 14, 15]);
//! ```
//!
//! Order statistics:
//!
//! ```
//! use osrb::RbTree;
//!
//! let tree: RbTree<u32> = vec![1, 2, 4, 5, 8, 11, 14, 15].into_iter().collect();
//!
//! let node = tree.select(1).unwrap();
//! assert_eq!(tree.key(node), Some(&1));
//!
//! let node = tree.search(&14).unwrap();
//! assert_eq!(tree.rank(node).unwrap(), 7);
//!
//! assert!(tree.select(0).is_err());
//! assert!(tree.select(9).is_err());
//! ```
//!
//! [wiki-rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
//! [os-tree]: https://en.wikipedia.org/wiki/Order_statistic_tree

use std::{error, fmt, result};

// Short form to compose Error values.
//
// Here are few possible ways:
//
// ```ignore
// use crate::Error;
// err_at!(OutOfRange, msg: format!("bad rank"));
// ```
//
// ```ignore
// use crate::Error;
// err_at!(Fatal, validate_tree(..));
// ```
//
// ```ignore
// use crate::Error;
// err_at!(Fatal, validate_tree(..), format!("tree corrupted"));
// ```
//
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err(Error::$v(prefix, format!($($arg),+)))
    }};
    ($v:ident, $e:expr) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                Err(Error::$v(prefix, format!("{}", err)))
            }
        }
    }};
    ($v:ident, $e:expr, $($arg:expr),+) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                let msg = format!($($arg),+);
                Err(Error::$v(prefix, format!("{} {}", err, msg)))
            }
        }
    }};
}

mod arena;
mod iter;
mod node;
mod rbtree;

pub use iter::{Iter, Nodes, PostOrder, PreOrder, Range, Reverse};
pub use node::{Color, NodeId};
pub use rbtree::{RbTree, Stats};

/// Error variants that are returned by this package's API.
///
/// Each variant carries a prefix, typically identifying the
/// error location.
#[derive(Clone, PartialEq)]
pub enum Error {
    /// Tree invariants are broken, returned by `validate()`.
    Fatal(String, String),
    /// Node handle is stale, belongs to another tree or names the sentinel.
    NotFound(String, String),
    /// Rank outside `[1, len]`.
    OutOfRange(String, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        use Error::*;

        match self {
            Fatal(p, msg) => write!(f, "{} Fatal: {}", p, msg),
            NotFound(p, msg) => write!(f, "{} NotFound: {}", p, msg),
            OutOfRange(p, msg) => write!(f, "{} OutOfRange: {}", p, msg),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        write!(f, "{}", self)
    }
}

impl error::Error for Error {}

/// Type alias for Result return type, used by this package.
pub type Result<T> = result::Result<T, Error>;
