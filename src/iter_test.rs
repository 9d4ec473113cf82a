use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};

use super::*;

use std::collections::BTreeMap;

// pre-order and post-order of a tree are fixed by its shape, rebuild the
// shape recursively and compare.
fn pre_order_ref<K: Clone>(tree: &RbTree<K>, x: NodeId, out: &mut Vec<K>) {
    if let Some(key) = tree.key(x) {
        let node = tree.node(x);
        out.push(key.clone());
        pre_order_ref(tree, node.left, out);
        pre_order_ref(tree, node.right, out);
    }
}

fn post_order_ref<K: Clone>(tree: &RbTree<K>, x: NodeId, out: &mut Vec<K>) {
    if let Some(key) = tree.key(x) {
        let node = tree.node(x);
        post_order_ref(tree, node.left, out);
        post_order_ref(tree, node.right, out);
        out.push(key.clone());
    }
}

#[test]
fn test_iter_empty() {
    let tree: RbTree<u32> = RbTree::new();
    assert_eq!(tree.iter().next(), None);
    assert_eq!(tree.reverse().next(), None);
    assert_eq!(tree.pre_order().next(), None);
    assert_eq!(tree.post_order().next(), None);
    assert_eq!(tree.iter_nodes().next(), None);
    assert_eq!(tree.range::<u32, _>(..).next(), None);
    assert_eq!(tree.range(10..20).next(), None);
}

#[test]
fn test_iter_orders() {
    let tree: RbTree<u32> = vec![11, 2, 14, 1, 7, 15, 5, 8, 4].into_iter().collect();

    let items: Vec<u32> = tree.iter().cloned().collect();
    assert_eq!(items, vec![1, 2, 4, 5, 7, 8, 11, 14, 15]);

    let items: Vec<u32> = tree.reverse().cloned().collect();
    assert_eq!(items, vec![15, 14, 11, 8, 7, 5, 4, 2, 1]);

    let root = tree.root().unwrap();
    let mut refs = vec![];
    pre_order_ref(&tree, root, &mut refs);
    let items: Vec<u32> = tree.pre_order().cloned().collect();
    assert_eq!(items, refs);
    assert_eq!(items[0], *tree.key(root).unwrap());

    let mut refs = vec![];
    post_order_ref(&tree, root, &mut refs);
    let items: Vec<u32> = tree.post_order().cloned().collect();
    assert_eq!(items, refs);
    assert_eq!(items[items.len() - 1], *tree.key(root).unwrap());

    // restartable, a second traversal yields the same sequence.
    let a: Vec<&u32> = tree.iter().collect();
    let b: Vec<&u32> = (&tree).into_iter().collect();
    assert_eq!(a, b);

    assert_eq!(format!("{:?}", tree), "{1, 2, 4, 5, 7, 8, 11, 14, 15}");
}

#[test]
fn test_iter_nodes() {
    let tree: RbTree<u32> = (0..1000).rev().collect();
    for (i, node) in tree.iter_nodes().enumerate() {
        assert_eq!(tree.rank(node).unwrap(), i + 1);
        assert_eq!(tree.key(node), Some(&(i as u32)));
    }
}

#[test]
fn test_range() {
    let tree: RbTree<u32> = (0..100).map(|k| k * 2).collect();

    let items: Vec<u32> = tree.range(10..16).cloned().collect();
    assert_eq!(items, vec![10, 12, 14]);
    let items: Vec<u32> = tree.range(11..=16).cloned().collect();
    assert_eq!(items, vec![12, 14, 16]);
    let items: Vec<u32> = tree.range(..4).cloned().collect();
    assert_eq!(items, vec![0, 2]);
    let items: Vec<u32> = tree.range(195..).cloned().collect();
    assert_eq!(items, vec![196, 198]);
    assert_eq!(tree.range::<u32, _>(..).count(), 100);
    assert_eq!(tree.range(300..).count(), 0);

    let r = (Bound::Excluded(10), Bound::Excluded(14));
    let items: Vec<u32> = tree.range(r).cloned().collect();
    assert_eq!(items, vec![12]);

    // descending bounds yield nothing.
    let r = (Bound::Included(20), Bound::Included(10));
    assert_eq!(tree.range(r).count(), 0);
}

#[test]
fn test_range_ops() {
    let seed: u64 = random();
    // let seed: u64 = 6363829624031560868;
    println!("test_range_ops {}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut tree: RbTree<u16> = RbTree::new();
    let mut btmap: BTreeMap<u16, usize> = BTreeMap::new();

    for _i in 0..10_000 {
        let key = rng.gen::<u16>() % 2048;
        tree.insert(key);
        *btmap.entry(key).or_insert(0) += 1;
    }
    for _i in 0..4_000 {
        let key = rng.gen::<u16>() % 2048;
        if tree.remove(&key).is_some() {
            match btmap.get(&key).cloned() {
                Some(1) => {
                    btmap.remove(&key);
                }
                Some(n) => {
                    btmap.insert(key, n - 1);
                }
                None => panic!("remove no key {} in btree", key),
            }
        }
    }
    tree.validate().unwrap();

    let expand = |(key, n): (&u16, &usize)| vec![*key; *n];

    for _i in 0..1_000 {
        let (a, b) = (rng.gen::<u16>() % 2100, rng.gen::<u16>() % 2100);
        let (low, high) = (std::cmp::min(a, b), std::cmp::max(a, b));
        let r = match rng.gen::<u8>() % 4 {
            0 => (Bound::Included(low), Bound::Included(high)),
            1 => (Bound::Included(low), Bound::Excluded(high)),
            2 => (Bound::Excluded(low), Bound::Included(high)),
            _ => (Bound::Unbounded, Bound::Excluded(high)),
        };

        let a: Vec<u16> = tree.range(r).cloned().collect();
        let b: Vec<u16> = btmap.range(r).flat_map(expand).collect();
        assert_eq!(a, b, "range {:?}", r);
    }

    let a: Vec<u16> = tree.reverse().cloned().collect();
    let b: Vec<u16> = btmap.iter().rev().flat_map(expand).collect();
    assert_eq!(a, b);
}
