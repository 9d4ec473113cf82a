use arbitrary::{self, unstructured::Unstructured, Arbitrary};
use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};

use super::*;

#[test]
fn test_arena_sentinel() {
    let mut arena: Arena<u64> = Arena::new(0);
    assert_eq!(arena.len(), 0);
    assert!(!arena.contains(NodeId::NIL));
    assert_eq!(arena.take(NodeId::NIL), None);
    assert_eq!(arena[NodeId::NIL], 0);

    let id = arena.alloc(10);
    assert_eq!(id.index, 1);
    assert_eq!(arena.len(), 1);

    arena.clear();
    assert_eq!(arena.len(), 0);
    assert_eq!(arena[NodeId::NIL], 0);
    assert!(!arena.contains(id));
}

#[test]
fn test_arena_stale_handle() {
    let mut arena: Arena<u64> = Arena::new(0);

    let a = arena.alloc(10);
    assert_eq!(arena.take(a), Some(10));
    assert_eq!(arena.take(a), None);

    let b = arena.alloc(20);
    assert_eq!(a.index, b.index, "slot shall be reused");
    assert_ne!(a, b);
    assert!(!arena.contains(a));
    assert!(arena.contains(b));
    assert_eq!(arena.get(a), None);
    assert_eq!(arena.get(b), Some(&20));

    arena.clear();
    let c = arena.alloc(30);
    assert_eq!(c.index, b.index);
    assert_eq!(arena.get(b), None);
    assert_eq!(arena.get(c), Some(&30));
}

#[test]
fn test_arena_foreign_handle() {
    let mut a: Arena<u64> = Arena::new(0);
    let mut b: Arena<u64> = Arena::new(0);

    let x = a.alloc(10);
    let y = b.alloc(20);
    assert_eq!((x.index, x.generation), (y.index, y.generation));
    assert_ne!(x, y);

    assert!(!b.contains(x));
    assert_eq!(b.get(x), None);
    assert_eq!(b.take(x), None);
    assert_eq!(b.get(y), Some(&20));
    assert_eq!(a.get(x), Some(&10));
}

#[test]
fn test_arena_ops() {
    let seed: u64 = random();
    // let seed: u64 = 15685501944957901989;
    println!("test_arena_ops {}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut arena: Arena<u64> = Arena::new(0);
    let mut model: Vec<(NodeId, u64)> = vec![];
    let mut freed: Vec<NodeId> = vec![];

    let mut counts = [0_usize; 4];

    for _i in 0..100_000 {
        let bytes = rng.gen::<[u8; 32]>();
        let mut uns = Unstructured::new(&bytes);

        let op: Op = uns.arbitrary().unwrap();
        match op {
            Op::Alloc(value) => {
                counts[0] += 1;
                let id = arena.alloc(value);
                assert!(!model.iter().any(|(m, _)| *m == id));
                model.push((id, value));
            }
            Op::Get(off) if !model.is_empty() => {
                counts[1] += 1;
                let (id, value) = model[off % model.len()];
                assert_eq!(arena.get(id), Some(&value));
                assert_eq!(arena[id], value);
            }
            Op::Take(off) if !model.is_empty() => {
                counts[2] += 1;
                let (id, value) = model.swap_remove(off % model.len());
                assert_eq!(arena.take(id), Some(value));
                freed.push(id);
            }
            Op::Get(_) | Op::Take(_) => (),
            Op::Clear => {
                counts[3] += 1;
                arena.clear();
                freed.extend(model.drain(..).map(|(id, _)| id));
            }
        }
        assert_eq!(arena.len(), model.len());
    }

    for id in freed.into_iter() {
        assert!(!arena.contains(id), "stale {:?}", id);
    }

    println!("counts {:?} len:{}", counts, arena.len());
}

#[derive(Debug, Arbitrary)]
enum Op {
    Alloc(u64),
    Get(usize),
    Take(usize),
    Clear,
}
