#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use ordix::{NaturalOrder, OrderedMap, RbTreeMap, SequenceLevels, SkipList};

#[derive(Debug, Arbitrary)]
enum Op {
    Insert(u16, u8),
    Remove(u16),
    Get(u16),
    Lower(u16),
    Upper(u16),
    Clear,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    levels: Vec<u8>,
    ops: Vec<Op>,
}

fn owned(pair: Option<(&u16, &u8)>) -> Option<(u16, u8)> {
    pair.map(|(k, v)| (*k, *v))
}

fuzz_target!(|input: FuzzInput| {
    // Уровни берутся из входа, чтобы покрыть и вырожденные, и высокие башни.
    let levels: Vec<usize> = input.levels.iter().map(|l| usize::from(*l % 48)).collect();
    let mut skiplist: SkipList<u16, u8, NaturalOrder, SequenceLevels> =
        SkipList::with_parts(NaturalOrder, SequenceLevels::new(levels));
    let mut rbtree = RbTreeMap::<u16, u8>::new();
    let mut oracle = BTreeMap::new();

    let engines: [&mut dyn OrderedMap<u16, u8>; 2] = [&mut skiplist, &mut rbtree];
    for map in engines {
        oracle.clear();
        for op in &input.ops {
            match *op {
                Op::Insert(k, v) => assert_eq!(map.insert(k, v), oracle.insert(k, v)),
                Op::Remove(k) => assert_eq!(map.remove(&k), oracle.remove(&k)),
                Op::Get(k) => assert_eq!(map.get(&k), oracle.get(&k)),
                Op::Lower(k) => {
                    assert_eq!(owned(map.lower_bound(&k)), owned(oracle.range(k..).next()))
                }
                Op::Upper(k) => {
                    let expected = k.checked_add(1).and_then(|n| owned(oracle.range(n..).next()));
                    assert_eq!(owned(map.upper_bound(&k)), expected)
                }
                Op::Clear => {
                    map.clear();
                    oracle.clear();
                }
            }
            assert_eq!(map.len(), oracle.len());
        }
        if let Err(err) = map.check() {
            panic!("{} invariants broken: {err}", map.engine_name());
        }
        assert!(map.entries().map(|(k, _)| *k).eq(oracle.keys().copied()));
    }
});
