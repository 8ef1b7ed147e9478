//! Skip list, красно-чёрное дерево и `BTreeMap` на одних и тех же операциях.

use std::collections::BTreeMap;

use ordix::{
    EngineKind, IndexEngine, KeyOrderKind, OrderedMap, RbTreeMap, Settings, SkipList,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(u8, u8),
    Remove(u8),
    Get(u8),
    Lower(u8),
    Upper(u8),
    Range(u8, u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (any::<u8>(), any::<u8>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => any::<u8>().prop_map(Op::Remove),
        1 => any::<u8>().prop_map(Op::Get),
        1 => any::<u8>().prop_map(Op::Lower),
        1 => any::<u8>().prop_map(Op::Upper),
        1 => (any::<u8>(), any::<u8>()).prop_map(|(a, b)| Op::Range(a, b)),
    ]
}

type Pair = Option<(u8, u8)>;

fn owned(pair: Option<(&u8, &u8)>) -> Pair {
    pair.map(|(k, v)| (*k, *v))
}

/// Применяет операцию и возвращает наблюдаемый результат.
fn apply(
    map: &mut dyn OrderedMap<u8, u8>,
    op: &Op,
) -> (Pair, Vec<u8>) {
    match *op {
        Op::Insert(k, v) => (map.insert(k, v).map(|old| (k, old)), vec![]),
        Op::Remove(k) => (map.remove(&k).map(|old| (k, old)), vec![]),
        Op::Get(k) => (map.get(&k).map(|v| (k, *v)), vec![]),
        Op::Lower(k) => (owned(map.lower_bound(&k)), vec![]),
        Op::Upper(k) => (owned(map.upper_bound(&k)), vec![]),
        Op::Range(a, b) => (None, map.range(&a, &b).map(|(k, _)| *k).collect()),
    }
}

fn apply_oracle(
    map: &mut BTreeMap<u8, u8>,
    op: &Op,
) -> (Pair, Vec<u8>) {
    match *op {
        Op::Insert(k, v) => (map.insert(k, v).map(|old| (k, old)), vec![]),
        Op::Remove(k) => (map.remove(&k).map(|old| (k, old)), vec![]),
        Op::Get(k) => (map.get(&k).map(|v| (k, *v)), vec![]),
        Op::Lower(k) => (owned(map.range(k..).next()), vec![]),
        Op::Upper(k) => (
            k.checked_add(1)
                .and_then(|next| owned(map.range(next..).next())),
            vec![],
        ),
        Op::Range(a, b) if a < b => (None, map.range(a..b).map(|(k, _)| *k).collect()),
        Op::Range(..) => (None, vec![]),
    }
}

proptest! {
    #[test]
    fn prop_engines_are_equivalent(
        seed in any::<u64>(),
        ops in prop::collection::vec(op_strategy(), 0..300),
    ) {
        let mut skiplist = SkipList::<u8, u8>::with_seed(seed);
        let mut rbtree = RbTreeMap::<u8, u8>::new();
        let mut oracle = BTreeMap::new();

        for op in &ops {
            let expected = apply_oracle(&mut oracle, op);
            prop_assert_eq!(&apply(&mut skiplist, op), &expected, "skiplist: {:?}", op);
            prop_assert_eq!(&apply(&mut rbtree, op), &expected, "rbtree: {:?}", op);
        }

        prop_assert!(OrderedMap::check(&skiplist).is_ok());
        prop_assert!(OrderedMap::check(&rbtree).is_ok());

        let expected: Vec<_> = oracle.iter().collect();
        prop_assert_eq!(skiplist.iter().collect::<Vec<_>>(), expected.clone());
        prop_assert_eq!(rbtree.iter().collect::<Vec<_>>(), expected);
        prop_assert_eq!(owned(OrderedMap::first(&skiplist)), owned(OrderedMap::first(&rbtree)));
        prop_assert_eq!(owned(OrderedMap::last(&skiplist)), owned(OrderedMap::last(&rbtree)));
    }
}

#[test]
fn test_index_engines_agree_on_string_keys() {
    let words = [
        "pear", "apple", "fig", "kiwi", "banana", "cherry", "date", "grape", "lemon", "mango",
    ];

    for order in [KeyOrderKind::Natural, KeyOrderKind::Reverse] {
        let mut engines: Vec<IndexEngine> = [EngineKind::SkipList, EngineKind::RbTree]
            .into_iter()
            .map(|engine| {
                IndexEngine::initialize(&Settings {
                    engine,
                    order,
                    seed: Some(99),
                    ..Default::default()
                })
            })
            .collect();

        for engine in &mut engines {
            for (i, word) in words.iter().enumerate() {
                engine.get_store_mut().insert(word.to_string(), i.to_string());
            }
            engine.get_store_mut().remove(&"fig".to_string());
        }

        let dumps: Vec<Vec<(String, String)>> = engines
            .iter()
            .map(|engine| {
                engine
                    .get_store()
                    .entries()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .collect();

        assert_eq!(dumps[0], dumps[1], "order {order}");
        assert_eq!(dumps[0].len(), words.len() - 1);
        for engine in &engines {
            assert!(engine.check().is_ok());
        }
    }
}
