use ordix::{CollectionError, Color, LessFn, NaturalOrder, RbTree, RbTreeMap, Reverse};

fn sample_tree() -> RbTree<i32> {
    [5, 3, 8, 1, 4, 7, 9].into_iter().collect()
}

#[test]
fn test_empty_tree() {
    let tree: RbTree<i32> = RbTree::new();

    assert!(tree.is_empty());
    assert_eq!(tree.root(), None);
    assert_eq!(
        tree.min(),
        Err(CollectionError::EmptyStructure { operation: "min" })
    );
    assert_eq!(
        tree.max(),
        Err(CollectionError::EmptyStructure { operation: "max" })
    );
    assert_eq!(tree.validate_invariants(), Ok(0));
}

#[test]
fn test_reference_scenario() {
    let tree = sample_tree();

    assert_eq!(tree.len(), 7);
    assert_eq!(tree.min(), Ok(&1));
    assert_eq!(tree.max(), Ok(&9));

    let root = tree.root().unwrap();
    assert_eq!(tree.value(root), Some(&5));
    assert_eq!(tree.color(root), Some(Color::Black));

    assert!(tree.contains(&4));
    assert!(!tree.contains(&6));
    assert_eq!(
        tree.iter().copied().collect::<Vec<_>>(),
        vec![1, 3, 4, 5, 7, 8, 9]
    );
    assert!(tree.validate_invariants().is_ok());
}

#[test]
fn test_duplicate_insert_is_rejected() {
    let mut tree = sample_tree();

    assert!(!tree.insert(4));
    assert_eq!(tree.len(), 7);

    let existing = tree.search(&4).unwrap();
    assert_eq!(tree.try_insert(4), Err((existing, 4)));
}

#[test]
fn test_delete_every_shape() {
    let mut tree = sample_tree();

    // лист
    assert_eq!(tree.delete(&1), Some(1));
    assert!(tree.validate_invariants().is_ok());
    // узел с одним потомком / двумя потомками
    assert_eq!(tree.delete(&3), Some(3));
    assert!(tree.validate_invariants().is_ok());
    assert_eq!(tree.delete(&8), Some(8));
    assert!(tree.validate_invariants().is_ok());
    // корень
    let root_value = *tree.value(tree.root().unwrap()).unwrap();
    assert_eq!(tree.delete(&root_value), Some(root_value));
    assert!(tree.validate_invariants().is_ok());

    assert_eq!(tree.delete(&100), None);
    assert_eq!(tree.len(), 3);
}

#[test]
fn test_ascending_inserts_stay_balanced() {
    let mut tree = RbTree::new();
    for i in 0..1024 {
        tree.insert(i);
    }

    let black_height = tree.validate_invariants().unwrap();
    let stats = tree.statistics();

    assert_eq!(stats.node_count, 1024);
    assert_eq!(stats.black_height, black_height);
    // Высота красно-чёрного дерева не превышает 2 * log2(n + 1).
    assert!(stats.height <= 2 * 11, "height {}", stats.height);
}

#[test]
fn test_drain_to_empty() {
    let mut tree: RbTree<u32> = (0..500).map(|i| (i * 37) % 500).collect();

    for i in (0..500).rev() {
        assert_eq!(tree.delete(&i), Some(i));
        assert!(tree.validate_invariants().is_ok());
    }

    assert!(tree.is_empty());
    assert_eq!(tree.root(), None);
}

#[test]
fn test_successor_and_predecessor_walk() {
    let tree = sample_tree();

    let mut forward = Vec::new();
    let mut cursor = tree.root().map(|root| tree.min_subtree(root));
    while let Some(id) = cursor {
        forward.push(*tree.value(id).unwrap());
        cursor = tree.successor(id);
    }
    assert_eq!(forward, vec![1, 3, 4, 5, 7, 8, 9]);

    let mut backward = Vec::new();
    let mut cursor = tree.root().map(|root| tree.max_subtree(root));
    while let Some(id) = cursor {
        backward.push(*tree.value(id).unwrap());
        cursor = tree.predecessor(id);
    }
    assert_eq!(backward, vec![9, 8, 7, 5, 4, 3, 1]);

    assert_eq!(
        tree.iter().rev().copied().collect::<Vec<_>>(),
        backward
    );
}

#[test]
fn test_bounds() {
    let tree = sample_tree();

    assert_eq!(tree.lower_bound(&6), Some(&7));
    assert_eq!(tree.lower_bound(&7), Some(&7));
    assert_eq!(tree.upper_bound(&7), Some(&8));
    assert_eq!(tree.upper_bound(&9), None);
    assert_eq!(tree.lower_bound(&0), Some(&1));
}

#[test]
fn test_less_only_comparator() {
    let mut tree = RbTree::with_comparator(LessFn(|a: &&str, b: &&str| a.len() < b.len()));
    for word in ["ccc", "a", "dddd", "bb"] {
        assert!(tree.insert(word));
    }

    // Та же длина считается равным ключом.
    assert!(!tree.insert("zz"));
    assert_eq!(
        tree.iter().copied().collect::<Vec<_>>(),
        vec!["a", "bb", "ccc", "dddd"]
    );
    assert!(tree.validate_invariants().is_ok());
}

#[test]
fn test_map_view() {
    let mut map = RbTreeMap::new();

    assert_eq!(map.insert("b", 2), None);
    assert_eq!(map.insert("a", 1), None);
    assert_eq!(map.insert("c", 3), None);
    assert_eq!(map.insert("b", 20), Some(2));

    assert_eq!(map.len(), 3);
    assert_eq!(map.get(&"b"), Some(&20));
    assert_eq!(map.first(), Some((&"a", &1)));
    assert_eq!(map.last(), Some((&"c", &3)));
    assert_eq!(map.lower_bound(&"bb"), Some((&"c", &3)));
    assert_eq!(map.upper_bound(&"a"), Some((&"b", &20)));

    *map.get_mut(&"c").unwrap() += 1;
    assert_eq!(map.remove(&"a"), Some(1));
    assert_eq!(map.remove(&"a"), None);

    let entries: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(entries, vec![("b", 20), ("c", 4)]);
    assert!(map.validate_invariants().is_ok());
}

#[test]
fn test_map_reverse_range() {
    let map: RbTreeMap<i32, (), Reverse<NaturalOrder>> = {
        let mut map = RbTreeMap::with_comparator(Reverse(NaturalOrder));
        map.extend((1..=10).map(|i| (i, ())));
        map
    };

    let keys: Vec<i32> = map.range(&8, &3).map(|(k, _)| *k).collect();
    assert_eq!(keys, vec![8, 7, 6, 5, 4]);
}
