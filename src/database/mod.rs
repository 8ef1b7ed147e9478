//! Упорядоченные структуры данных.
//!
//! - `arena`: хранилище узлов со стабильными индексами.
//! - `comparator`: стратегии сравнения ключей.
//! - `skiplist`: пропускной список с внедряемым источником уровней.
//! - `rbtree`: красно-чёрное дерево и отображение поверх него.
//! - `ordered`: общий контракт [`OrderedMap`].
//! - `safety`: проверка инвариантов.

pub mod arena;
pub mod comparator;
pub mod ordered;
pub mod rbtree;
pub mod safety;
pub mod skiplist;

// Publicly re-export all types from the submodules to simplify access from
// external code.
pub use arena::*;
pub use comparator::*;
pub use ordered::*;
pub use rbtree::*;
pub use safety::*;
pub use skiplist::*;
