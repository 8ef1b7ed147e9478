//! SkipList: упорядоченное отображение на вероятностных уровнях.
//!
//! # Модули
//!
//! - `skiplist_base`: сама структура, поиск, вставка, удаление, итераторы.
//! - `level`: источники уровней и правило адаптивного ограничения.
//! - `statistics`: распределение узлов по высотам.

pub mod level;
pub mod skiplist_base;
pub mod statistics;

pub use level::*;
pub use skiplist_base::*;
pub use statistics::*;
