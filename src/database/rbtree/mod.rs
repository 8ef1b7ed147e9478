//! Красно-чёрное дерево.
//!
//! # Модули
//!
//! - `rbtree_base`: дерево значений, повороты, восстановление свойств после
//!   вставки и удаления.
//! - `map`: отображение ключ → значение поверх дерева.
//! - `statistics`: высота, цвета, чёрная высота.

pub mod map;
pub mod rbtree_base;
pub mod statistics;

pub use map::*;
pub use rbtree_base::*;
pub use statistics::*;
