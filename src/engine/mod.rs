//! Выбор реализации индекса во время выполнения.
//!
//! [`IndexEngine`] хранит одну из двух структур и отдаёт её через общий
//! трейт [`crate::OrderedMap`].

pub mod engine;

pub use engine::*;
