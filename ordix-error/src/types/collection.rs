use std::any::Any;

use thiserror::Error;

use crate::{ErrorExt, StatusCode};

/// Ошибки упорядоченных коллекций (skip list, красно-чёрное дерево).
///
/// Отсутствие ключа на уровне самих структур выражается через `Option`;
/// вариант `NotFound` нужен уровню команд, где «нет ключа» должно стать
/// ошибкой с кодом.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// Ключ не найден
    #[error("Key not found: {key}")]
    NotFound { key: String },
    /// Запрос минимума/максимума у пустой структуры
    #[error("Operation '{operation}' requires a non-empty structure")]
    EmptyStructure { operation: &'static str },
    /// Уровень узла skip list вне допустимого диапазона
    #[error("Level {level} is outside of 1..={max}")]
    InvalidLevel { level: usize, max: usize },
}

impl ErrorExt for CollectionError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NotFound,
            Self::EmptyStructure { .. } => StatusCode::EmptyStructure,
            Self::InvalidLevel { .. } => StatusCode::InvalidLevel,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
