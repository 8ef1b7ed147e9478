//! Проверка инвариантов упорядоченных структур.
//!
//! Обе структуры предоставляют `validate_invariants()`, обходящий узлы по
//! индексам арены и возвращающий первую найденную [`ValidationError`].
//! Проверки не вызываются из рабочих путей и предназначены для тестов,
//! fuzz-таргета и команды `CHECK`.

use std::any::Any;

use ordix_error::{ErrorExt, StatusCode};
use thiserror::Error;

/// Макрос для debug-time проверки инвариантов.
///
/// В release-сборках компилируется в no-op.
#[macro_export]
macro_rules! debug_assert_invariant {
    ($cond:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            if !$cond {
                panic!("Invariant violation: {}", format!($($arg)*));
            }
        }
    };
}

/// Макрос для валидации условий с возвратом ошибки.
#[macro_export]
macro_rules! validate {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Уровень узла вне допустимого диапазона.
    #[error("Node level {node_level} exceeds maximum level {max_level}")]
    InvalidLevel { node_level: usize, max_level: usize },

    /// Ссылка указывает на свободный слот арены.
    #[error("Dangling link to arena slot {index}")]
    DanglingLink { index: usize },

    /// Нарушен порядок сортировки.
    #[error("Sort order violation: {message}")]
    SortOrderViolation { message: String },

    /// Длина структуры не соответствует реальному количеству узлов.
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Обнаружена циклическая ссылка.
    #[error("Cyclic reference detected: {message}")]
    CyclicReference { message: String },

    /// Узел присутствует на уровне, но отсутствует на нижележащем.
    #[error("Level inclusion violated at level {level}: {message}")]
    LevelInclusion { level: usize, message: String },

    /// Голова ссылается на узел выше текущего уровня списка.
    #[error("Head link above current level {level}")]
    HeadAboveLevel { level: usize },

    /// Корень дерева красный.
    #[error("Root node is red")]
    RedRoot,

    /// Красный узел с красным потомком.
    #[error("Red node has a red child: {message}")]
    RedRedViolation { message: String },

    /// Пути к листьям содержат разное число чёрных узлов.
    #[error("Black height mismatch: left {left}, right {right}")]
    BlackHeightMismatch { left: usize, right: usize },

    /// Ссылка на родителя не соответствует фактическому родителю.
    #[error("Invalid parent link: {message}")]
    InvalidParentLink { message: String },
}

impl ErrorExt for ValidationError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidLevel { .. } | Self::HeadAboveLevel { .. } => StatusCode::InvalidLevel,
            Self::SortOrderViolation { .. } => StatusCode::OrderViolation,
            Self::RedRoot | Self::RedRedViolation { .. } | Self::BlackHeightMismatch { .. } => {
                StatusCode::ColorViolation
            }
            _ => StatusCode::InvariantViolation,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
