use std::any::Any;

use thiserror::Error;

use crate::{ErrorExt, StatusCode};

/// Ошибки разбора текстовых команд.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Пустая строка
    #[error("Empty command")]
    Empty,
    /// Неизвестное имя команды
    #[error("Unknown command '{name}'")]
    Unknown { name: String },
    /// Неверное число аргументов
    #[error("Wrong number of arguments for '{command}': expected {expected}, got {actual}")]
    WrongArity {
        command: &'static str,
        expected: &'static str,
        actual: usize,
    },
    /// Аргумент не является целым числом
    #[error("Argument '{value}' is not a valid integer")]
    InvalidInteger { value: String },
    /// Незакрытая кавычка
    #[error("Unbalanced quotes in '{line}'")]
    UnbalancedQuotes { line: String },
}

impl ErrorExt for CommandError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Empty | Self::UnbalancedQuotes { .. } => StatusCode::ParseError,
            Self::Unknown { .. } => StatusCode::InvalidCommand,
            Self::WrongArity { .. } => StatusCode::WrongArity,
            Self::InvalidInteger { .. } => StatusCode::InvalidInteger,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
