use std::fmt;

use num_enum::TryFromPrimitive;
#[cfg(feature = "strum")]
use strum_macros::{AsRefStr, EnumIter};

/// Коды статуса для категоризации ошибок.
///
/// # Диапазоны:
/// - 0xxx: Успех
/// - 1xxx: Общие ошибки
/// - 2xxx: Ошибки данных (отсутствующий ключ, пустая структура)
/// - 3xxx: Нарушения инвариантов структур
/// - 5xxx: Конфигурация и окружение
/// - 8xxx: Ошибки разбора команд
///
/// # Реализация:
/// - `num_enum::TryFromPrimitive` даёт нативную реализацию `TryFrom<u32>`.
/// - опционально: `strum` для `AsRefStr`/`EnumIter` (feature = "strum").
#[cfg_attr(feature = "strum", derive(AsRefStr, EnumIter))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u32)]
#[non_exhaustive]
pub enum StatusCode {
    // === 0xxx: Успех ===
    Success = 0,

    // === 1xxx: Общие ошибки ===
    Unknown = 1000,
    Unsupported = 1001,
    Unexpected = 1002,
    Internal = 1003,
    InvalidArgs = 1004,
    NotImplemented = 1005,

    // === 2xxx: Ошибки данных ===
    NotFound = 2000,
    EmptyStructure = 2001,
    InvalidKey = 2002,
    InvalidValue = 2003,
    IndexOutOfBounds = 2004,

    // === 3xxx: Инварианты ===
    InvariantViolation = 3000,
    InvalidLevel = 3001,
    OrderViolation = 3002,
    ColorViolation = 3003,

    // === 5xxx: Конфигурация/окружение ===
    ConfigError = 5000,
    Io = 5001,

    // === 8xxx: Команды ===
    InvalidCommand = 8001,
    WrongArity = 8002,
    InvalidInteger = 8005,
    ParseError = 8009,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl StatusCode {
    /// Числовое представление кода статуса.
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Пытается получить вариант `StatusCode` из `u32`.
    ///
    /// Использует `TryFrom<u32>` из `num_enum`; возвращает `None`, если
    /// значение не соответствует ни одному варианту.
    pub fn from_u32(v: u32) -> Option<Self> {
        Self::try_from(v).ok()
    }

    /// Вернёт `true`, если переданный `code` означает успешный результат.
    pub fn is_success(code: u32) -> bool {
        Self::Success as u32 == code
    }

    /// Ошибка вызывающей стороны: неверный запрос или обращение к
    /// отсутствующим данным.
    pub fn is_client_error(&self) -> bool {
        let c = self.code();
        if (2000..=2999).contains(&c) || (8000..=8999).contains(&c) {
            return true;
        }
        matches!(self, Self::InvalidArgs)
    }

    /// Нарушен один из инвариантов структуры данных (диапазон 3xxx).
    ///
    /// Такие ошибки означают дефект реализации, а не ошибку пользователя.
    pub fn is_invariant_violation(&self) -> bool {
        (3000..=3999).contains(&self.code())
    }

    /// Ошибка разбора команды (диапазон 8xxx).
    pub fn is_command_error(&self) -> bool {
        (8000..=8999).contains(&self.code())
    }

    /// Требуется ли логировать как критическую ошибку.
    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Internal) || self.is_invariant_violation()
    }

    /// Рекомендуемый уровень логирования для данного кода.
    pub fn log_level(&self) -> LogLevel {
        match self {
            Self::Success => LogLevel::Trace,
            Self::NotFound | Self::EmptyStructure => LogLevel::Debug,
            Self::InvalidArgs
            | Self::InvalidKey
            | Self::InvalidValue
            | Self::InvalidCommand
            | Self::WrongArity
            | Self::InvalidInteger
            | Self::ParseError => LogLevel::Info,
            Self::ConfigError | Self::Io => LogLevel::Warn,
            _ if self.is_critical() => LogLevel::Error,
            _ => LogLevel::Warn,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для StatusCode
////////////////////////////////////////////////////////////////////////////////

impl From<StatusCode> for u32 {
    fn from(c: StatusCode) -> Self {
        c.code()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        #[cfg(feature = "strum")]
        {
            write!(f, "{} ({})", self.as_ref(), self.code())
        }
        #[cfg(not(feature = "strum"))]
        {
            write!(f, "{:?} ({})", self, self.code())
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    /// Тест проверяет разделение клиентских ошибок и нарушений инвариантов.
    #[test]
    fn test_client_vs_invariant() {
        assert!(StatusCode::NotFound.is_client_error());
        assert!(StatusCode::EmptyStructure.is_client_error());
        assert!(StatusCode::WrongArity.is_client_error());
        assert!(StatusCode::InvalidArgs.is_client_error());
        assert!(!StatusCode::ColorViolation.is_client_error());

        assert!(StatusCode::ColorViolation.is_invariant_violation());
        assert!(StatusCode::InvalidLevel.is_invariant_violation());
        assert!(!StatusCode::NotFound.is_invariant_violation());
    }

    /// Тест проверяет конвертацию через `TryFrom<u32>` и вспомогательную
    /// `from_u32`.
    #[test]
    fn test_from_try_from_u32() {
        let n = StatusCode::EmptyStructure.code();
        assert_eq!(StatusCode::try_from(n).unwrap(), StatusCode::EmptyStructure);
        assert!(StatusCode::from_u32(99999).is_none());
    }

    #[test]
    fn test_code_and_into() {
        let c = StatusCode::NotFound;
        assert_eq!(c.code(), 2000);
        let n: u32 = c.into();
        assert_eq!(n, 2000);
        assert!(StatusCode::is_success(StatusCode::Success.code()));
        assert!(!StatusCode::is_success(StatusCode::NotFound.code()));
    }

    #[test]
    fn test_is_command_error() {
        assert!(StatusCode::InvalidCommand.is_command_error());
        assert!(StatusCode::ParseError.is_command_error());
        assert!(!StatusCode::NotFound.is_command_error());
    }

    /// Тест проверяет, что критические ошибки помечаются корректно.
    #[test]
    fn test_is_critical() {
        assert!(StatusCode::Internal.is_critical());
        assert!(StatusCode::OrderViolation.is_critical());
        assert!(!StatusCode::NotFound.is_critical());
        assert!(!StatusCode::ConfigError.is_critical());
    }

    #[test]
    fn test_log_level_mappings() {
        assert_eq!(StatusCode::Success.log_level(), LogLevel::Trace);
        assert_eq!(StatusCode::NotFound.log_level(), LogLevel::Debug);
        assert_eq!(StatusCode::WrongArity.log_level(), LogLevel::Info);
        assert_eq!(StatusCode::ConfigError.log_level(), LogLevel::Warn);
        assert_eq!(StatusCode::ColorViolation.log_level(), LogLevel::Error);
        assert_eq!(StatusCode::Internal.log_level(), LogLevel::Error);
    }

    /// Тест проверяет формат `Display`: строка должна содержать имя варианта и
    /// числовой код.
    #[test]
    fn test_display_contains_name_and_code() {
        let s = format!("{}", StatusCode::EmptyStructure);
        assert!(
            s.contains("2001"),
            "Display must contain code 2001, got: {s}"
        );
        assert!(
            s.contains("EmptyStructure"),
            "Display must contain variant name 'EmptyStructure', got: {s}"
        );
    }
}
