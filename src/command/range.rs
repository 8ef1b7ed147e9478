//! Упорядоченные запросы: LOWER, UPPER, FIRST, LAST, SCAN, RANGE.
//!
//! Все команды учитывают порядок ключей индекса: при обратном порядке
//! FIRST возвращает лексикографически наибольший ключ.

use ordix_error::{CollectionError, OrdixResult};

use super::{CommandExecute, Reply};
use crate::IndexEngine;

/// Команда LOWER: первая пара с ключом не меньше заданного.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowerCommand {
    pub key: String,
}

impl CommandExecute for LowerCommand {
    fn execute(
        &self,
        engine: &mut IndexEngine,
    ) -> OrdixResult<Reply> {
        Ok(Reply::optional_entry(
            engine.get_store().lower_bound(&self.key),
        ))
    }

    fn command_name(&self) -> &'static str {
        "LOWER"
    }
}

/// Команда UPPER: первая пара с ключом строго больше заданного.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpperCommand {
    pub key: String,
}

impl CommandExecute for UpperCommand {
    fn execute(
        &self,
        engine: &mut IndexEngine,
    ) -> OrdixResult<Reply> {
        Ok(Reply::optional_entry(
            engine.get_store().upper_bound(&self.key),
        ))
    }

    fn command_name(&self) -> &'static str {
        "UPPER"
    }
}

/// Команда FIRST: минимальная пара; на пустом индексе ошибка.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirstCommand;

impl CommandExecute for FirstCommand {
    fn execute(
        &self,
        engine: &mut IndexEngine,
    ) -> OrdixResult<Reply> {
        let (key, value) = engine
            .get_store()
            .first()
            .ok_or(CollectionError::EmptyStructure { operation: "FIRST" })?;
        Ok(Reply::entry(key, value))
    }

    fn command_name(&self) -> &'static str {
        "FIRST"
    }
}

/// Команда LAST: максимальная пара; на пустом индексе ошибка.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastCommand;

impl CommandExecute for LastCommand {
    fn execute(
        &self,
        engine: &mut IndexEngine,
    ) -> OrdixResult<Reply> {
        let (key, value) = engine
            .get_store()
            .last()
            .ok_or(CollectionError::EmptyStructure { operation: "LAST" })?;
        Ok(Reply::entry(key, value))
    }

    fn command_name(&self) -> &'static str {
        "LAST"
    }
}

/// Команда SCAN: обход по порядку, не более `limit` пар.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanCommand {
    pub limit: Option<usize>,
}

impl CommandExecute for ScanCommand {
    fn execute(
        &self,
        engine: &mut IndexEngine,
    ) -> OrdixResult<Reply> {
        let entries = engine.get_store().entries();
        Ok(match self.limit {
            Some(limit) => Reply::entries(entries.take(limit)),
            None => Reply::entries(entries),
        })
    }

    fn command_name(&self) -> &'static str {
        "SCAN"
    }
}

/// Команда RANGE: пары с ключами из полуинтервала `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeCommand {
    pub start: String,
    pub end: String,
}

impl CommandExecute for RangeCommand {
    fn execute(
        &self,
        engine: &mut IndexEngine,
    ) -> OrdixResult<Reply> {
        Ok(Reply::entries(
            engine.get_store().range(&self.start, &self.end),
        ))
    }

    fn command_name(&self) -> &'static str {
        "RANGE"
    }
}
