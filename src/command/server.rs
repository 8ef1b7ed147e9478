//! Служебные команды: LEN, CLEAR, CHECK, ENGINE, HELP.

use ordix_error::{OrdixResult, ResultExt};

use super::{CommandExecute, Reply};
use crate::IndexEngine;

/// Краткая справка по командам (HELP).
pub const HELP_TEXT: &str = "\
SET key value      insert or update; (integer) 1 when the key is new
GET key            value stored under key
DEL key            remove key and return its value
EXISTS key         (integer) 1 if key is present
LOWER key          first entry with key >= given
UPPER key          first entry with key > given
FIRST | LAST       smallest | largest entry
LEN                number of entries
SCAN [limit]       entries in key order
RANGE start end    entries with start <= key < end
CLEAR              remove all entries
CHECK              verify structural invariants
ENGINE             engine name and shape statistics
HELP               this text";

/// Команда LEN: количество пар в индексе.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LenCommand;

impl CommandExecute for LenCommand {
    fn execute(
        &self,
        engine: &mut IndexEngine,
    ) -> OrdixResult<Reply> {
        Ok(Reply::Integer(engine.get_store().len() as i64))
    }

    fn command_name(&self) -> &'static str {
        "LEN"
    }
}

/// Команда CLEAR: удаляет все пары.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearCommand;

impl CommandExecute for ClearCommand {
    fn execute(
        &self,
        engine: &mut IndexEngine,
    ) -> OrdixResult<Reply> {
        engine.get_store_mut().clear();
        Ok(Reply::Ok)
    }

    fn command_name(&self) -> &'static str {
        "CLEAR"
    }
}

/// Команда CHECK: полная проверка структурных инвариантов.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckCommand;

impl CommandExecute for CheckCommand {
    fn execute(
        &self,
        engine: &mut IndexEngine,
    ) -> OrdixResult<Reply> {
        let name = engine.name();
        engine
            .check()
            .with_context(|| format!("{name} invariant check"))?;
        Ok(Reply::Ok)
    }

    fn command_name(&self) -> &'static str {
        "CHECK"
    }
}

/// Команда ENGINE: имя реализации и статистика формы структуры.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineCommand;

impl CommandExecute for EngineCommand {
    fn execute(
        &self,
        engine: &mut IndexEngine,
    ) -> OrdixResult<Reply> {
        Ok(Reply::Text(engine.summary()))
    }

    fn command_name(&self) -> &'static str {
        "ENGINE"
    }
}

/// Команда HELP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpCommand;

impl CommandExecute for HelpCommand {
    fn execute(
        &self,
        _engine: &mut IndexEngine,
    ) -> OrdixResult<Reply> {
        Ok(Reply::Text(HELP_TEXT.to_string()))
    }

    fn command_name(&self) -> &'static str {
        "HELP"
    }
}
