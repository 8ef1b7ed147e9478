//! Абстракция и диспетчеризация команд.
//!
//! Содержит трейт [`CommandExecute`] для единообразного выполнения команд и
//! enum [`Command`], объединяющий все поддерживаемые команды.

use std::time::Instant;

use ordix_error::OrdixResult;
use tracing::debug;

use super::{
    CheckCommand, ClearCommand, DelCommand, EngineCommand, ExistsCommand, FirstCommand,
    GetCommand, HelpCommand, LastCommand, LenCommand, LowerCommand, RangeCommand, Reply,
    ScanCommand, SetCommand, UpperCommand,
};
use crate::IndexEngine;

pub trait CommandExecute: std::fmt::Debug {
    /// Выполняет команду над индексом.
    ///
    /// # Возвращает
    /// - `Ok(Reply)`: результат (значение, пара, счётчик и т.д.).
    /// - `Err(StackError)`: отсутствующий ключ, пустой индекс или нарушенный
    ///   инвариант.
    fn execute(
        &self,
        engine: &mut IndexEngine,
    ) -> OrdixResult<Reply>;

    /// Возвращает имя команды для логирования.
    fn command_name(&self) -> &'static str {
        "UNKNOWN"
    }
}

/// Перечисление всех поддерживаемых команд.
///
/// Обычно получается из строки через [`Command::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(SetCommand),
    Get(GetCommand),
    Del(DelCommand),
    Exists(ExistsCommand),
    Lower(LowerCommand),
    Upper(UpperCommand),
    First(FirstCommand),
    Last(LastCommand),
    Len(LenCommand),
    Scan(ScanCommand),
    Range(RangeCommand),
    Clear(ClearCommand),
    Check(CheckCommand),
    Engine(EngineCommand),
    Help(HelpCommand),
}

impl Command {
    /// Возвращает имя команды.
    pub fn name(&self) -> &'static str {
        self.inner().command_name()
    }

    /// Возвращает ключ команды (если есть) для логирования.
    pub fn key(&self) -> Option<&str> {
        match self {
            Command::Set(cmd) => Some(&cmd.key),
            Command::Get(cmd) => Some(&cmd.key),
            Command::Del(cmd) => Some(&cmd.key),
            Command::Exists(cmd) => Some(&cmd.key),
            Command::Lower(cmd) => Some(&cmd.key),
            Command::Upper(cmd) => Some(&cmd.key),
            Command::Range(cmd) => Some(&cmd.start),
            _ => None,
        }
    }

    fn inner(&self) -> &dyn CommandExecute {
        match self {
            Command::Set(cmd) => cmd,
            Command::Get(cmd) => cmd,
            Command::Del(cmd) => cmd,
            Command::Exists(cmd) => cmd,
            Command::Lower(cmd) => cmd,
            Command::Upper(cmd) => cmd,
            Command::First(cmd) => cmd,
            Command::Last(cmd) => cmd,
            Command::Len(cmd) => cmd,
            Command::Scan(cmd) => cmd,
            Command::Range(cmd) => cmd,
            Command::Clear(cmd) => cmd,
            Command::Check(cmd) => cmd,
            Command::Engine(cmd) => cmd,
            Command::Help(cmd) => cmd,
        }
    }
}

impl CommandExecute for Command {
    fn execute(
        &self,
        engine: &mut IndexEngine,
    ) -> OrdixResult<Reply> {
        let start = Instant::now();
        let result = self.inner().execute(engine);
        let elapsed_us = start.elapsed().as_micros() as u64;

        match &result {
            Ok(_) => debug!(
                command = self.name(),
                key = self.key(),
                engine = engine.name(),
                elapsed_us,
                "Command executed"
            ),
            Err(err) => debug!(
                command = self.name(),
                key = self.key(),
                engine = engine.name(),
                elapsed_us,
                status = err.status_code().code(),
                error = %err,
                "Command failed"
            ),
        }

        result
    }

    fn command_name(&self) -> &'static str {
        self.name()
    }
}
