//! Точечные команды над ключами: SET, GET, DEL, EXISTS.

use ordix_error::{CollectionError, OrdixResult};

use super::{CommandExecute, Reply};
use crate::IndexEngine;

/// Команда SET: вставляет пару или обновляет значение существующего ключа.
///
/// Возвращает `(integer) 1` для нового ключа и `(integer) 0` при обновлении.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCommand {
    pub key: String,
    pub value: String,
}

impl CommandExecute for SetCommand {
    fn execute(
        &self,
        engine: &mut IndexEngine,
    ) -> OrdixResult<Reply> {
        let previous = engine
            .get_store_mut()
            .insert(self.key.clone(), self.value.clone());
        Ok(Reply::Integer(i64::from(previous.is_none())))
    }

    fn command_name(&self) -> &'static str {
        "SET"
    }
}

/// Команда GET: возвращает значение по ключу.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCommand {
    pub key: String,
}

impl CommandExecute for GetCommand {
    fn execute(
        &self,
        engine: &mut IndexEngine,
    ) -> OrdixResult<Reply> {
        match engine.get_store().get(&self.key) {
            Some(value) => Ok(Reply::Bulk(value.clone())),
            None => Err(CollectionError::NotFound {
                key: self.key.clone(),
            }
            .into()),
        }
    }

    fn command_name(&self) -> &'static str {
        "GET"
    }
}

/// Команда DEL: удаляет ключ и возвращает удалённое значение.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelCommand {
    pub key: String,
}

impl CommandExecute for DelCommand {
    fn execute(
        &self,
        engine: &mut IndexEngine,
    ) -> OrdixResult<Reply> {
        match engine.get_store_mut().remove(&self.key) {
            Some(value) => Ok(Reply::Bulk(value)),
            None => Err(CollectionError::NotFound {
                key: self.key.clone(),
            }
            .into()),
        }
    }

    fn command_name(&self) -> &'static str {
        "DEL"
    }
}

/// Команда EXISTS: `(integer) 1`, если ключ есть, иначе `(integer) 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistsCommand {
    pub key: String,
}

impl CommandExecute for ExistsCommand {
    fn execute(
        &self,
        engine: &mut IndexEngine,
    ) -> OrdixResult<Reply> {
        let exists = engine.get_store().contains_key(&self.key);
        Ok(Reply::Integer(i64::from(exists)))
    }

    fn command_name(&self) -> &'static str {
        "EXISTS"
    }
}
