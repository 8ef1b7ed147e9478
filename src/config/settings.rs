use std::{fmt, path::Path, str::FromStr};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::logging::LoggingConfig;

/// Реализация упорядоченного индекса.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    #[default]
    SkipList,
    RbTree,
}

/// Порядок ключей индекса.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyOrderKind {
    #[default]
    Natural,
    Reverse,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub engine: EngineKind,
    pub order: KeyOrderKind,
    /// Зерно генератора уровней skip list; `None`: энтропия ОС.
    pub seed: Option<u64>,
    pub logging: LoggingConfig,
}

impl Settings {
    /// Загружает настройки: значения по умолчанию, затем переменные окружения
    /// `ORDIX_*` (вложенные поля через `__`, например `ORDIX_LOGGING__LEVEL`).
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder(None)?.build()?.try_deserialize()
    }

    /// Как [`Settings::load`], но между значениями по умолчанию и окружением
    /// читает TOML-файл.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::builder(Some(path))?.build()?.try_deserialize()
    }

    fn builder(
        path: Option<&Path>
    ) -> Result<config::builder::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let defaults = Settings::default();

        let mut builder = Config::builder()
            // Добавляем значения по умолчанию
            .set_default("engine", defaults.engine.to_string())?
            .set_default("order", defaults.order.to_string())?
            .set_default("logging.level", defaults.logging.level.clone())?
            .set_default("logging.format", defaults.logging.format.to_string())?
            .set_default("logging.with_ansi", defaults.logging.with_ansi)?
            .set_default("logging.with_target", defaults.logging.with_target)?
            .set_default("logging.with_line_numbers", defaults.logging.with_line_numbers)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        // Добавляем переменные окружения с префиксом ORDIX_
        Ok(builder.add_source(
            Environment::with_prefix("ORDIX")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        ))
    }
}

impl fmt::Display for EngineKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(match self {
            Self::SkipList => "skiplist",
            Self::RbTree => "rbtree",
        })
    }
}

impl FromStr for EngineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "skiplist" | "skip_list" => Ok(Self::SkipList),
            "rbtree" | "rb_tree" => Ok(Self::RbTree),
            other => Err(format!("unknown engine '{other}' (expected skiplist or rbtree)")),
        }
    }
}

impl fmt::Display for KeyOrderKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(match self {
            Self::Natural => "natural",
            Self::Reverse => "reverse",
        })
    }
}

impl FromStr for KeyOrderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "natural" => Ok(Self::Natural),
            "reverse" => Ok(Self::Reverse),
            other => Err(format!("unknown key order '{other}' (expected natural or reverse)")),
        }
    }
}
