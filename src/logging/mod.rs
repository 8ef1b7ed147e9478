//! Логирование на `tracing`.
//!
//! Подписчик собирается из фильтра ([`filters`]) и форматирующего слоя
//! ([`formatter`]). Логи пишутся в stderr, чтобы не смешиваться с ответами
//! команд в stdout.

pub mod config;
mod filters;
mod formatter;

pub use config::{LogFormat, LoggingConfig};
use ordix_error::{GenericError, OrdixResult, ResultExt, StatusCode};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Инициализация логирования с конфигурацией.
///
/// Повторная инициализация (подписчик уже установлен) возвращает ошибку.
pub fn init_logging(config: &LoggingConfig) -> OrdixResult<()> {
    config.validate().context("logging config")?;

    let env_filter = filters::build_filter_from_config(config);
    let writer: fn() -> std::io::Stderr = std::io::stderr;
    let layer = formatter::build_formatter_from_config(config, writer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layer)
        .try_init()
        .map_err(|e| GenericError::new(StatusCode::ConfigError, e.to_string()))
        .context("install tracing subscriber")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_level = %config.level,
        format = %config.format,
        "Logging system initialized"
    );

    Ok(())
}
