//! Загрузка настроек (`config` + `serde`).

pub mod settings;

pub use settings::*;
