//! Command definitions and execution logic.
//!
//! Commands are organized by functionality:
//!
//! - `execute`: the [`CommandExecute`] trait and the [`Command`] dispatcher.
//! - `parse`: text line tokenizer and parser.
//! - `keys`: point operations (`SET`, `GET`, `DEL`, `EXISTS`).
//! - `range`: ordered queries (`LOWER`, `UPPER`, `FIRST`, `LAST`, `SCAN`, `RANGE`).
//! - `server`: service commands (`LEN`, `CLEAR`, `CHECK`, `ENGINE`, `HELP`).
//! - `reply`: the [`Reply`] value returned by every command.

pub mod execute;
pub mod keys;
pub mod parse;
pub mod range;
pub mod reply;
pub mod server;

// Публичный экспорт команд и вспомогательных типов из вложенных модулей,
// чтобы упростить доступ к ним из внешнего кода.
pub use execute::*;
pub use keys::*;
pub use parse::*;
pub use range::*;
pub use reply::*;
pub use server::*;
