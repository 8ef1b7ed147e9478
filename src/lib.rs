/// Text commands (SET, GET, RANGE, etc.) executed against an index engine.
pub mod command;
/// Settings loading: defaults, TOML file, `ORDIX_*` environment.
pub mod config;
/// Ordered data structures: skip list, red-black tree, comparators.
pub mod database;
/// Runtime selection of the index implementation.
pub mod engine;
/// Structured logging on top of `tracing`.
pub mod logging;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

/// Command parsing and execution.
pub use command::{Command, CommandExecute, Reply};
/// config
pub use config::{EngineKind, KeyOrderKind, Settings};
/// Data structures and the shared ordered-map contract.
pub use database::{
    Arena, Color, CompareFn, Comparator, DynComparator, FixedLevels, GeometricLevels, KeyOrder,
    LessFn, LevelSource, NaturalOrder, NodeId, OrderedMap, RbTree, RbTreeMap,
    RbTreeStatistics, Reverse, SequenceLevels, SkipList, SkipListStatistics, ValidationError,
    MAX_LEVEL,
};
/// Index engine dispatch.
pub use engine::IndexEngine;
/// Logging setup.
pub use logging::{init_logging, LogFormat, LoggingConfig};
/// Error types and result alias.
pub use ordix_error::{CollectionError, CommandError, OrdixResult, StackError, StatusCode};
