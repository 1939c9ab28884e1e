// ABOUTME: Durable storage layer for griddeck, backing the card store with files or SQLite.
// ABOUTME: Also provides JSON/YAML board export files and environment-driven configuration.

mod atomic;
pub mod config;
pub mod export;
pub mod file;
pub mod sqlite;

pub use config::{BackendKind, ConfigError, GriddeckConfig};
pub use export::{ExportError, ExportFormat, read_import, write_export};
pub use file::FileStorage;
pub use sqlite::SqliteStorage;
