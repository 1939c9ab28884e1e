// ABOUTME: Configuration loading for griddeck from environment variables.
// ABOUTME: Chooses the data directory and which storage backend the card store persists into.

use std::path::PathBuf;
use std::str::FromStr;

use griddeck_core::{KeyValueStore, NoopStorage, StorageError};
use thiserror::Error;

use crate::file::FileStorage;
use crate::sqlite::SqliteStorage;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GRIDDECK_BACKEND must be one of file, sqlite, none; got {0:?}")]
    UnknownBackend(String),
}

/// Which storage backend to persist into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    File,
    Sqlite,
    None,
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(BackendKind::File),
            "sqlite" => Ok(BackendKind::Sqlite),
            "none" => Ok(BackendKind::None),
            _ => Err(ConfigError::UnknownBackend(s.to_string())),
        }
    }
}

/// Settings loaded from environment variables.
#[derive(Debug, Clone)]
pub struct GriddeckConfig {
    pub home: PathBuf,
    pub backend: BackendKind,
}

impl GriddeckConfig {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// Environment variables:
    /// - GRIDDECK_HOME: data directory (default: ~/.griddeck)
    /// - GRIDDECK_BACKEND: file, sqlite, or none (default: file)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let home = lookup("GRIDDECK_HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                lookup("HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
                    .join(".griddeck")
            });

        let backend = match lookup("GRIDDECK_BACKEND").filter(|b| !b.is_empty()) {
            Some(raw) => raw.parse()?,
            None => BackendKind::File,
        };

        Ok(Self { home, backend })
    }

    /// Directory used by the file backend.
    pub fn storage_dir(&self) -> PathBuf {
        self.home.join("storage")
    }

    /// Database used by the sqlite backend.
    pub fn db_path(&self) -> PathBuf {
        self.home.join("griddeck.db")
    }

    /// Open the configured backend.
    pub fn open_storage(&self) -> Result<Box<dyn KeyValueStore>, StorageError> {
        Ok(match self.backend {
            BackendKind::File => Box::new(FileStorage::open(&self.storage_dir())?),
            BackendKind::Sqlite => Box::new(SqliteStorage::open(&self.db_path())?),
            BackendKind::None => Box::new(NoopStorage),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use tempfile::TempDir;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn config_loads_defaults() {
        let config = GriddeckConfig::from_lookup(lookup_from(&[("HOME", "/home/dana")])).unwrap();

        assert_eq!(config.home, PathBuf::from("/home/dana/.griddeck"));
        assert_eq!(config.backend, BackendKind::File);
        assert_eq!(config.storage_dir(), PathBuf::from("/home/dana/.griddeck/storage"));
    }

    #[test]
    fn config_falls_back_to_tmp_without_home() {
        let config = GriddeckConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.home, PathBuf::from("/tmp/.griddeck"));
    }

    #[test]
    fn config_reads_overrides() {
        let config = GriddeckConfig::from_lookup(lookup_from(&[
            ("GRIDDECK_HOME", "/srv/deck"),
            ("GRIDDECK_BACKEND", "SQLite"),
        ]))
        .unwrap();

        assert_eq!(config.home, PathBuf::from("/srv/deck"));
        assert_eq!(config.backend, BackendKind::Sqlite);
        assert_eq!(config.db_path(), PathBuf::from("/srv/deck/griddeck.db"));
    }

    #[test]
    fn config_rejects_unknown_backend() {
        let result = GriddeckConfig::from_lookup(lookup_from(&[("GRIDDECK_BACKEND", "redis")]));

        let err = result.unwrap_err();
        assert!(
            err.to_string().contains("redis"),
            "error should name the bad value: {}",
            err
        );
    }

    #[test]
    fn open_storage_matches_backend() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().to_string_lossy().to_string();

        for (name, persistent) in [("file", true), ("sqlite", true), ("none", false)] {
            let config = GriddeckConfig::from_lookup(lookup_from(&[
                ("GRIDDECK_HOME", home.as_str()),
                ("GRIDDECK_BACKEND", name),
            ]))
            .unwrap();

            let storage = config.open_storage().unwrap();
            assert_eq!(storage.is_persistent(), persistent, "backend {name}");
        }

        assert!(dir.path().join("storage").is_dir());
        assert!(dir.path().join("griddeck.db").exists());
    }
}
