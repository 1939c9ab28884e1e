// ABOUTME: Writes and reads board export files in JSON or YAML.
// ABOUTME: The format is picked from the file extension; writes are atomic.

use std::fs;
use std::path::Path;

use griddeck_core::BoardData;
use thiserror::Error;

use crate::atomic::write_atomic;

/// Errors that can occur while writing or reading an export file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// On-disk encoding of an export file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
}

impl ExportFormat {
    /// `.yaml` and `.yml` (any case) mean YAML; everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => ExportFormat::Yaml,
            _ => ExportFormat::Json,
        }
    }
}

/// Write `data` to `path`, creating parent directories as needed.
pub fn write_export(path: &Path, data: &BoardData) -> Result<(), ExportError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let text = match ExportFormat::from_path(path) {
        ExportFormat::Json => serde_json::to_string_pretty(data)?,
        ExportFormat::Yaml => serde_yaml::to_string(data)?,
    };

    write_atomic(path, text.as_bytes())?;

    tracing::info!(
        cards = data.cards.len(),
        layout = data.layout.len(),
        "exported board to {}",
        path.display()
    );
    Ok(())
}

/// Read a board previously written by `write_export` or by hand.
pub fn read_import(path: &Path) -> Result<BoardData, ExportError> {
    let text = fs::read_to_string(path)?;
    let data: BoardData = match ExportFormat::from_path(path) {
        ExportFormat::Json => serde_json::from_str(&text)?,
        ExportFormat::Yaml => serde_yaml::from_str(&text)?,
    };
    tracing::info!(
        cards = data.cards.len(),
        layout = data.layout.len(),
        "read board from {}",
        path.display()
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use griddeck_core::{CardLayoutStore, MemoryStorage, NoopStorage};
    use tempfile::TempDir;

    fn sample_board() -> BoardData {
        CardLayoutStore::open(NoopStorage).unwrap().export_data()
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(ExportFormat::from_path(Path::new("b.json")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("b.YML")), ExportFormat::Yaml);
        assert_eq!(ExportFormat::from_path(Path::new("b.yaml")), ExportFormat::Yaml);
        assert_eq!(ExportFormat::from_path(Path::new("board")), ExportFormat::Json);
    }

    #[test]
    fn json_export_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("exports").join("board.json");
        let board = sample_board();

        write_export(&path, &board).unwrap();
        let loaded = read_import(&path).unwrap();

        assert_eq!(loaded, board);
        assert_eq!(fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
    }

    #[test]
    fn export_leaves_sibling_tmp_file_alone() {
        let dir = TempDir::new().unwrap();
        let sibling = dir.path().join("board.tmp");
        fs::write(&sibling, "keep me").unwrap();

        write_export(&dir.path().join("board.json"), &sample_board()).unwrap();

        assert_eq!(fs::read_to_string(&sibling).unwrap(), "keep me");
    }

    #[test]
    fn failed_export_leaves_no_partial_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("board.json");
        fs::create_dir(&target).unwrap();

        let err = write_export(&target, &sample_board()).unwrap_err();

        assert!(matches!(err, ExportError::Io(_)));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn yaml_export_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.yaml");
        let board = sample_board();

        write_export(&path, &board).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let loaded = read_import(&path).unwrap();

        assert!(text.contains("Welcome!"));
        assert!(text.contains("layout:"));
        assert_eq!(loaded, board);
    }

    #[test]
    fn json_export_uses_payload_shape() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.json");

        write_export(&path, &sample_board()).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(value["cards"].as_array().unwrap().len(), 3);
        assert_eq!(value["layout"][0]["i"], "card-1");
        assert_eq!(value["cards"][2]["title"], "Add New Cards");
    }

    #[test]
    fn import_tolerates_null_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(
            &path,
            r#"{"cards":[{"id":"card-3","title":"T","content":"C","x":0,"y":0,"w":2,"h":2,"i":"card-3"}],"layout":null}"#,
        )
        .unwrap();

        let data = read_import(&path).unwrap();
        let mut store = CardLayoutStore::open(MemoryStorage::new()).unwrap();
        store.import_data(data).unwrap();

        assert_eq!(store.card_count(), 1);
        assert!(store.layout_data().is_empty());
        assert_eq!(store.next_id(), Some(4));
    }

    #[test]
    fn import_rejects_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "not json").unwrap();

        let err = read_import(&path).unwrap_err();
        assert!(matches!(err, ExportError::Json(_)));
    }

    #[test]
    fn import_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();

        let err = read_import(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }
}
