// ABOUTME: Crash-safe whole-file writes shared by the file store and export files.
// ABOUTME: Content goes to a uniquely named temp file in the target directory, is fsynced, then renamed over the target.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Replace `path` with `contents` atomically. On any failure the temp file
/// is deleted and `path` keeps its previous contents.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}
