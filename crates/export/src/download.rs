//! Saving CSV text to disk

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::{ExportError, Result};

/// Write `csv` to `path`.
///
/// The text is staged in a temporary file next to the destination and renamed
/// into place. The staging file is removed if anything fails before the rename.
pub fn save_csv(path: impl AsRef<Path>, csv: &str) -> Result<PathBuf> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut staged = NamedTempFile::new_in(&dir)?;
    staged.write_all(csv.as_bytes())?;
    staged.flush()?;

    staged.persist(path).map_err(|e| ExportError::Persist {
        path: path.display().to_string(),
        source: e.error,
    })?;

    log::debug!("Saved {} bytes of CSV to {}", csv.len(), path.display());
    Ok(path.to_path_buf())
}
