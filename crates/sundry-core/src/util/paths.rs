//! Path helpers: tilde expansion and whole-file atomic writes.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Expand a leading `~` (and `$VAR` references) in a path string.
///
/// Falls back to the literal input when expansion fails, e.g. an unset
/// variable.
pub fn expand_tilde(path: &str) -> PathBuf {
    match shellexpand::full(path) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(path),
    }
}

/// Write `contents` to `path` by writing a sibling temp file and renaming
/// it over the target.
///
/// Parent directories are created. A reader never observes a partially
/// written file.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent).map_err(|e| Error::io_with_path(e, &parent))?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::config(format!("Not a file path: {}", path.display())))?;
    let tmp = parent.join(format!(".{file_name}.tmp"));

    {
        let mut file = std::fs::File::create(&tmp).map_err(|e| Error::io_with_path(e, &tmp))?;
        file.write_all(contents)
            .map_err(|e| Error::io_with_path(e, &tmp))?;
        file.sync_all().map_err(|e| Error::io_with_path(e, &tmp))?;
    }
    std::fs::rename(&tmp, path).map_err(|e| Error::io_with_path(e, path))?;
    log::debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}
