//! Whole-file catalog persistence.

use std::path::Path;

use crate::model::Catalog;
use crate::{Error, Result};

/// Read and parse the catalog at `path`.
pub fn load(path: &Path) -> Result<Catalog> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        let err = sundry_core::Error::io_with_path(e, path);
        if err.is_not_found() {
            Error::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            err.into()
        }
    })?;
    let catalog: Catalog = serde_json::from_str(&text).map_err(|source| Error::InvalidJson {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Loaded {} records from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Render the catalog as pretty JSON (2-space indent, non-ASCII kept
/// literal, trailing newline).
pub fn to_pretty_json(catalog: &Catalog) -> Result<String> {
    let mut text = serde_json::to_string_pretty(catalog).map_err(sundry_core::Error::from)?;
    text.push('\n');
    Ok(text)
}

/// Replace the catalog file at `path`.
pub fn save(path: &Path, catalog: &Catalog) -> Result<()> {
    let text = to_pretty_json(catalog)?;
    sundry_core::write_atomic(path, text.as_bytes())?;
    log::info!("Saved {} records to {}", catalog.len(), path.display());
    Ok(())
}
