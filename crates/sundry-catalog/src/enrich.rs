//! Batch enrichment: splice hand-written `details` objects into the
//! records whose ids they are keyed by.
//!
//! A batch lives in its own JSON file:
//!
//! ```json
//! {
//!   "name": "Batch 1",
//!   "details": {
//!     "book_001": {"authorBio": "...", "awards": ["..."]},
//!     "lot_001": {"whatsIncluded": ["..."], "depositAmount": 35.0}
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{Catalog, DETAILS_KEY, ItemKind, id_of, kind_of, title_of};
use crate::{Error, Result};

/// A named set of details keyed by record id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailBatch {
    /// Label used in summaries
    #[serde(default)]
    pub name: String,
    /// `details` object per record id
    pub details: BTreeMap<String, Map<String, Value>>,
}

impl DetailBatch {
    /// Load a batch file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| sundry_core::Error::io_with_path(e, path))?;
        let mut batch: DetailBatch = serde_json::from_str(&text).map_err(|e| Error::Batch {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if batch.details.is_empty() {
            return Err(Error::Batch {
                path: path.to_path_buf(),
                message: "batch has no details".to_string(),
            });
        }
        if batch.name.is_empty() {
            batch.name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("batch")
                .to_string();
        }
        Ok(batch)
    }
}

/// What an enrichment run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnrichSummary {
    /// Batch name
    pub batch: String,
    /// `(id, title)` of every record that received details
    pub updated: Vec<(String, String)>,
    /// Updated records that are books
    pub books: usize,
    /// Updated records that are things or equipment
    pub things: usize,
    /// Batch ids with no matching record
    pub unmatched: Vec<String>,
    /// Records with details after the run
    pub with_details: usize,
    /// Records in the catalog
    pub total: usize,
}

/// Apply `batch` to `catalog`, replacing any existing details.
///
/// Records are never added or removed. Every record with a matching id
/// is updated, so duplicate ids all receive the same details.
pub fn apply(catalog: &mut Catalog, batch: &DetailBatch) -> EnrichSummary {
    let mut summary = EnrichSummary {
        batch: batch.name.clone(),
        ..Default::default()
    };
    let mut matched = std::collections::BTreeSet::new();

    for record in catalog.items_mut() {
        let Some(id) = id_of(record).map(str::to_string) else {
            continue;
        };
        let Some(details) = batch.details.get(&id) else {
            continue;
        };
        record.insert(DETAILS_KEY.to_string(), Value::Object(details.clone()));
        match kind_of(record) {
            Some(ItemKind::Book) => summary.books += 1,
            Some(kind) if kind.is_thing_like() => summary.things += 1,
            _ => {}
        }
        log::debug!("Added details to {id}");
        summary.updated.push((id.clone(), title_of(record).to_string()));
        matched.insert(id);
    }

    summary.unmatched = batch
        .details
        .keys()
        .filter(|id| !matched.contains(*id))
        .cloned()
        .collect();
    for id in &summary.unmatched {
        log::warn!("Batch '{}' has details for unknown id {id}", batch.name);
    }
    summary.with_details = catalog.with_details();
    summary.total = catalog.len();
    summary
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_catalog() -> Catalog {
        serde_json::from_value(json!([
            {"id": "book_001", "title": "The Thursday Murder Club", "itemType": "book"},
            {"id": "lot_001", "title": "Telescope", "itemType": "thing"},
            {"id": "lot_002", "title": "Drill", "itemType": "equipment",
             "details": {"howToUse": "old"}}
        ]))
        .unwrap()
    }

    fn batch(v: Value) -> DetailBatch {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_apply_sets_details_and_counts_kinds() {
        let mut catalog = sample_catalog();
        let summary = apply(
            &mut catalog,
            &batch(json!({
                "name": "Batch 1",
                "details": {
                    "book_001": {"funFacts": ["written on a train"]},
                    "lot_002": {"howToUse": "new"}
                }
            })),
        );
        assert_eq!(summary.books, 1);
        assert_eq!(summary.things, 1);
        assert!(summary.unmatched.is_empty());
        assert_eq!(summary.with_details, 2);
        assert_eq!(summary.total, 3);
        assert_eq!(
            catalog.get("lot_002").unwrap()["details"]["howToUse"],
            json!("new")
        );
        assert_eq!(
            summary.updated[0],
            ("book_001".to_string(), "The Thursday Murder Club".to_string())
        );
    }

    #[test]
    fn test_apply_reports_unmatched_ids() {
        let mut catalog = sample_catalog();
        let summary = apply(
            &mut catalog,
            &batch(json!({"details": {"book_404": {"awards": []}}})),
        );
        assert_eq!(summary.unmatched, vec!["book_404"]);
        assert!(summary.updated.is_empty());
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_load_names_batch_after_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("batch4.json");
        std::fs::write(&path, r#"{"details": {"book_001": {"awards": []}}}"#).unwrap();
        assert_eq!(DetailBatch::load(&path).unwrap().name, "batch4");
    }

    #[test]
    fn test_load_rejects_empty_batch() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("empty.json");
        std::fs::write(&path, r#"{"details": {}}"#).unwrap();
        let err = DetailBatch::load(&path).unwrap_err();
        assert!(err.to_string().contains("no details"));
    }

    #[test]
    fn test_load_rejects_non_object_details() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"details": {"book_001": 3}}"#).unwrap();
        assert!(matches!(DetailBatch::load(&path), Err(Error::Batch { .. })));
    }
}
