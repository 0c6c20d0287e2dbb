//! In-place fixes for problems the validator reports.

use serde::Serialize;
use serde_json::Value;

use crate::model::{Catalog, ITEM_TYPE_KEY, ItemKind, display_id, id_of};

/// Which fixes to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrateOptions {
    /// Drop keys whose value is `null`
    pub remove_nulls: bool,
}

/// What a migration changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationSummary {
    /// `(id, inferred type)` for records that gained an `itemType`
    pub typed: Vec<(String, String)>,
    /// Ids still missing `itemType` (prefix not recognised)
    pub untyped: Vec<String>,
    /// Number of `null` keys removed
    pub nulls_removed: usize,
}

impl MigrationSummary {
    /// True when nothing was changed.
    pub fn is_noop(&self) -> bool {
        self.typed.is_empty() && self.nulls_removed == 0
    }
}

/// Item kind implied by an id prefix (`book_` and `lot_`).
pub fn infer_kind(id: &str) -> Option<ItemKind> {
    match sundry_core::util::ids::record_prefix(id)? {
        "book" => Some(ItemKind::Book),
        "lot" => Some(ItemKind::Thing),
        _ => None,
    }
}

/// Apply the selected fixes.
pub fn run(catalog: &mut Catalog, opts: MigrateOptions) -> MigrationSummary {
    let mut summary = MigrationSummary::default();

    for record in catalog.items_mut() {
        if !record.contains_key(ITEM_TYPE_KEY) {
            match id_of(record).and_then(infer_kind) {
                Some(kind) => {
                    let id = display_id(record).to_string();
                    record.insert(ITEM_TYPE_KEY.to_string(), Value::String(kind.to_string()));
                    summary.typed.push((id, kind.to_string()));
                }
                None => summary.untyped.push(display_id(record).to_string()),
            }
        }

        if opts.remove_nulls {
            let before = record.len();
            record.retain(|_, v| !v.is_null());
            summary.nulls_removed += before - record.len();
        }
    }

    log::info!(
        "Migration typed {} record(s), removed {} null value(s)",
        summary.typed.len(),
        summary.nulls_removed
    );
    summary
}
