//! Catalog structure and integrity checks.
//!
//! The validator reports; it never edits. Problems fall in two classes:
//!
//! - **critical**: missing `itemType`, duplicate ids, missing required
//!   fields, wrongly typed fields
//! - **warnings**: duplicate ISBNs and `null` values (fixable with
//!   [`crate::migrate`])

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;
use serde_json::Value;

use crate::model::{Catalog, ITEM_TYPE_KEY, display_id, id_of};

const LIST_LIMIT: usize = 10;
const ISBN_LIMIT: usize = 5;
const NULL_EXAMPLES: usize = 3;
const RULE: &str = "================================================================================";

/// Which fields must be present.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRules {
    /// Fields every record must carry
    pub required_fields: Vec<String>,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            required_fields: ["id", "title", "formats", "description"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// A required field absent from a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingField {
    /// Record id (`UNKNOWN` if absent)
    pub id: String,
    /// Missing field
    pub field: String,
}

/// A field holding the wrong JSON type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeIssue {
    /// Record id (`UNKNOWN` if absent)
    pub id: String,
    /// Description, e.g. `formats should be list`
    pub problem: String,
}

/// Everything the validator found.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Number of records
    pub total_items: usize,
    /// Ids of records without `itemType`
    pub missing_item_type: Vec<String>,
    /// Record count per `itemType` (`MISSING` for absent)
    pub type_counts: BTreeMap<String, usize>,
    /// Ids occurring more than once, with their count
    pub duplicate_ids: BTreeMap<String, usize>,
    /// ISBNs shared by several records
    pub duplicate_isbns: BTreeMap<String, Vec<String>>,
    /// Per field, the ids of records where it is `null`
    pub null_fields: BTreeMap<String, Vec<String>>,
    /// Required fields that are absent
    pub missing_required: Vec<MissingField>,
    /// Wrongly typed fields
    pub type_errors: Vec<TypeIssue>,
}

/// Validate with the default rules.
pub fn validate(catalog: &Catalog) -> ValidationReport {
    validate_with(catalog, &ValidationRules::default())
}

/// Validate a catalog.
pub fn validate_with(catalog: &Catalog, rules: &ValidationRules) -> ValidationReport {
    let mut report = ValidationReport {
        total_items: catalog.len(),
        ..Default::default()
    };
    let mut id_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut isbns: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for record in catalog.items() {
        let id = display_id(record).to_string();

        match record.get(ITEM_TYPE_KEY) {
            Some(kind) => {
                let label = kind.as_str().map(str::to_string).unwrap_or_else(|| kind.to_string());
                *report.type_counts.entry(label).or_default() += 1;
            }
            None => {
                report.missing_item_type.push(id.clone());
                *report.type_counts.entry("MISSING".to_string()).or_default() += 1;
            }
        }

        if let Some(real_id) = id_of(record) {
            *id_counts.entry(real_id.to_string()).or_default() += 1;
        }

        match record.get("isbn") {
            None | Some(Value::Null) => {}
            Some(Value::String(s)) => isbns.entry(s.clone()).or_default().push(id.clone()),
            Some(other) => isbns.entry(other.to_string()).or_default().push(id.clone()),
        }

        for (key, value) in record {
            if value.is_null() {
                report.null_fields.entry(key.clone()).or_default().push(id.clone());
            }
        }

        for field in &rules.required_fields {
            if !record.contains_key(field) {
                report.missing_required.push(MissingField {
                    id: id.clone(),
                    field: field.clone(),
                });
            }
        }

        check_types(record, &id, &mut report.type_errors);
    }

    report.duplicate_ids = id_counts.into_iter().filter(|(_, n)| *n > 1).collect();
    report.duplicate_isbns = isbns.into_iter().filter(|(_, ids)| ids.len() > 1).collect();

    log::debug!(
        "Validated {} records: {} critical issue(s)",
        report.total_items,
        report.critical_issues()
    );
    report
}

fn check_types(record: &crate::Record, id: &str, out: &mut Vec<TypeIssue>) {
    let mut push = |problem: &str| {
        out.push(TypeIssue {
            id: id.to_string(),
            problem: problem.to_string(),
        })
    };

    if !record.get("id").is_some_and(Value::is_string) {
        push("id should be string");
    }
    if !record.get("title").is_some_and(Value::is_string) {
        push("title should be string");
    }
    if !record.get("formats").is_some_and(Value::is_array) {
        push("formats should be list");
    }
    if let Some(rating) = record.get("rating")
        && !rating.is_null()
        && !rating.is_number()
    {
        push("rating should be number");
    }
    if let Some(popular) = record.get("popular")
        && !popular.is_boolean()
    {
        push("popular should be boolean");
    }
}

impl ValidationReport {
    /// Count of problems that make the catalog invalid.
    pub fn critical_issues(&self) -> usize {
        self.missing_item_type.len()
            + self.duplicate_ids.len()
            + self.missing_required.len()
            + self.type_errors.len()
    }

    /// Total `null` values across all fields.
    pub fn null_values(&self) -> usize {
        self.null_fields.values().map(Vec::len).sum()
    }

    /// True when there are no critical issues.
    pub fn is_valid(&self) -> bool {
        self.critical_issues() == 0
    }

    /// The sectioned console report.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out).map(|()| out).unwrap_or_default()
    }

    fn render_into(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "{RULE}\nCATALOG VALIDATION REPORT\n{RULE}")?;
        writeln!(out, "✅ JSON is valid")?;
        writeln!(out, "📊 Total items: {}", self.total_items)?;

        writeln!(out, "\n1️⃣  ITEM TYPE CHECK")?;
        if self.missing_item_type.is_empty() {
            writeln!(out, "   ✅ All items have itemType")?;
        } else {
            writeln!(out, "   ❌ {} items missing itemType:", self.missing_item_type.len())?;
            write_truncated(out, self.missing_item_type.iter().map(String::as_str), LIST_LIMIT)?;
        }

        writeln!(out, "\n2️⃣  ITEM TYPE DISTRIBUTION")?;
        for (kind, count) in &self.type_counts {
            let icon = if kind == "MISSING" {
                "❓"
            } else {
                crate::ItemKind::parse(kind).icon()
            };
            writeln!(out, "   {icon} {kind}: {count} items")?;
        }

        writeln!(out, "\n3️⃣  DUPLICATE ID CHECK")?;
        if self.duplicate_ids.is_empty() {
            writeln!(out, "   ✅ No duplicate IDs")?;
        } else {
            writeln!(out, "   ❌ Found {} duplicate IDs:", self.duplicate_ids.len())?;
            for (id, count) in &self.duplicate_ids {
                writeln!(out, "      • {id}: appears {count} times")?;
            }
        }

        writeln!(out, "\n4️⃣  DUPLICATE ISBN CHECK")?;
        if self.duplicate_isbns.is_empty() {
            writeln!(out, "   ✅ No duplicate ISBNs")?;
        } else {
            writeln!(out, "   ⚠️  Found {} duplicate ISBNs:", self.duplicate_isbns.len())?;
            for (isbn, ids) in self.duplicate_isbns.iter().take(ISBN_LIMIT) {
                writeln!(out, "      • {isbn}: {}", ids.join(", "))?;
            }
        }

        writeln!(out, "\n5️⃣  NULL FIELD CHECK")?;
        if self.null_fields.is_empty() {
            writeln!(out, "   ✅ No null fields")?;
        } else {
            writeln!(out, "   ⚠️  Found {} null values:", self.null_values())?;
            for (field, ids) in &self.null_fields {
                writeln!(out, "      • {field}: {} items", ids.len())?;
                let sample: Vec<&str> = ids.iter().take(NULL_EXAMPLES).map(String::as_str).collect();
                writeln!(out, "        Examples: {}", sample.join(", "))?;
            }
        }

        writeln!(out, "\n6️⃣  REQUIRED FIELD CHECK")?;
        if self.missing_required.is_empty() {
            writeln!(out, "   ✅ All items have required fields")?;
        } else {
            writeln!(out, "   ❌ Missing required fields:")?;
            for m in self.missing_required.iter().take(LIST_LIMIT) {
                writeln!(out, "      • {}: missing '{}'", m.id, m.field)?;
            }
        }

        writeln!(out, "\n7️⃣  DATA TYPE CHECK")?;
        if self.type_errors.is_empty() {
            writeln!(out, "   ✅ All data types correct")?;
        } else {
            writeln!(out, "   ❌ Type errors:")?;
            for t in self.type_errors.iter().take(LIST_LIMIT) {
                writeln!(out, "      • {}: {}", t.id, t.problem)?;
            }
        }

        writeln!(out, "\n{RULE}\nSUMMARY\n{RULE}")?;
        if self.is_valid() {
            writeln!(out, "✅ CATALOG IS VALID - NO CRITICAL ISSUES")?;
            writeln!(out, "   Total items: {}", self.total_items)?;
            writeln!(out, "   Item types: {}", self.type_counts.len())?;
            if !self.null_fields.is_empty() {
                writeln!(
                    out,
                    "   ⚠️  Contains {} null values (consider migrating)",
                    self.null_values()
                )?;
            }
        } else {
            writeln!(out, "❌ FOUND {} CRITICAL ISSUE(S)", self.critical_issues())?;
            writeln!(out, "\nRECOMMENDATIONS:")?;
            if !self.missing_item_type.is_empty() {
                writeln!(out, "  • Run: sundry catalog migrate")?;
            }
            if !self.null_fields.is_empty() {
                writeln!(out, "  • Run: sundry catalog migrate --remove-nulls")?;
            }
            writeln!(out, "{RULE}")?;
        }
        Ok(())
    }
}

fn write_truncated<'a>(
    out: &mut String,
    ids: impl ExactSizeIterator<Item = &'a str>,
    limit: usize,
) -> std::fmt::Result {
    let total = ids.len();
    for id in ids.take(limit) {
        writeln!(out, "      • {id}")?;
    }
    if total > limit {
        writeln!(out, "      ... and {} more", total - limit)?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
