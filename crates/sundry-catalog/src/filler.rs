//! Placeholder details for records that have none yet.
//!
//! Text is assembled from librarian-themed phrase pools. Choices are
//! driven by a BLAKE3 output stream keyed on the record id, so the same
//! record always receives the same filler and reruns produce no diff.

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::model::{Catalog, DETAILS_KEY, ItemKind, display_id, has_details, kind_of, title_of};

const PARAGRAPHS: [&str; 8] = [
    "Dive into the stacks of arcane knowledge where Dewey decimals dance with forgotten tomes. Shelves whisper secrets of card catalogs, interlibrary loans weaving tales of overdue fines and rare editions. Patrons peruse periodicals under fluorescent glow, reference desks guarding bibliographic enigmas. Renew your checkout for endless literary adventures.",
    "Navigate labyrinthine corridors where spine labels chronicle centuries of wisdom, dust motes illuminating manuscript collections. Reserve systems hum with digital catalogs while microfiche readers preserve yesterday's headlines. Circulation desks process boundless inquiries as archival boxes cradle fragile ephemera. Silence enfolds the reading room's scholarly pursuits.",
    "Reference librarians curate annotated bibliographies beneath vaulted ceilings, special collections harboring first editions and illuminated manuscripts. Vertical files overflow with clippings while checkout cards document generations of readers. Interlibrary loan networks span continents, delivering obscure treatises to eager researchers. The book drop swallows returned volumes into sorting chambers.",
    "Acquisitions departments negotiate with antiquarian booksellers as preservation specialists repair leather bindings. Catalogers craft MARC records with meticulous precision while subject headings organize boundless information. Stacks compact mechanically, maximizing space for burgeoning collections. Late fees accrue on forgotten volumes as hold lists grow exponentially.",
    "Circulation statistics track popular titles through automated systems, barcodes replacing pocket cards of bygone eras. Quiet study carrels offer sanctuary while group rooms echo with collaborative learning. Reserve collections support curricula as databases unlock paywalled journals. Book sales clear withdrawn materials, funding future acquisitions.",
    "Archivists white-gloved handle primary sources, oral histories preserved on deteriorating media. Finding aids navigate institutional records while provenance research authenticates donations. Climate-controlled vaults protect rare maps and photographic negatives. Digital repositories ensure perpetual access to fragile materials.",
    "Children's sections burst with colorful bindings, storytime circles fostering early literacy. Young adult collections address contemporary themes while graphic novels legitimize sequential art. Summer reading programs incentivize exploration as book clubs cultivate community. Banned books displays champion intellectual freedom.",
    "Genealogy resources trace ancestral roots through census records and vital statistics, local history archives documenting community evolution. Newspapers on microfilm chronicle decades of current events while city directories map historical addresses. Cemetery transcriptions aid family researchers as immigration records reveal migration patterns.",
];

const BOOK_DESCRIPTORS: [&str; 7] = [
    "tome of bibliographic fascination",
    "volume awaiting cataloging adventures",
    "literary treasure from the stacks",
    "reference material extraordinaire",
    "circulating classic of the collection",
    "reserved reading for curious minds",
    "archived narrative of endless shelves",
];

const AWARDS: [&str; 6] = [
    "Dewey Decimal Award for Classification Excellence",
    "Interlibrary Loan Network Recognition",
    "Reference Desk Service Medal",
    "Circulation Statistics Achievement",
    "Card Catalog Preservation Society Honor",
    "Overdue Fine Amnesty Commendation",
];

const FUN_FACTS: [&str; 7] = [
    "This item has circulated through seventeen library systems",
    "Originally cataloged using the pre-digital card system",
    "Featured in a library display celebrating National Library Week",
    "Subject to recall if requested by another patron",
    "Available in multiple formats across branch locations",
    "Requires special handling per preservation guidelines",
    "Part of a rotating collection among consortium libraries",
];

const AUTHOR_BIO_LEAD: &str = "A distinguished author whose works reside in special collections worldwide, their bibliography spans multiple subjects and classifications.";

/// Deterministic chooser seeded by a record id.
pub struct Picker {
    stream: blake3::OutputReader,
}

impl Picker {
    /// A picker whose choices depend only on `seed`.
    pub fn new(seed: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"sundry-filler:");
        hasher.update(seed.as_bytes());
        Self {
            stream: hasher.finalize_xof(),
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.stream.fill(&mut buf);
        u64::from_le_bytes(buf)
    }

    /// Uniform index in `0..n` (`n > 0`).
    pub fn index(&mut self, n: usize) -> usize {
        (self.next_u64() % n.max(1) as u64) as usize
    }

    /// Integer in `lo..=hi`.
    pub fn between(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo + 1)
    }

    /// One element of a non-empty slice.
    pub fn choose<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.index(items.len())]
    }

    /// `k` distinct elements, in pick order.
    pub fn sample<'a>(&mut self, items: &[&'a str], k: usize) -> Vec<&'a str> {
        let mut pool: Vec<&'a str> = items.to_vec();
        let k = k.min(pool.len());
        for i in 0..k {
            let j = i + self.index(pool.len() - i);
            pool.swap(i, j);
        }
        pool.truncate(k);
        pool
    }
}

fn first_sentence(paragraph: &str) -> String {
    let head = paragraph.split('.').next().unwrap_or(paragraph);
    format!("{head}.")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn strings(items: &[&str]) -> Value {
    Value::Array(items.iter().map(|s| Value::String(s.to_string())).collect())
}

/// Placeholder details in the book schema.
pub fn book_details(picker: &mut Picker) -> Map<String, Value> {
    let description = format!(
        "{} {}",
        picker.choose(&PARAGRAPHS),
        picker.choose(&PARAGRAPHS[..4])
    );
    let bio = format!("{AUTHOR_BIO_LEAD} {}", picker.choose(&PARAGRAPHS[4..6]));
    let awards = picker.sample(&AWARDS, 3);
    let review_quote = first_sentence(picker.choose(&PARAGRAPHS));
    let rating = picker.between(3, 5);
    let descriptor = capitalize(picker.choose(&BOOK_DESCRIPTORS));
    let facts = picker.sample(&FUN_FACTS, 4);

    let value = json!({
        "extendedDescription": description,
        "authorBio": bio,
        "awards": strings(&awards),
        "reviews": [
            {"reviewer": "Library Journal", "quote": review_quote, "rating": rating},
            {"reviewer": "School Library Journal",
             "quote": format!("{descriptor} that enriches any collection.")}
        ],
        "funFacts": strings(&facts),
        "targetAudience": "Patrons seeking literary enrichment, reference researchers, circulation enthusiasts, and readers exploring the full spectrum of cataloged materials.",
        "similarTitles": [
            "The Card Catalog Chronicles",
            "Dewey and the Decimal System",
            "Tales from the Reference Desk"
        ]
    });
    into_map(value)
}

/// Placeholder details in the Library of Things schema.
pub fn thing_details(picker: &mut Picker) -> Map<String, Value> {
    let how_to_use = format!(
        "{} Consult reference materials for detailed instructions. Return to circulation desk upon completion of checkout period.",
        picker.choose(&PARAGRAPHS[2..5])
    );
    let value = json!({
        "whatsIncluded": [
            "Primary item as cataloged in circulation system",
            "Instructional materials and documentation",
            "Storage container or protective case",
            "Checkout card with usage guidelines",
            "Return envelope for patron feedback"
        ],
        "howToUse": how_to_use,
        "careInstructions": "Handle according to library preservation guidelines. Store in provided case when not in use. Report damage to circulation desk immediately. Do not attempt unauthorized repairs or modifications.",
        "safetyInfo": "Review all documentation before use. Adult supervision may be required per library policy. Follow manufacturer guidelines as archived in reference collection. Renew checkout if additional time needed.",
        "recommendedUses": [
            "Educational exploration and skill development",
            "Community projects and creative endeavors",
            "Research and experimentation",
            "Personal enrichment activities",
            "Workshop and group learning sessions"
        ],
        "phillyTips": [
            "Check branch hours before pickup or return",
            "Philadelphia Free Library cardholders receive priority access",
            "Coordinate with reference desk for related materials",
            "Reserve online through library catalog system",
            "Join library programs featuring this item type",
            "Provide circulation feedback to inform future acquisitions"
        ],
        "bestSeasons": ["Year-round circulation"],
        "ageRecommendation": "Ages vary per item classification - consult circulation policies",
        "depositAmount": 25.0,
        "replacementCost": 75.0
    });
    into_map(value)
}

fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// What a fill run changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FillSummary {
    /// `(id, title, kind)` of every record that received filler
    pub filled: Vec<(String, String, String)>,
    /// Books filled
    pub books: usize,
    /// Things/equipment filled
    pub things: usize,
    /// Records skipped because their kind has no filler schema
    pub skipped: usize,
    /// Records with details after the run
    pub with_details: usize,
    /// Records in the catalog
    pub total: usize,
}

impl FillSummary {
    /// Share of records with details, in percent.
    pub fn coverage_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.with_details as f64 / self.total as f64 * 100.0
    }
}

/// Give every record without details a placeholder set.
///
/// Books get the book schema, things and equipment the Library of Things
/// schema; other kinds are left alone.
pub fn fill_missing(catalog: &mut Catalog) -> FillSummary {
    let mut summary = FillSummary::default();

    for record in catalog.items_mut() {
        if has_details(record) {
            continue;
        }
        let id = display_id(record).to_string();
        let mut picker = Picker::new(&id);
        let (details, kind) = match kind_of(record) {
            Some(ItemKind::Book) => {
                summary.books += 1;
                (book_details(&mut picker), "book")
            }
            Some(kind) if kind.is_thing_like() => {
                summary.things += 1;
                (thing_details(&mut picker), "thing")
            }
            _ => {
                summary.skipped += 1;
                continue;
            }
        };
        record.insert(DETAILS_KEY.to_string(), Value::Object(details));
        log::debug!("Added filler details to {id} ({kind})");
        summary
            .filled
            .push((id, title_of(record).to_string(), kind.to_string()));
    }

    summary.with_details = catalog.with_details();
    summary.total = catalog.len();
    summary
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_catalog() -> Catalog {
        serde_json::from_value(json!([
            {"id": "book_001", "title": "A", "itemType": "book", "details": {"awards": ["real"]}},
            {"id": "book_002", "title": "B", "itemType": "book"},
            {"id": "lot_001", "title": "C", "itemType": "thing", "details": {}},
            {"id": "lot_002", "title": "D", "itemType": "equipment"},
            {"id": "dvd_001", "title": "E", "itemType": "dvd"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_fill_missing_counts() {
        let mut catalog = sample_catalog();
        let summary = fill_missing(&mut catalog);
        assert_eq!(summary.books, 1);
        assert_eq!(summary.things, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.with_details, 4);
        assert_eq!(summary.total, 5);
        assert!((summary.coverage_percent() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_fill_keeps_existing_details() {
        let mut catalog = sample_catalog();
        fill_missing(&mut catalog);
        assert_eq!(
            catalog.get("book_001").unwrap()["details"],
            json!({"awards": ["real"]})
        );
    }

    #[test]
    fn test_book_schema() {
        let details = book_details(&mut Picker::new("book_002"));
        assert_eq!(details["awards"].as_array().unwrap().len(), 3);
        assert_eq!(details["funFacts"].as_array().unwrap().len(), 4);
        let rating = details["reviews"][0]["rating"].as_u64().unwrap();
        assert!((3..=5).contains(&rating));
        assert!(details["reviews"][1]["quote"]
            .as_str()
            .unwrap()
            .ends_with("that enriches any collection."));
        assert!(details["authorBio"].as_str().unwrap().starts_with(AUTHOR_BIO_LEAD));
    }

    #[test]
    fn test_thing_schema_amounts() {
        let details = thing_details(&mut Picker::new("lot_002"));
        assert_eq!(details["depositAmount"], json!(25.0));
        assert_eq!(details["replacementCost"], json!(75.0));
        assert_eq!(details["phillyTips"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_fill_is_deterministic() {
        let mut a = sample_catalog();
        let mut b = sample_catalog();
        fill_missing(&mut a);
        fill_missing(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_second_fill_is_noop() {
        let mut catalog = sample_catalog();
        fill_missing(&mut catalog);
        let summary = fill_missing(&mut catalog);
        assert!(summary.filled.is_empty());
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn test_first_sentence() {
        assert_eq!(first_sentence("One. Two."), "One.");
        assert_eq!(first_sentence("No period"), "No period.");
    }

    proptest! {
        #[test]
        fn test_sample_is_distinct(seed in "[a-z_0-9]{1,12}", k in 0usize..10) {
            let mut picker = Picker::new(&seed);
            let picked = picker.sample(&FUN_FACTS, k);
            prop_assert_eq!(picked.len(), k.min(FUN_FACTS.len()));
            let mut unique = picked.clone();
            unique.sort();
            unique.dedup();
            prop_assert_eq!(unique.len(), picked.len());
        }
    }
}
