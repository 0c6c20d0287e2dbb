//! Catalog records and item kinds.
//!
//! Records are kept as raw JSON objects so fields this crate does not know
//! about survive a load/save cycle untouched and in their original order.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One catalog record.
pub type Record = Map<String, Value>;

/// Label used for records without a string `id`.
pub const UNKNOWN_ID: &str = "UNKNOWN";

/// Key holding a record's descriptive metadata.
pub const DETAILS_KEY: &str = "details";

/// Key holding a record's item type.
pub const ITEM_TYPE_KEY: &str = "itemType";

/// The whole catalog, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    items: Vec<Record>,
}

impl Catalog {
    /// Wrap a list of records.
    pub fn new(items: Vec<Record>) -> Self {
        Self { items }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when there are no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Records in file order.
    pub fn items(&self) -> &[Record] {
        &self.items
    }

    /// Mutable access for the editing tools.
    pub fn items_mut(&mut self) -> &mut [Record] {
        &mut self.items
    }

    /// First record with the given id.
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.items.iter().find(|r| id_of(r) == Some(id))
    }

    /// Number of records carrying non-empty details.
    pub fn with_details(&self) -> usize {
        self.items.iter().filter(|r| has_details(r)).count()
    }
}

/// The record's id, if it is a string.
pub fn id_of(record: &Record) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

/// The record's id for display, `UNKNOWN` when absent.
pub fn display_id(record: &Record) -> &str {
    id_of(record).unwrap_or(UNKNOWN_ID)
}

/// The record's title for display.
pub fn title_of(record: &Record) -> &str {
    record.get("title").and_then(Value::as_str).unwrap_or("")
}

/// The record's `itemType`, if it is a string.
pub fn kind_of(record: &Record) -> Option<ItemKind> {
    record
        .get(ITEM_TYPE_KEY)
        .and_then(Value::as_str)
        .map(ItemKind::parse)
}

/// True when `details` is present and not empty/null/false.
pub fn has_details(record: &Record) -> bool {
    match record.get(DETAILS_KEY) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::Object(m)) => !m.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Kinds of lendable items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemKind {
    /// A book
    Book,
    /// A "Library of Things" object
    Thing,
    /// Equipment (treated like a thing)
    Equipment,
    /// Board or video game
    Game,
    /// DVD
    Dvd,
    /// Other audiovisual media
    Audiovisual,
    /// Comic or graphic novel
    Comic,
    /// Anything else, verbatim
    Other(String),
}

impl ItemKind {
    /// Parse an `itemType` value.
    pub fn parse(s: &str) -> Self {
        match s {
            "book" => ItemKind::Book,
            "thing" => ItemKind::Thing,
            "equipment" => ItemKind::Equipment,
            "game" => ItemKind::Game,
            "dvd" => ItemKind::Dvd,
            "audiovisual" => ItemKind::Audiovisual,
            "comic" => ItemKind::Comic,
            other => ItemKind::Other(other.to_string()),
        }
    }

    /// The `itemType` string.
    pub fn as_str(&self) -> &str {
        match self {
            ItemKind::Book => "book",
            ItemKind::Thing => "thing",
            ItemKind::Equipment => "equipment",
            ItemKind::Game => "game",
            ItemKind::Dvd => "dvd",
            ItemKind::Audiovisual => "audiovisual",
            ItemKind::Comic => "comic",
            ItemKind::Other(s) => s,
        }
    }

    /// Console icon for reports.
    pub fn icon(&self) -> &'static str {
        match self {
            ItemKind::Book => "📚",
            ItemKind::Thing => "📦",
            ItemKind::Equipment => "🔧",
            ItemKind::Game => "🎮",
            ItemKind::Dvd => "📀",
            ItemKind::Audiovisual => "🎬",
            ItemKind::Comic => "💬",
            ItemKind::Other(_) => "📋",
        }
    }

    /// Things and equipment share the Library of Things details schema.
    pub fn is_thing_like(&self) -> bool {
        matches!(self, ItemKind::Thing | ItemKind::Equipment)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
