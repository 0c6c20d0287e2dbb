//! Tools for a flat JSON library catalog.
//!
//! The catalog is an array of loosely-typed records:
//!
//! ```json
//! [
//!   {"id": "book_001", "title": "The Thursday Murder Club", "itemType": "book",
//!    "formats": ["print"], "description": "...", "details": {"awards": []}}
//! ]
//! ```
//!
//! Each tool loads the whole file, works in memory, and (for the editing
//! tools) writes the whole file back:
//!
//! - [`validate`]: structural and integrity report
//! - [`enrich`]: splice a batch of `details` objects into matching records
//! - [`filler`]: placeholder `details` for records that have none
//! - [`migrate`]: the fixes the validator recommends

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod enrich;
pub mod error;
pub mod filler;
pub mod migrate;
pub mod model;
pub mod store;
pub mod validate;

pub use enrich::{DetailBatch, EnrichSummary};
pub use error::{Error, Result};
pub use filler::FillSummary;
pub use migrate::{MigrateOptions, MigrationSummary};
pub use model::{Catalog, ItemKind, Record};
pub use validate::{ValidationReport, ValidationRules};
