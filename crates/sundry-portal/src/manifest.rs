//! Portal manifests.
//!
//! ```toml
//! title = "Tredyffrin Library Staff Portal"
//! subtitle = "Internal procedures and reference materials"
//! flavor = "staff"
//! output = "staff-portal.html"
//! image_base = "/Users/library/scans"
//!
//! [images]
//! "IMG_8294.HEIC" = "reference desk/IMG_8294.HEIC"
//!
//! [[categories]]
//! key = "operations"
//! name = "Daily Operations"
//! icon = "fa-clock"
//!
//! [[categories.docs]]
//! title = "Reference Desk Opening/Closing"
//! file = "reference-desk-opening-closing-checklist.md"
//! source = "IMG_8294.HEIC"
//! icon = "fa-tasks"
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default icon for documents that do not name one.
pub const DEFAULT_DOC_ICON: &str = "fa-file-alt";

/// Default source label for documents written from scratch.
pub const GENERATED_SOURCE: &str = "Generated";

/// Who the portal is for. Decides palette and welcome copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    /// Library staff: procedures and internal references.
    #[default]
    Staff,
    /// Library patrons: public help guides.
    Patron,
}

impl Flavor {
    /// Colours for this flavor.
    pub fn palette(self) -> Palette {
        match self {
            Self::Staff => Palette {
                primary: "#1a365d",
                secondary: "#2c5282",
                accent: "#90cdf4",
            },
            Self::Patron => Palette {
                primary: "#22543d",
                secondary: "#38a169",
                accent: "#9ae6b4",
            },
        }
    }

    /// Welcome-card icon.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Staff => "fa-user-shield",
            Self::Patron => "fa-book-reader",
        }
    }

    /// What the documents are called on the welcome screen.
    pub fn documents_label(self) -> &'static str {
        match self {
            Self::Staff => "Staff Documents",
            Self::Patron => "Help Guides",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Staff => f.write_str("staff"),
            Self::Patron => f.write_str("patron"),
        }
    }
}

/// CSS colours of a portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Header and headings
    pub primary: &'static str,
    /// Gradients and links
    pub secondary: &'static str,
    /// Highlights
    pub accent: &'static str,
}

/// One document listed in a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocEntry {
    /// Explicit id; derived from the file name when absent.
    #[serde(default)]
    pub id: Option<String>,
    /// Explicit title; taken from the first heading when absent.
    #[serde(default)]
    pub title: Option<String>,
    /// Markdown file, relative to the content directory.
    pub file: String,
    /// Scan image name(s) the document was transcribed from.
    #[serde(default = "default_source")]
    pub source: String,
    /// Font Awesome icon class.
    #[serde(default = "default_doc_icon")]
    pub icon: String,
}

impl DocEntry {
    /// The document id, explicit or derived from `file`.
    pub fn resolved_id(&self) -> Result<String> {
        if let Some(id) = &self.id {
            return Ok(id.clone());
        }
        sundry_core::id_from_path(Path::new(&self.file)).ok_or_else(|| Error::DocumentId {
            file: self.file.clone(),
        })
    }
}

/// A sidebar section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Stable key
    pub key: String,
    /// Display name
    pub name: String,
    /// Font Awesome icon class
    #[serde(default = "default_category_icon")]
    pub icon: String,
    /// Documents in display order
    #[serde(default)]
    pub docs: Vec<DocEntry>,
}

/// A full portal description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalManifest {
    /// Page and header title
    pub title: String,
    /// Header subtitle
    #[serde(default)]
    pub subtitle: String,
    /// Audience
    #[serde(default)]
    pub flavor: Flavor,
    /// Output file name
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Directory holding the markdown files
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
    /// Directory scan images live under; links are `file://` when set
    #[serde(default)]
    pub image_base: Option<String>,
    /// Scan image name to path below `image_base`
    #[serde(default)]
    pub images: BTreeMap<String, String>,
    /// Sidebar categories in order
    #[serde(default)]
    pub categories: Vec<Category>,
}

fn default_source() -> String {
    GENERATED_SOURCE.to_string()
}

fn default_doc_icon() -> String {
    DEFAULT_DOC_ICON.to_string()
}

fn default_category_icon() -> String {
    "fa-folder".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("portal.html")
}

fn default_content_dir() -> PathBuf {
    PathBuf::from(".")
}

impl PortalManifest {
    /// Read and check a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| sundry_core::Error::io_with_path(e, path))?;
        Self::from_toml_str(&content).map_err(|message| Error::Manifest {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse and check a manifest from TOML text.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, String> {
        let manifest: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        manifest.check()?;
        Ok(manifest)
    }

    /// Total number of listed documents.
    pub fn doc_count(&self) -> usize {
        self.categories.iter().map(|c| c.docs.len()).sum()
    }

    fn check(&self) -> std::result::Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title must not be empty".to_string());
        }
        let mut keys = HashSet::new();
        let mut ids = HashSet::new();
        for category in &self.categories {
            if !keys.insert(category.key.as_str()) {
                return Err(format!("duplicate category key '{}'", category.key));
            }
            for doc in &category.docs {
                let id = doc.resolved_id().map_err(|e| e.to_string())?;
                if !ids.insert(id.clone()) {
                    return Err(format!("duplicate document id '{id}'"));
                }
            }
        }
        Ok(())
    }
}
