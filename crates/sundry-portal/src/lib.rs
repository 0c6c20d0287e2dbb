//! Self-contained HTML documentation portals.
//!
//! A portal is one HTML file that embeds every document it lists, so it
//! can be opened straight from disk or mailed around. Its contents are
//! described by a TOML [`manifest::PortalManifest`]: a title, an audience
//! flavor (staff or patron), and ordered categories of markdown files.
//!
//! # Modules
//!
//! - [`manifest`]: manifest types and loading
//! - [`markdown`]: reading and rendering markdown
//! - [`escape`]: JS and HTML escaping
//! - [`sources`]: scan-image source links
//! - [`render`]: page assembly

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod escape;
pub mod manifest;
pub mod markdown;
pub mod render;
pub mod sources;

use std::path::{Path, PathBuf};

pub use error::{Error, Result};
pub use escape::escape_js_string;
pub use manifest::{Flavor, Palette, PortalManifest};

/// A document that was found and loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDoc {
    /// Document id
    pub id: String,
    /// Display title
    pub title: String,
    /// Category key
    pub category: String,
    /// Source label (scan image names)
    pub source: String,
    /// Font Awesome icon class
    pub icon: String,
    /// Markdown as read from disk
    pub markdown: String,
    /// Rendered HTML
    pub html: String,
    /// Plain text for search
    pub text: String,
}

/// A fully built portal page.
#[derive(Debug, Clone)]
pub struct Portal {
    /// Page title
    pub title: String,
    /// The complete HTML document
    pub html: String,
    /// Documents embedded in the page
    pub documents: Vec<LoadedDoc>,
    /// Categories with at least one document
    pub categories: usize,
    /// Listed files that did not exist
    pub missing: Vec<PathBuf>,
    /// Where the page should be written
    pub output: PathBuf,
}

/// Load every listed document and assemble the page.
///
/// Relative paths in the manifest resolve against `base_dir` (normally the
/// manifest's own directory). Missing markdown files are skipped with a
/// warning; unreadable ones embed a placeholder.
pub fn build_portal(manifest: &PortalManifest, base_dir: &Path) -> Result<Portal> {
    let content_dir = base_dir.join(&manifest.content_dir);
    let mut documents = Vec::new();
    let mut missing = Vec::new();

    for category in &manifest.categories {
        for entry in &category.docs {
            let path = content_dir.join(&entry.file);
            if !path.exists() {
                log::warn!("Skipping missing document {}", path.display());
                missing.push(path);
                continue;
            }
            let markdown = markdown::load_markdown(&path);
            let id = entry.resolved_id()?;
            let title = match &entry.title {
                Some(t) => t.clone(),
                None => markdown::first_heading(&markdown).unwrap_or_else(|| id.clone()),
            };
            log::debug!("Loaded {}", path.display());
            documents.push(LoadedDoc {
                html: markdown::render_markdown(&markdown),
                text: markdown::plain_text(&markdown),
                id,
                title,
                category: category.key.clone(),
                source: entry.source.clone(),
                icon: entry.icon.clone(),
                markdown,
            });
        }
    }

    let generated = chrono::Local::now().format("%B %d, %Y").to_string();
    let html = render::render_page(manifest, &documents, &generated);
    let categories = manifest
        .categories
        .iter()
        .filter(|c| documents.iter().any(|d| d.category == c.key))
        .count();

    Ok(Portal {
        title: manifest.title.clone(),
        html,
        documents,
        categories,
        missing,
        output: manifest.output.clone(),
    })
}

/// Load a manifest file and build its portal.
pub fn build_from_manifest(manifest_path: &Path) -> Result<Portal> {
    let manifest = PortalManifest::load(manifest_path)?;
    let base_dir = manifest_path.parent().unwrap_or_else(|| Path::new("."));
    build_portal(&manifest, base_dir)
}

/// Write the page to `path`.
pub fn write_portal(portal: &Portal, path: &Path) -> Result<()> {
    sundry_core::write_atomic(path, portal.html.as_bytes())?;
    log::info!(
        "Wrote portal '{}' ({} documents) to {}",
        portal.title,
        portal.documents.len(),
        path.display()
    );
    Ok(())
}
