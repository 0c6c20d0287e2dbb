//! Page assembly.
//!
//! The page is static CSS and script around four generated pieces: the
//! palette variables, the header, the welcome screen and the embedded data
//! objects the script reads (`documents`, `embeddedContent`, `searchText`).

use std::fmt::{self, Write};

use crate::LoadedDoc;
use crate::escape::{escape_html, escape_script_literal};
use crate::manifest::{Category, PortalManifest};
use crate::sources::source_links;

const STYLE: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; background: #f7fafc; color: #2d3748; line-height: 1.6; }
header { background: linear-gradient(135deg, var(--primary), var(--secondary)); color: #fff; padding: 1.5rem 2rem; box-shadow: 0 2px 8px rgba(0,0,0,.15); }
header h1 { font-size: 1.6rem; }
header p { opacity: .85; }
.layout { display: flex; min-height: calc(100vh - 96px); }
nav { width: 300px; background: #fff; border-right: 1px solid #e2e8f0; padding: 1rem; overflow-y: auto; }
.search { width: 100%; padding: .6rem .8rem; border: 1px solid #cbd5e0; border-radius: 6px; margin-bottom: 1rem; }
.category { margin-bottom: 1rem; }
.category h3 { font-size: .85rem; text-transform: uppercase; color: var(--primary); display: flex; justify-content: space-between; padding: .4rem 0; }
.count { background: var(--accent); color: var(--primary); border-radius: 10px; padding: 0 .5rem; font-size: .75rem; }
.doc-link { display: block; padding: .4rem .6rem; border-radius: 4px; color: #4a5568; cursor: pointer; text-decoration: none; font-size: .92rem; }
.doc-link:hover, .doc-link.active { background: var(--accent); color: var(--primary); }
.doc-link i { width: 1.2rem; margin-right: .3rem; color: var(--secondary); }
main { flex: 1; padding: 2rem 3rem; overflow-y: auto; }
.welcome { text-align: center; padding: 3rem 1rem; }
.welcome > i { font-size: 3.5rem; color: var(--secondary); margin-bottom: 1rem; }
.stats { display: flex; gap: 1.5rem; justify-content: center; margin-top: 2rem; }
.stat { background: #fff; border-radius: 8px; padding: 1.2rem 2rem; box-shadow: 0 1px 4px rgba(0,0,0,.08); }
.stat strong { display: block; font-size: 2rem; color: var(--primary); }
.doc h1, .doc h2, .doc h3 { color: var(--primary); margin: 1.2rem 0 .6rem; }
.doc p, .doc ul, .doc ol, .doc table { margin-bottom: 1rem; }
.doc ul, .doc ol { padding-left: 1.5rem; }
.doc table { border-collapse: collapse; }
.doc th, .doc td { border: 1px solid #e2e8f0; padding: .4rem .8rem; }
.doc code { background: #edf2f7; padding: 0 .3rem; border-radius: 3px; }
.doc pre { background: #edf2f7; padding: 1rem; border-radius: 6px; overflow-x: auto; }
.source { margin-top: 2rem; padding-top: 1rem; border-top: 1px solid #e2e8f0; font-size: .85rem; color: #718096; }
.source a { color: var(--secondary); }
.hidden { display: none; }
footer { text-align: center; font-size: .8rem; color: #a0aec0; padding: 1rem; }
@media (max-width: 768px) { .layout { flex-direction: column; } nav { width: 100%; } main { padding: 1rem; } }
"#;

const SCRIPT: &str = r#"
function buildNav() {
  const nav = document.getElementById('categories');
  for (const [key, cat] of Object.entries(documents)) {
    const section = document.createElement('div');
    section.className = 'category';
    section.dataset.key = key;
    section.innerHTML = '<h3><span><i class="fas ' + cat.icon + '"></i> ' + cat.name +
      '</span><span class="count">' + cat.docs.length + '</span></h3>';
    for (const doc of cat.docs) {
      const a = document.createElement('a');
      a.className = 'doc-link';
      a.dataset.id = doc.id;
      a.innerHTML = '<i class="fas ' + doc.icon + '"></i>' + doc.title;
      a.addEventListener('click', () => showDocument(doc.id));
      section.appendChild(a);
    }
    nav.appendChild(section);
  }
}

function findDoc(id) {
  for (const cat of Object.values(documents)) {
    const doc = cat.docs.find(d => d.id === id);
    if (doc) return doc;
  }
  return null;
}

function showDocument(id) {
  const doc = findDoc(id);
  const content = embeddedContent[id];
  if (!doc || content === undefined) return;
  document.querySelectorAll('.doc-link').forEach(a => a.classList.toggle('active', a.dataset.id === id));
  document.getElementById('welcome').classList.add('hidden');
  const view = document.getElementById('document');
  view.innerHTML = content + '<div class="source"><i class="fas fa-image"></i> Source: ' + doc.source + '</div>';
  view.classList.remove('hidden');
  window.location.hash = id;
  document.querySelector('main').scrollTop = 0;
}

function performSearch(query) {
  const q = query.trim().toLowerCase();
  document.querySelectorAll('.category').forEach(section => {
    let visible = 0;
    section.querySelectorAll('.doc-link').forEach(a => {
      const doc = findDoc(a.dataset.id);
      const hit = !q || doc.title.toLowerCase().includes(q) ||
        (searchText[doc.id] || '').toLowerCase().includes(q);
      a.classList.toggle('hidden', !hit);
      if (hit) visible++;
    });
    section.classList.toggle('hidden', visible === 0);
  });
}

document.addEventListener('DOMContentLoaded', () => {
  buildNav();
  document.getElementById('search').addEventListener('input', e => performSearch(e.target.value));
  const initial = window.location.hash.slice(1);
  if (initial) showDocument(decodeURIComponent(initial));
});
"#;

fn js(s: &str) -> String {
    escape_script_literal(s)
}

fn write_documents(out: &mut String, manifest: &PortalManifest, docs: &[LoadedDoc]) -> fmt::Result {
    let base = manifest.image_base.as_deref();
    writeln!(out, "const documents = {{")?;
    for category in &manifest.categories {
        let members: Vec<&LoadedDoc> = docs.iter().filter(|d| d.category == category.key).collect();
        if members.is_empty() {
            continue;
        }
        writeln!(
            out,
            "  '{}': {{ name: '{}', icon: '{}', docs: [",
            js(&category.key),
            js(&escape_html(&category.name)),
            js(&category.icon)
        )?;
        for doc in members {
            writeln!(
                out,
                "    {{ id: '{}', title: '{}', source: '{}', icon: '{}' }},",
                js(&doc.id),
                js(&escape_html(&doc.title)),
                js(&source_links(&doc.source, &manifest.images, base)),
                js(&doc.icon)
            )?;
        }
        writeln!(out, "  ] }},")?;
    }
    writeln!(out, "}};")
}

fn write_content(
    out: &mut String,
    name: &str,
    docs: &[LoadedDoc],
    field: fn(&LoadedDoc) -> &str,
) -> fmt::Result {
    writeln!(out, "const {name} = {{")?;
    for doc in docs {
        writeln!(out, "  '{}': `{}`,", js(&doc.id), js(field(doc)))?;
    }
    writeln!(out, "}};")
}

fn palette_css(manifest: &PortalManifest) -> String {
    let p = manifest.flavor.palette();
    format!(
        ":root {{ --primary: {}; --secondary: {}; --accent: {}; }}",
        p.primary, p.secondary, p.accent
    )
}

fn welcome(manifest: &PortalManifest, docs: &[LoadedDoc], categories: &[&Category]) -> String {
    let flavor = manifest.flavor;
    format!(
        r#"<section id="welcome" class="welcome">
  <i class="fas {icon}"></i>
  <h2>Welcome to the {title}</h2>
  <p>Choose a document from the sidebar or search above.</p>
  <div class="stats">
    <div class="stat"><strong>{docs}</strong>{label}</div>
    <div class="stat"><strong>{cats}</strong>Categories</div>
  </div>
</section>"#,
        icon = flavor.icon(),
        title = escape_html(&manifest.title),
        docs = docs.len(),
        label = flavor.documents_label(),
        cats = categories.len(),
    )
}

/// Assemble the complete HTML page.
pub fn render_page(manifest: &PortalManifest, docs: &[LoadedDoc], generated: &str) -> String {
    let mut page = String::with_capacity(64 * 1024);
    write_page(&mut page, manifest, docs, generated)
        .map(|()| page)
        .unwrap_or_default()
}

fn write_page(
    page: &mut String,
    manifest: &PortalManifest,
    docs: &[LoadedDoc],
    generated: &str,
) -> fmt::Result {
    let categories: Vec<&Category> = manifest
        .categories
        .iter()
        .filter(|c| docs.iter().any(|d| d.category == c.key))
        .collect();
    let title = escape_html(&manifest.title);

    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    page.push_str("<meta charset=\"UTF-8\">\n");
    page.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    writeln!(page, "<title>{title}</title>")?;
    page.push_str(concat!(
        "<link rel=\"stylesheet\" ",
        "href=\"https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css\">\n"
    ));
    writeln!(page, "<style>\n{}{STYLE}</style>", palette_css(manifest))?;
    page.push_str("</head>\n<body>\n");

    writeln!(
        page,
        "<header><h1><i class=\"fas {}\"></i> {title}</h1><p>{}</p></header>",
        manifest.flavor.icon(),
        escape_html(&manifest.subtitle)
    )?;
    page.push_str("<div class=\"layout\">\n<nav>\n");
    page.push_str(
        "<input id=\"search\" class=\"search\" type=\"search\" placeholder=\"Search documents...\">\n",
    );
    page.push_str("<div id=\"categories\"></div>\n</nav>\n<main>\n");
    page.push_str(&welcome(manifest, docs, &categories));
    page.push_str("\n<article id=\"document\" class=\"doc hidden\"></article>\n</main>\n</div>\n");
    writeln!(
        page,
        "<footer>{title} &middot; generated {}</footer>",
        escape_html(generated)
    )?;

    page.push_str("<script>\n");
    write_documents(page, manifest, docs)?;
    write_content(page, "embeddedContent", docs, |d| d.html.as_str())?;
    write_content(page, "searchText", docs, |d| d.text.as_str())?;
    page.push_str(SCRIPT);
    page.push_str("</script>\n</body>\n</html>\n");
    Ok(())
}
