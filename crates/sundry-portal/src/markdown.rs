//! Markdown loading, rendering and text extraction.

use std::path::Path;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};

fn options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);
    opts
}

/// Read a markdown file.
///
/// Never fails: an unreadable file yields a placeholder that is rendered
/// in place of the document.
pub fn load_markdown(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            log::warn!("Could not read {}: {e}", path.display());
            format!("Error reading file: {e}")
        }
    }
}

/// Render markdown to an HTML fragment.
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Text of the first heading, if any.
pub fn first_heading(markdown: &str) -> Option<String> {
    let mut in_heading = false;
    let mut text = String::new();

    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Start(Tag::Heading { .. }) => in_heading = true,
            Event::End(TagEnd::Heading(_)) if in_heading => {
                let heading = text.trim().to_string();
                return (!heading.is_empty()).then_some(heading);
            }
            Event::Text(t) | Event::Code(t) if in_heading => text.push_str(&t),
            _ => {}
        }
    }
    None
}

/// Markdown with formatting stripped, for client-side search.
///
/// Block boundaries become single spaces; code blocks are dropped.
pub fn plain_text(markdown: &str) -> String {
    let mut text = String::new();
    let mut in_code_block = false;

    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(t) | Event::Code(t) if !in_code_block => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(
                TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::TableCell,
            ) => text.push(' '),
            _ => {}
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic() {
        let html = render_markdown("# Title\n\nSome **bold** text.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_render_extensions() {
        let md = "| a | b |\n|---|---|\n| 1 | 2 |\n\n~~old~~\n\n- [x] done\n- [ ] todo\n";
        let html = render_markdown(md);
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>old</del>"));
        assert!(html.contains("checkbox"));
    }

    #[test]
    fn test_first_heading() {
        assert_eq!(
            first_heading("intro\n\n## Wireless `Printing`\n\n# Later"),
            Some("Wireless Printing".to_string())
        );
        assert_eq!(first_heading("no headings here"), None);
    }

    #[test]
    fn test_plain_text_strips_formatting() {
        let md = "# Heading\n\nA *word* and [link](http://x).\n\n```\ncode();\n```\n\n- one\n- two";
        assert_eq!(plain_text(md), "Heading A word and link. one two");
    }

    #[test]
    fn test_load_markdown_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "# Doc").unwrap();
        assert_eq!(load_markdown(&path), "# Doc");
    }

    #[test]
    fn test_load_markdown_placeholder_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let text = load_markdown(&dir.path().join("absent.md"));
        assert!(text.starts_with("Error reading file: "));
    }
}
