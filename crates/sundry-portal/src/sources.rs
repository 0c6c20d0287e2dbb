//! Links from documents back to the scan images they were transcribed from.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::escape::escape_html;
use crate::manifest::GENERATED_SOURCE;

static RANGE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^IMG_(\d+)-(\d+)\.HEIC$"));

static SINGLE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^IMG_(\d+)\.HEIC$"));

fn href(path: &str, base: Option<&str>) -> String {
    match base {
        Some(base) => format!("file://{}/{}", base.trim_end_matches('/'), path),
        None => path.to_string(),
    }
}

fn link(path: &str, label: &str, base: Option<&str>) -> String {
    format!(
        r#"<a href="{}" target="_blank">{}</a>"#,
        escape_html(&href(path, base)),
        escape_html(label)
    )
}

fn expand_range(source: &str) -> Option<(u64, u64)> {
    let re = RANGE.as_ref().ok()?;
    let caps = re.captures(source)?;
    let start = caps[1].parse().ok()?;
    let end = caps[2].parse().ok()?;
    (start <= end).then_some((start, end))
}

fn image_number(name: &str) -> Option<u64> {
    let re = SINGLE.as_ref().ok()?;
    let n: u64 = re.captures(name)?[1].parse().ok()?;
    // Zero-padded names are not members of a range.
    (name == format!("IMG_{n}.HEIC")).then_some(n)
}

/// Mapped images numbered within `start..=end`, in numeric order.
fn images_in_range(
    images: &BTreeMap<String, String>,
    start: u64,
    end: u64,
) -> Vec<(u64, &str)> {
    let mut members: Vec<(u64, &str)> = images
        .iter()
        .filter_map(|(name, path)| image_number(name).map(|n| (n, path.as_str())))
        .filter(|(n, _)| (start..=end).contains(n))
        .collect();
    members.sort_by_key(|(n, _)| *n);
    members
}

/// HTML for a document's source label.
///
/// `Generated` and empty labels pass through. A range such as
/// `IMG_8302-8303.HEIC` becomes one link per mapped image, joined with
/// `, ` and suffixed `.HEIC`. A mapped single name becomes a link.
/// Anything else is returned escaped.
pub fn source_links(source: &str, images: &BTreeMap<String, String>, base: Option<&str>) -> String {
    if source.is_empty() || source == GENERATED_SOURCE {
        return escape_html(source);
    }

    if let Some((start, end)) = expand_range(source) {
        let links: Vec<String> = images_in_range(images, start, end)
            .into_iter()
            .map(|(n, path)| link(path, &format!("IMG_{n}"), base))
            .collect();
        if links.is_empty() {
            return escape_html(source);
        }
        return format!("{}.HEIC", links.join(", "));
    }

    match images.get(source) {
        Some(path) => link(path, source, base),
        None => escape_html(source),
    }
}
