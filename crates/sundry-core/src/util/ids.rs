//! Identifier helpers.
//!
//! Portal documents get kebab-case ids derived from their markdown file
//! names; catalog records carry ids of the form `<prefix>_<number>`
//! (`book_001`, `lot_003`).

use std::path::Path;

/// Normalize an identifier to lowercase kebab-case.
///
/// Whitespace runs and underscores collapse into single hyphens.
///
/// ```
/// use sundry_core::util::ids::normalize_id;
///
/// assert_eq!(normalize_id("Interlibrary Loan"), "interlibrary-loan");
/// assert_eq!(normalize_id("museum_pass  Program"), "museum-pass-program");
/// ```
pub fn normalize_id(id: &str) -> String {
    id.trim()
        .to_lowercase()
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join("-")
}

/// Compute an ID from a file path's stem.
///
/// ```
/// use std::path::Path;
/// use sundry_core::util::ids::id_from_path;
///
/// assert_eq!(
///     id_from_path(Path::new("docs/Creating_Patron_PIN.md")),
///     Some("creating-patron-pin".to_string())
/// );
/// assert_eq!(id_from_path(Path::new("/")), None);
/// ```
pub fn id_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(normalize_id)
        .filter(|s| !s.is_empty())
}

/// The prefix of a catalog id, i.e. everything before the last `_`.
///
/// Returns `None` when the id has no underscore or an empty prefix.
///
/// ```
/// use sundry_core::util::ids::record_prefix;
///
/// assert_eq!(record_prefix("book_001"), Some("book"));
/// assert_eq!(record_prefix("lot_003"), Some("lot"));
/// assert_eq!(record_prefix("orphan"), None);
/// ```
pub fn record_prefix(id: &str) -> Option<&str> {
    id.rsplit_once('_')
        .map(|(prefix, _)| prefix)
        .filter(|p| !p.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_id_trims_and_lowercases() {
        assert_eq!(normalize_id("  Library Policies  "), "library-policies");
        assert_eq!(normalize_id("KANOPY"), "kanopy");
    }

    #[test]
    fn test_normalize_id_already_normalized() {
        assert_eq!(normalize_id("room-rental"), "room-rental");
    }

    #[test]
    fn test_normalize_id_empty() {
        assert_eq!(normalize_id("   "), "");
    }

    #[test]
    fn test_id_from_path_nested() {
        let path = Path::new("/docs/meeting rooms/Room Rental.md");
        assert_eq!(id_from_path(path), Some("room-rental".to_string()));
    }

    #[test]
    fn test_id_from_path_whitespace_stem() {
        assert_eq!(id_from_path(Path::new("  .md")), None);
    }

    #[test]
    fn test_record_prefix_multi_underscore() {
        assert_eq!(record_prefix("board_game_012"), Some("board_game"));
    }

    #[test]
    fn test_record_prefix_leading_underscore() {
        assert_eq!(record_prefix("_001"), None);
    }
}
