//! Escaping for text embedded in generated pages.

/// Escape `s` for a JS template, single- or double-quoted literal.
///
/// Backslashes are escaped first so later escapes are not doubled.
pub fn escape_js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 8);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            _ => out.push(c),
        }
    }
    out
}

/// [`escape_js_string`] plus `</` so the literal cannot close its `<script>`.
pub fn escape_script_literal(s: &str) -> String {
    escape_js_string(s).replace("</", "<\\/")
}

/// Escape text for HTML element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_escape_js_string_each_char() {
        assert_eq!(escape_js_string("a\\b"), "a\\\\b");
        assert_eq!(escape_js_string("`x`"), "\\`x\\`");
        assert_eq!(escape_js_string("${v}"), "\\${v}");
        assert_eq!(escape_js_string("l1\nl2\r"), "l1\\nl2\\r");
        assert_eq!(escape_js_string(r#"say "hi" it's"#), r#"say \"hi\" it\'s"#);
    }

    #[test]
    fn test_escape_js_string_plain_unchanged() {
        assert_eq!(escape_js_string("plain text <b>"), "plain text <b>");
    }

    #[test]
    fn test_escape_script_literal() {
        assert_eq!(escape_script_literal("<p>a</p>"), "<p>a<\\/p>");
        assert_eq!(escape_script_literal("</script>"), "<\\/script>");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    proptest! {
        #[test]
        fn escaped_js_has_no_raw_line_breaks(s in ".*") {
            let escaped = escape_js_string(&s);
            prop_assert!(!escaped.contains('\n'));
            prop_assert!(!escaped.contains('\r'));
        }

        #[test]
        fn escaped_js_quotes_are_always_preceded_by_odd_backslashes(s in ".*") {
            let escaped = escape_js_string(&s);
            let chars: Vec<char> = escaped.chars().collect();
            for (i, c) in chars.iter().enumerate() {
                if matches!(c, '`' | '$' | '"' | '\'') {
                    let run = chars[..i].iter().rev().take_while(|&&b| b == '\\').count();
                    prop_assert_eq!(run % 2, 1);
                }
            }
        }
    }
}
