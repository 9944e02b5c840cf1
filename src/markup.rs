//! Small text helpers shared by the builder and the button layout.

/// Escape `&`, `<`, `>`, `"` and `'` for use in HTML text and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Remove every markup tag from `html`, leaving text and entities untouched.
///
/// A `<` opens a tag only when followed by an ASCII letter, `/`, `!` or `?`;
/// any other `<` is literal text. Comments are dropped with their content.
/// An unterminated tag or comment is kept as text. Entities are not decoded,
/// so the result is suitable for the plaintext channel only when the input
/// was written as raw text.
pub fn strip_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        let tail = &rest[start..];
        if !opens_tag(tail) {
            result.push_str(&rest[..start + 1]);
            rest = &tail[1..];
            continue;
        }
        result.push_str(&rest[..start]);
        let end = if tail.starts_with("<!--") {
            tail.find("-->").map(|i| i + 3)
        } else {
            tag_end(tail)
        };
        match end {
            Some(end) => rest = &tail[end..],
            None => {
                result.push_str(tail);
                return result;
            }
        }
    }
    result.push_str(rest);
    result
}

fn opens_tag(tail: &str) -> bool {
    matches!(
        tail[1..].chars().next(),
        Some(c) if c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?')
    )
}

/// Byte offset just past the `>` closing the tag at the start of `tail`,
/// skipping any `>` inside quoted attribute values.
fn tag_end(tail: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, ch) in tail.char_indices().skip(1) {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '>') => return Some(i + 1),
            (None, _) => {}
        }
    }
    None
}

/// Render `name="value"` pairs with a leading space each, escaping values.
pub fn attributes(attrs: &[(&str, &str)]) -> String {
    attrs
        .iter()
        .map(|(name, value)| format!(" {name}=\"{}\"", escape_html(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_special_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_leaves_plain_text_alone() {
        assert_eq!(escape_html("Hello, world"), "Hello, world");
    }

    #[test]
    fn test_strip_tags_keeps_text_and_ampersand() {
        assert_eq!(strip_tags("<b>Hi</b> & you"), "Hi & you");
    }

    #[test]
    fn test_strip_tags_quoted_gt_in_attribute() {
        assert_eq!(strip_tags(r#"<a title="a > b">link</a>"#), "link");
    }

    #[test]
    fn test_strip_tags_comment_and_unterminated() {
        assert_eq!(strip_tags("a<!-- <b>x</b> -->b"), "ab");
        assert_eq!(strip_tags("keep <broken"), "keep <broken");
        assert_eq!(strip_tags("a <!-- open"), "a <!-- open");
    }

    #[test]
    fn test_strip_tags_literal_less_than() {
        assert_eq!(strip_tags("a < b"), "a < b");
        assert_eq!(strip_tags("a < b > c"), "a < b > c");
        assert_eq!(strip_tags("x <"), "x <");
        assert_eq!(strip_tags("1<2 and <i>3</i>"), "1<2 and 3");
    }

    #[test]
    fn test_strip_tags_processing_instruction_and_closing() {
        assert_eq!(strip_tags("<?xml version=\"1.0\"?>a</p>b"), "ab");
    }

    #[test]
    fn test_strip_tags_does_not_decode_entities() {
        assert_eq!(strip_tags("<p>&amp;</p>"), "&amp;");
    }

    #[test]
    fn test_attributes() {
        assert_eq!(
            attributes(&[("colspan", "2"), ("title", "a\"b")]),
            r#" colspan="2" title="a&quot;b""#
        );
        assert_eq!(attributes(&[]), "");
    }
}
