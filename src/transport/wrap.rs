use crate::button::{UNWRAP_CLOSE, UNWRAP_OPEN};

/// Remove the unwrap markers, keeping what they enclose.
pub fn strip_unwrap_markers(s: &str) -> String {
    s.replace(UNWRAP_OPEN, "").replace(UNWRAP_CLOSE, "")
}

/// Piece of a plaintext line: a breakable run of text, or the content of a
/// complete `{unwrap}…{/unwrap}` span.
#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    Protected(&'a str),
}

/// Wrap `text` at `width` columns, breaking on spaces and joining lines with
/// `newline`.
///
/// Text between unwrap markers is never broken and the markers are removed.
/// Words longer than `width` are left intact on a line of their own.
pub fn word_wrap(text: &str, width: usize, newline: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    let mut lines: Vec<String> = Vec::new();
    for line in split_lines(&normalized) {
        let line_words = words(&line);
        if width == 0 || display_width(&line_words) <= width {
            lines.push(line_words.join(" "));
            continue;
        }
        let mut current = String::new();
        let mut current_len = 0;
        for word in line_words {
            let len = word.chars().count();
            if current.is_empty() {
                current.push_str(&word);
                current_len = len;
            } else if current_len + 1 + len <= width {
                current.push(' ');
                current.push_str(&word);
                current_len += 1 + len;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(&word);
                current_len = len;
            }
        }
        lines.push(current);
    }
    lines.join(newline)
}

/// Split into complete protected spans and the text between them. An
/// unterminated opening marker is kept as ordinary text.
fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find(UNWRAP_OPEN) {
        let after_open = &rest[start + UNWRAP_OPEN.len()..];
        let Some(end) = after_open.find(UNWRAP_CLOSE) else {
            break;
        };
        if start > 0 {
            out.push(Segment::Text(&rest[..start]));
        }
        out.push(Segment::Protected(&after_open[..end]));
        rest = &after_open[end + UNWRAP_CLOSE.len()..];
    }
    if !rest.is_empty() {
        out.push(Segment::Text(rest));
    }
    out
}

/// Lines of the text, each a list of segments. Newlines inside protected
/// spans do not end a line.
fn split_lines(text: &str) -> Vec<Vec<Segment<'_>>> {
    let mut lines = vec![Vec::new()];
    for segment in segments(text) {
        match segment {
            Segment::Protected(_) => {
                if let Some(line) = lines.last_mut() {
                    line.push(segment);
                }
            }
            Segment::Text(s) => {
                for (i, part) in s.split('\n').enumerate() {
                    if i > 0 {
                        lines.push(Vec::new());
                    }
                    if !part.is_empty() {
                        if let Some(line) = lines.last_mut() {
                            line.push(Segment::Text(part));
                        }
                    }
                }
            }
        }
    }
    lines
}

/// Space-separated words of a line. A protected span joins the words it
/// touches without a space and is never split.
fn words(line: &[Segment<'_>]) -> Vec<String> {
    let mut words = vec![String::new()];
    for segment in line {
        match segment {
            Segment::Protected(s) => {
                if let Some(word) = words.last_mut() {
                    word.push_str(s);
                }
            }
            Segment::Text(s) => {
                for (i, part) in s.split(' ').enumerate() {
                    if i > 0 {
                        words.push(String::new());
                    }
                    if let Some(word) = words.last_mut() {
                        word.push_str(part);
                    }
                }
            }
        }
    }
    words
}

fn display_width(words: &[String]) -> usize {
    words.iter().map(|w| w.chars().count()).sum::<usize>() + words.len().saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_lines_untouched() {
        assert_eq!(word_wrap("a b c\nd", 10, "\n"), "a b c\nd");
    }

    #[test]
    fn test_breaks_on_spaces() {
        assert_eq!(
            word_wrap("the quick brown fox jumps", 10, "\n"),
            "the quick\nbrown fox\njumps"
        );
    }

    #[test]
    fn test_newline_sequence_used_for_joins() {
        assert_eq!(word_wrap("aa bb\ncc", 2, "\r\n"), "aa\r\nbb\r\ncc");
    }

    #[test]
    fn test_unwrapped_url_kept_whole_and_markers_removed() {
        let url = "https://example.com/a/very/long/path/that/exceeds/the/width";
        let text = format!("Visit\n{{unwrap}}{url}{{/unwrap}}\n");
        assert_eq!(word_wrap(&text, 20, "\n"), format!("Visit\n{url}\n"));
    }

    #[test]
    fn test_protected_span_with_spaces_is_one_word() {
        assert_eq!(
            word_wrap("go to {unwrap}a b c d e{/unwrap} now", 8, "\n"),
            "go to\na b c d e\nnow"
        );
    }

    #[test]
    fn test_placeholder_like_text_left_in_place() {
        assert_eq!(
            word_wrap(
                "literal {{unwrapped0}} then {unwrap}https://x.example/{/unwrap}",
                76,
                "\n"
            ),
            "literal {{unwrapped0}} then https://x.example/"
        );
    }

    #[test]
    fn test_unterminated_marker_left_alone() {
        assert_eq!(word_wrap("{unwrap}abc", 76, "\n"), "{unwrap}abc");
    }

    #[test]
    fn test_strip_markers() {
        assert_eq!(
            strip_unwrap_markers("<a href=\"{unwrap}https://x{/unwrap}\">x</a>"),
            "<a href=\"https://x\">x</a>"
        );
    }
}
