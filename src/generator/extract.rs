//! Line-based metadata extraction from article text.
//!
//! This is a heuristic over raw lines, not a markdown parser: inline syntax such as
//! emphasis or links is left in the excerpt untouched.

use std::sync::LazyLock;

use regex::Regex;

/// Order of articles without any numeric hint. Sorts last.
pub(crate) const ORDER_SENTINEL: u32 = 9999;

pub(crate) const DEFAULT_EXCERPT_LENGTH: usize = 180;

const ELLIPSIS: char = '…';

// only a single `#` counts as the title heading
static TITLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#\s+(?P<title>.+?)\s*$").unwrap());
static TITLE_ORDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?P<num>[0-9]{1,3})\s*[.\-:]?\s*(?P<rest>.*)$").unwrap());
static FILENAME_ORDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?P<num>[0-9]{1,3})").unwrap());
static WHITESPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
// same line boundaries as unicode `splitlines`, lone `\r` included
static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r\n|[\n\r\x0B\x0C\x1C-\x1E\x{85}\x{2028}\x{2029}]").unwrap()
});

fn split_lines(md_text: &str) -> impl Iterator<Item = &str> {
    LINE_BREAK.split(md_text)
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Text of the first `# heading` line, or `fallback` if there is none.
pub(super) fn read_title(md_text: &str, fallback: &str) -> String {
    split_lines(md_text)
        .find_map(|line| TITLE_PATTERN.captures(line))
        .map(|caps| caps["title"].trim().to_string())
        .unwrap_or_else(|| fallback.to_string())
}

/// First paragraph after the title, whitespace-collapsed and cut to `max_len` characters.
pub(super) fn read_excerpt(md_text: &str, max_len: usize) -> String {
    let mut lines = split_lines(md_text).skip_while(|line| is_blank(line)).peekable();
    let _title = lines.next_if(|line| TITLE_PATTERN.is_match(line));

    let paragraph: Vec<&str> = lines
        .skip_while(|line| is_blank(line))
        .take_while(|line| !is_blank(line))
        .map(str::trim)
        .collect();

    let text = paragraph.join(" ");
    let text = WHITESPACE_RUNS.replace_all(text.trim(), " ");

    if text.chars().count() > max_len {
        let mut cut: String = text.chars().take(max_len.saturating_sub(1)).collect();
        cut.truncate(cut.trim_end().len());
        cut.push(ELLIPSIS);
        cut
    } else {
        text.into_owned()
    }
}

/// Numeric prefix of the title ("02. Something"), else of the file name ("02-something.md"),
/// else [`ORDER_SENTINEL`].
pub(super) fn parse_order(title: &str, filename: &str) -> u32 {
    let leading_number = |pattern: &Regex, s: &str| {
        pattern
            .captures(s)
            .and_then(|caps| caps["num"].parse::<u32>().ok())
    };

    leading_number(&TITLE_ORDER_PATTERN, title)
        .or_else(|| leading_number(&FILENAME_ORDER_PATTERN, filename))
        .unwrap_or(ORDER_SENTINEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_from_first_heading() {
        let text = "intro line\n\n#   Hello World  \n# Second\n";
        assert_eq!(read_title(text, "fallback"), "Hello World");
    }

    #[test]
    fn title_allows_leading_whitespace() {
        assert_eq!(read_title("   # Indented\n", "x"), "Indented");
    }

    #[test]
    fn title_ignores_deeper_headings() {
        let text = "## Not a title\n### Nor this\n#NoSpace\n";
        assert_eq!(read_title(text, "03-bounded-context"), "03-bounded-context");
    }

    #[test]
    fn title_falls_back_to_stem() {
        assert_eq!(read_title("", "my-article"), "my-article");
        assert_eq!(read_title("just text\n", "my-article"), "my-article");
    }

    #[test]
    fn excerpt_skips_title_and_blank_lines() {
        let text = "\n\n# Title\n\n\nFirst line\n  second   line \n\nNext paragraph\n";
        assert_eq!(read_excerpt(text, 180), "First line second line");
    }

    #[test]
    fn excerpt_without_title() {
        let text = "Some *intro* with [a link](http://x).\nMore.\n\nOther";
        assert_eq!(
            read_excerpt(text, 180),
            "Some *intro* with [a link](http://x). More."
        );
    }

    #[test]
    fn excerpt_keeps_subheading_as_text() {
        let text = "## 03. Bounded Context\n\nBody";
        assert_eq!(read_excerpt(text, 180), "## 03. Bounded Context");
    }

    #[test]
    fn excerpt_only_skips_title_when_first() {
        let text = "Lead\n\n# Title later\n";
        assert_eq!(read_excerpt(text, 180), "Lead");
    }

    #[test]
    fn excerpt_empty_when_no_paragraph() {
        assert_eq!(read_excerpt("", 180), "");
        assert_eq!(read_excerpt("# Only a title\n\n\n", 180), "");
    }

    #[test]
    fn carriage_return_only_line_endings() {
        let text = "# Title\r\rBody para\r";
        assert_eq!(read_title(text, "x"), "Title");
        assert_eq!(read_excerpt(text, 180), "Body para");
    }

    #[test]
    fn crlf_line_endings() {
        let text = "# Title\r\n\r\nFirst\r\nSecond\r\n\r\nNext\r\n";
        assert_eq!(read_title(text, "x"), "Title");
        assert_eq!(read_excerpt(text, 180), "First Second");
    }

    #[test]
    fn excerpt_collapses_inner_whitespace() {
        assert_eq!(read_excerpt("a\tb    c\u{00a0}\u{00a0}d", 180), "a b c d");
    }

    #[test]
    fn excerpt_truncates_to_limit_with_ellipsis() {
        let text = format!("# T\n\n{}\n", "a".repeat(300));
        let excerpt = read_excerpt(&text, 180);
        assert_eq!(excerpt.chars().count(), 180);
        assert!(excerpt.ends_with('…'));
        assert_eq!(excerpt, format!("{}…", "a".repeat(179)));
    }

    #[test]
    fn excerpt_at_limit_is_untouched() {
        let text = "b".repeat(180);
        assert_eq!(read_excerpt(&text, 180), text);
    }

    #[test]
    fn excerpt_trims_before_ellipsis() {
        // cut falls right after a space
        let text = "abcd efgh";
        assert_eq!(read_excerpt(text, 6), "abcd…");
    }

    #[test]
    fn excerpt_counts_characters_not_bytes() {
        let text = "é".repeat(10);
        assert_eq!(read_excerpt(&text, 10), text);
        assert_eq!(read_excerpt(&text, 5), "éééé…");
    }

    #[test]
    fn order_from_title_wins() {
        assert_eq!(parse_order("02. Topic", "05-topic.md"), 2);
        assert_eq!(parse_order("7: Seven", "x.md"), 7);
        assert_eq!(parse_order("12 - Twelve", "x.md"), 12);
    }

    #[test]
    fn order_from_filename() {
        assert_eq!(parse_order("Topic", "05-topic.md"), 5);
        assert_eq!(parse_order("Topic", "001_topic.md"), 1);
    }

    #[test]
    fn order_reads_at_most_three_digits() {
        assert_eq!(parse_order("2024 recap", "x.md"), 202);
    }

    #[test]
    fn order_sentinel_without_prefix() {
        assert_eq!(parse_order("CleanCode-4-DS", "cleancode-4-ds.md"), ORDER_SENTINEL);
        assert_eq!(parse_order("", ""), ORDER_SENTINEL);
    }
}
