//! Small text helpers shared by the normalizer and the storefront client.

use std::sync::OnceLock;

use regex::Regex;

fn line_break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)<br\s*/?>|</(p|li|div|h[1-6]|ul)>").expect("valid line break regex")
    })
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^<>]*>").expect("valid tag regex"))
}

/// Strip HTML tags, keeping block and `<br>` boundaries as line breaks.
///
/// Whitespace inside a line is collapsed and blank lines are dropped.
pub fn strip_html(input: &str) -> String {
    let with_breaks = line_break_re().replace_all(input, "\n");
    let without_tags = tag_re().replace_all(&with_breaks, "");
    let decoded = decode_entities(&without_tags);

    decoded
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_entities(input: &str) -> String {
    input
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Trimmed value, or `None` when absent or blank.
pub fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
