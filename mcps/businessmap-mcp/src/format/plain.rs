//! HTML to plain text

use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Decoded in this order, after tags are gone
const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
];

/// True when `content` holds at least one `<...>` pair
pub fn contains_html(content: &str) -> bool {
    TAG_RE.is_match(content)
}

/// Strip tags, decode the common entities, collapse whitespace and trim
///
/// Only the entities in `ENTITIES` are decoded; anything else is left as
/// written.
pub fn html_to_plain_text(html: &str) -> String {
    let stripped = TAG_RE.replace_all(html, "");

    let decoded = ENTITIES
        .iter()
        .fold(stripped.into_owned(), |text, &(entity, literal)| {
            text.replace(entity, literal)
        });

    WHITESPACE_RE.replace_all(&decoded, " ").trim().to_string()
}
