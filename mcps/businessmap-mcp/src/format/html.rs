//! Raw content to HTML
//!
//! Content is split into blocks on blank lines and each block is handled on
//! its own:
//!
//! 1. Blocks that already start with `<` are trusted HTML and kept as is.
//! 2. Blocks whose lines are mostly `-`/`*` or `N.` markers become one
//!    `<ul>`/`<ol>`. Markers are read from the original lines, before any
//!    inline substitution runs. Unmarked lines ahead of the first marker
//!    are emitted before the list as a heading or paragraph.
//! 3. Everything else goes through [`INLINE_STEPS`] and is wrapped in `<p>`
//!    unless it now starts with a block-level tag.
//!
//! Blocks are joined with newlines and any newline not directly followed
//! by a tag becomes `<br>`.

use regex::Regex;
use std::sync::LazyLock;

use super::plain::contains_html;

/// One markup substitution, applied with `Regex::replace_all`
struct Substitution {
    pattern: &'static str,
    replacement: &'static str,
}

/// Inline markup rules, applied in order. Bold runs before italic so `**`
/// is never read as two single stars.
const INLINE_STEPS: &[Substitution] = &[
    // ### Heading
    Substitution {
        pattern: r"(?m)^###\s+(.+)$",
        replacement: "<h3>${1}</h3>",
    },
    // **bold** and __bold__
    Substitution {
        pattern: r"\*\*(.+?)\*\*",
        replacement: "<strong>${1}</strong>",
    },
    Substitution {
        pattern: r"__(.+?)__",
        replacement: "<strong>${1}</strong>",
    },
    // *italic* and _italic_
    Substitution {
        pattern: r"\*(.+?)\*",
        replacement: "<em>${1}</em>",
    },
    Substitution {
        pattern: r"_(.+?)_",
        replacement: "<em>${1}</em>",
    },
    // [text](url)
    Substitution {
        pattern: r"\[([^\]]+)\]\(([^)]+)\)",
        replacement: r#"<a href="${2}">${1}</a>"#,
    },
    // `code`
    Substitution {
        pattern: r"`([^`]+)`",
        replacement: "<code>${1}</code>",
    },
];

static COMPILED_STEPS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    INLINE_STEPS
        .iter()
        .map(|step| (Regex::new(step.pattern).unwrap(), step.replacement))
        .collect()
});

static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*]\s+").unwrap());
static NUMBERED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s+").unwrap());
static BLOCK_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<(h3|ul|ol|hr|blockquote|pre)").unwrap());

/// Format raw content into an HTML fragment
///
/// Empty or whitespace-only input yields an empty string. Never fails:
/// markup that does not parse stays as literal text inside a paragraph.
pub fn format_content_to_html(content: &str) -> String {
    if content.trim().is_empty() {
        return String::new();
    }

    let normalized = content.replace("\r\n", "\n");
    let blocks: Vec<String> = normalized
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(format_block)
        .collect();

    convert_line_breaks(&blocks.join("\n"))
}

/// Return content that already holds a `<...>` pair unchanged, otherwise
/// format it with [`format_content_to_html`]
pub fn format_preserving_existing(content: &str) -> String {
    if content.trim().is_empty() {
        return String::new();
    }
    if contains_html(content) {
        return content.to_string();
    }
    format_content_to_html(content)
}

fn format_block(block: &str) -> String {
    if block.starts_with('<') {
        return block.to_string();
    }

    if let Some(list) = ListBlock::detect(block) {
        return list.render();
    }

    wrap_paragraph(apply_inline(block))
}

fn wrap_paragraph(formatted: String) -> String {
    if BLOCK_TAG_RE.is_match(&formatted) {
        formatted
    } else {
        format!("<p>{formatted}</p>")
    }
}

fn apply_inline(text: &str) -> String {
    COMPILED_STEPS
        .iter()
        .fold(text.to_string(), |acc, (re, replacement)| {
            re.replace_all(&acc, *replacement).into_owned()
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }

    fn marker(self) -> &'static Regex {
        match self {
            ListKind::Unordered => &BULLET_RE,
            ListKind::Ordered => &NUMBERED_RE,
        }
    }
}

/// A block whose lines are mostly list markers
///
/// Unmarked lines before the first marker form a lead (a heading or a
/// short intro) rendered ahead of the list. Later unmarked lines continue
/// the item above them.
#[derive(Debug)]
struct ListBlock {
    kind: ListKind,
    lead: Vec<String>,
    items: Vec<String>,
}

impl ListBlock {
    fn detect(block: &str) -> Option<Self> {
        let lines: Vec<&str> = block
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let count = |re: &Regex| lines.iter().filter(|line| re.is_match(line)).count();
        let majority = |n: usize| n * 2 > lines.len();

        let kind = if majority(count(&*BULLET_RE)) {
            ListKind::Unordered
        } else if majority(count(&*NUMBERED_RE)) {
            ListKind::Ordered
        } else {
            return None;
        };

        let marker = kind.marker();
        let mut lead: Vec<String> = Vec::new();
        let mut items: Vec<String> = Vec::new();
        for line in lines {
            if let Some(m) = marker.find(line) {
                items.push(line[m.end()..].to_string());
            } else if let Some(last) = items.last_mut() {
                last.push('\n');
                last.push_str(line);
            } else {
                lead.push(line.to_string());
            }
        }

        Some(Self { kind, lead, items })
    }

    fn render(&self) -> String {
        let items: String = self
            .items
            .iter()
            .map(|item| format!("<li>{}</li>", apply_inline(item)))
            .collect();
        let list = format!("<{tag}>{items}</{tag}>", tag = self.kind.tag());

        if self.lead.is_empty() {
            return list;
        }
        let lead = wrap_paragraph(apply_inline(&self.lead.join("\n")));
        format!("{lead}\n{list}")
    }
}

/// Replace every `\n` not immediately followed by `<` with `<br>`
fn convert_line_breaks(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut chars = html.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\n' && chars.peek() != Some(&'<') {
            out.push_str("<br>");
        } else {
            out.push(c);
        }
    }
    out
}
