//! Identifier and title conventions shared by the index parsers and the
//! repository.
//!
//! Articles are addressed by a slug taken from their file stem:
//! - `article-6.md` → `article-6`
//! - `./posts/tuples.md` → `tuples`
//! - `https://example.com/x` → no identifier (external link)
//!
//! Titles come from the index; the body's first heading is extracted
//! separately so `check` can report articles whose heading drifted from the
//! index title.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use std::path::Path;

/// Derive an article identifier from a link or path target.
///
/// Returns `None` for external URLs (any `scheme:` prefix or a
/// protocol-relative `//host` target), in-page anchors, and targets without a
/// usable file stem. Query strings and fragments are ignored.
pub fn identifier_from_target(target: &str) -> Option<String> {
    let target = target.trim();
    if target.is_empty() || target.starts_with('#') || target.starts_with("//") {
        return None;
    }
    if has_scheme(target) {
        return None;
    }
    let path = target.split(['#', '?']).next().unwrap_or(target);
    let stem = Path::new(path).file_stem()?.to_string_lossy().to_string();
    is_valid_identifier(&stem).then_some(stem)
}

/// True when `target` starts with a URI scheme such as `irc:` or `tel:`.
///
/// A scheme is a letter followed by letters, digits, `+`, `-`, or `.`, ending
/// in a `:` that comes before any `/`.
fn has_scheme(target: &str) -> bool {
    let Some(colon) = target.find(':') else {
        return false;
    };
    if target.find('/').is_some_and(|slash| slash < colon) {
        return false;
    }
    let scheme = &target[..colon];
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// An identifier is non-empty and contains no whitespace or path separators.
pub fn is_valid_identifier(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id.chars().any(|c| c.is_whitespace() || c == '/' || c == '\\')
}

/// Extract the text of the first heading in a Markdown body.
///
/// Inline formatting is dropped; inline code keeps its text. Returns `None`
/// when the body has no heading or the heading is empty.
pub fn leading_heading(body: &str) -> Option<String> {
    let mut in_heading = false;
    let mut text = String::new();

    for event in Parser::new(body) {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                in_heading = true;
                text.clear();
            }
            Event::End(TagEnd::Heading(_)) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
                in_heading = false;
            }
            Event::Text(t) | Event::Code(t) if in_heading => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak if in_heading => text.push(' '),
            _ => {}
        }
    }
    None
}
