//! Index loading: the ordered `(title, identifier)` list the catalog is
//! built from.
//!
//! ## Formats
//!
//! The file extension picks the parser.
//!
//! **TOML** (`index.toml`):
//!
//! ```toml
//! [[articles]]
//! title = "Tuples in Swift"
//! id = "article-6"
//! ```
//!
//! **Markdown table of contents** (`index.md`, typically the repository
//! README). Every inline link becomes an entry, in document order. The link
//! text is the title and the target's file stem is the identifier:
//!
//! ```markdown
//! - [Tuples in Swift](article-6.md)
//! - [Initialization in Swift](article-5.md)
//! ```
//!
//! External links (any `scheme:` target, `//host` targets, autolinks and
//! email autolinks) and in-page anchors are not articles and are skipped. Duplicate detection is left to the repository,
//! so an index that lists the same article twice fails the build instead of
//! being silently collapsed here.

use crate::naming;
use crate::types::IndexEntry;
use pulldown_cmark::{Event, LinkType, Parser, Tag, TagEnd};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Unsupported index format: {} (expected .toml or .md)", .0.display())]
    UnsupportedFormat(PathBuf),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlIndex {
    #[serde(default)]
    articles: Vec<IndexEntry>,
}

/// Read an index file, choosing the parser from its extension.
pub fn load_index(path: &Path) -> Result<Vec<IndexEntry>, IndexError> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    if !matches!(ext.as_str(), "toml" | "md" | "markdown") {
        return Err(IndexError::UnsupportedFormat(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|source| IndexError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match ext.as_str() {
        "toml" => parse_toml_index(&content),
        _ => Ok(parse_markdown_index(&content)),
    }
}

pub fn parse_toml_index(content: &str) -> Result<Vec<IndexEntry>, IndexError> {
    let index: TomlIndex = toml::from_str(content)?;
    Ok(index.articles)
}

/// Collect every article link in a Markdown document, in order.
pub fn parse_markdown_index(content: &str) -> Vec<IndexEntry> {
    let mut entries = Vec::new();
    // (identifier, accumulated link text) for the link currently open
    let mut current: Option<(Option<String>, String)> = None;

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::Link {
                link_type, dest_url, ..
            }) => {
                // Autolinks (`<https://…>`, `<me@example.com>`) are never articles
                let id = match link_type {
                    LinkType::Autolink | LinkType::Email => None,
                    _ => naming::identifier_from_target(&dest_url),
                };
                current = Some((id, String::new()));
            }
            Event::End(TagEnd::Link) => {
                if let Some((Some(id), text)) = current.take() {
                    entries.push(IndexEntry::new(text.trim(), id));
                }
            }
            Event::Text(t) | Event::Code(t) => {
                if let Some((_, text)) = current.as_mut() {
                    text.push_str(&t);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, text)) = current.as_mut() {
                    text.push(' ');
                }
            }
            _ => {}
        }
    }
    entries
}
