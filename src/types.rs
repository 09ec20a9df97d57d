//! Shared types used across the catalog, renderer, and CLI output.
//!
//! Articles are serialized for `list --json`, so field names here are part of
//! the tool's output format.

use serde::{Deserialize, Serialize};

/// One line of the index: a display title and the identifier of its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexEntry {
    pub title: String,
    pub id: String,
}

impl IndexEntry {
    pub fn new(title: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            id: id.into(),
        }
    }
}

/// A fully materialized article.
///
/// Constructed only by [`crate::repository::ArticleRepository::build`] and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    /// Unique slug, usually the body file's stem (`article-6`)
    pub identifier: String,
    /// Display title from the index
    pub title: String,
    /// First heading found in the body, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    /// Raw body text. Embedded code fragments are opaque.
    #[serde(skip_serializing)]
    pub body: String,
    /// Zero-based position in the index
    pub order: usize,
}

/// The author-bio block appended to every rendered article.
///
/// Held as one immutable value and passed to the render step, so every
/// article gets the same text verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Footer(String);

impl Footer {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
