//! The article repository: an ordered, validated, read-only catalog.
//!
//! [`ArticleRepository::build`] is the only constructor. It checks the whole
//! index first (non-empty, well-formed entries, unique identifiers), then asks
//! the loader for every body in index order. Any failure aborts the build, so
//! a repository value always holds every entry of its index and nothing else.
//!
//! After construction the repository is plain immutable data: [`list`] and
//! [`find`] take `&self` and can be shared across threads without locking.
//!
//! [`list`]: ArticleRepository::list
//! [`find`]: ArticleRepository::find

use crate::loader::{BodyLoader, LoadError};
use crate::naming;
use crate::types::{Article, Footer, IndexEntry};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use tracing::{debug, info};

/// Placed between an article body and the shared footer.
pub const FOOTER_SEPARATOR: &str = "\n\n";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("index has no entries")]
    EmptyIndex,
    #[error("identifier '{0}' appears more than once in the index")]
    DuplicateIdentifier(String),
    #[error("no content found for index entry '{0}'")]
    MissingContent(String),
    #[error("invalid index entry at position {position}: {reason}")]
    InvalidEntry { position: usize, reason: String },
    #[error("failed to load '{identifier}': {source}")]
    Load {
        identifier: String,
        #[source]
        source: LoadError,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no article with identifier '{0}'")]
pub struct NotFound(pub String);

#[derive(Debug, Clone)]
pub struct ArticleRepository {
    articles: Vec<Article>,
    by_id: BTreeMap<String, usize>,
}

impl ArticleRepository {
    /// Materialize every index entry through `loader`.
    pub fn build<L>(index: &[IndexEntry], loader: &L) -> Result<Self, BuildError>
    where
        L: BodyLoader + ?Sized,
    {
        validate_index(index)?;

        let mut articles = Vec::with_capacity(index.len());
        let mut by_id = BTreeMap::new();
        for (order, entry) in index.iter().enumerate() {
            let body = loader.load(&entry.id).map_err(|e| match e {
                LoadError::NotFound(_) => BuildError::MissingContent(entry.id.clone()),
                source => BuildError::Load {
                    identifier: entry.id.clone(),
                    source,
                },
            })?;
            debug!(id = %entry.id, bytes = body.len(), "loaded article");

            by_id.insert(entry.id.clone(), order);
            articles.push(Article {
                identifier: entry.id.clone(),
                title: entry.title.trim().to_string(),
                heading: naming::leading_heading(&body),
                body,
                order,
            });
        }

        info!(articles = articles.len(), "catalog built");
        Ok(Self { articles, by_id })
    }

    /// All articles in index order.
    pub fn list(&self) -> &[Article] {
        &self.articles
    }

    pub fn find(&self, identifier: &str) -> Result<&Article, NotFound> {
        self.by_id
            .get(identifier)
            .map(|&i| &self.articles[i])
            .ok_or_else(|| NotFound(identifier.to_string()))
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Always false for a built repository; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// The articles before and after `article` in listing order.
    pub fn neighbors(&self, article: &Article) -> (Option<&Article>, Option<&Article>) {
        let prev = article
            .order
            .checked_sub(1)
            .and_then(|i| self.articles.get(i));
        let next = self.articles.get(article.order + 1);
        (prev, next)
    }
}

/// Body, separator, then the footer verbatim.
///
/// Not idempotent: feeding rendered output back in appends a second footer.
pub fn append_shared_footer(article: &Article, footer: &Footer) -> String {
    let mut out =
        String::with_capacity(article.body.len() + FOOTER_SEPARATOR.len() + footer.len());
    out.push_str(&article.body);
    out.push_str(FOOTER_SEPARATOR);
    out.push_str(footer.as_str());
    out
}

fn validate_index(index: &[IndexEntry]) -> Result<(), BuildError> {
    if index.is_empty() {
        return Err(BuildError::EmptyIndex);
    }

    let mut seen = BTreeSet::new();
    for (position, entry) in index.iter().enumerate() {
        if entry.title.trim().is_empty() {
            return Err(BuildError::InvalidEntry {
                position,
                reason: format!("blank title for '{}'", entry.id),
            });
        }
        if !naming::is_valid_identifier(&entry.id) {
            return Err(BuildError::InvalidEntry {
                position,
                reason: format!("invalid identifier '{}'", entry.id),
            });
        }
        if !seen.insert(entry.id.as_str()) {
            return Err(BuildError::DuplicateIdentifier(entry.id.clone()));
        }
    }
    Ok(())
}
