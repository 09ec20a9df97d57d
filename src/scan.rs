//! Content-root scanning: config, index, bodies, and footer in one step.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                     # Content root
//! ├── catalog.toml             # Catalog configuration (optional)
//! ├── index.md                 # Ordered list of [Title](article.md) links
//! ├── footer.md                # Author bio appended to every article
//! ├── article-5.md             # Article bodies, addressed by file stem
//! └── article-6.md
//! ```
//!
//! [`scan`] loads all of it and returns a [`Catalog`]. Every failure (bad
//! config, unreadable index, dangling entry, missing footer) aborts the scan.
//!
//! [`check`] looks for softer problems on an already-built catalog: article
//! files nobody links to, and bodies whose first heading no longer matches
//! the index title. These are reported, not fatal.

use crate::config::{self, CatalogConfig};
use crate::index::{self, IndexError};
use crate::loader::FsLoader;
use crate::repository::{ArticleRepository, BuildError};
use crate::types::{Article, Footer};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Index error: {0}")]
    Index(#[from] IndexError),
    #[error("Catalog error in {}: {source}", index.display())]
    Build {
        index: PathBuf,
        #[source]
        source: BuildError,
    },
    #[error("Footer {} could not be read: {source}", path.display())]
    Footer {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Everything needed to list, show, and render a content root.
#[derive(Debug)]
pub struct Catalog {
    pub config: CatalogConfig,
    pub repository: ArticleRepository,
    pub footer: Footer,
    pub index_path: PathBuf,
}

pub fn scan(root: &Path) -> Result<Catalog, ScanError> {
    let config = config::load_config(root)?;
    let index_path = config.index_path(root);
    let entries = index::load_index(&index_path)?;
    debug!(index = %index_path.display(), entries = entries.len(), "index loaded");

    let loader = FsLoader::new(config.articles_path(root), config.extension.as_str());
    let repository =
        ArticleRepository::build(&entries, &loader).map_err(|source| ScanError::Build {
            index: index_path.clone(),
            source,
        })?;

    let footer = match config.footer_path(root) {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .map_err(|source| ScanError::Footer { path, source })?;
            Footer::new(text.trim_end())
        }
        None => Footer::default(),
    };

    Ok(Catalog {
        config,
        repository,
        footer,
        index_path,
    })
}

/// Non-fatal findings from [`check`].
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Article files in the articles directory that the index never names
    pub orphans: Vec<PathBuf>,
    /// `(identifier, index title, body heading)` where the two disagree
    pub title_mismatches: Vec<(String, String, String)>,
    /// Articles whose body has no heading at all
    pub missing_headings: Vec<String>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.orphans.is_empty()
            && self.title_mismatches.is_empty()
            && self.missing_headings.is_empty()
    }
}

pub fn check(root: &Path, catalog: &Catalog) -> CheckReport {
    let mut report = CheckReport {
        orphans: find_orphans(root, catalog),
        ..CheckReport::default()
    };

    for article in catalog.repository.list() {
        match &article.heading {
            Some(heading) if !titles_match(heading, &article.title) => {
                debug!(
                    id = %article.identifier,
                    %heading,
                    title = %article.title,
                    "heading differs from index title"
                );
                report.title_mismatches.push((
                    article.identifier.clone(),
                    article.title.clone(),
                    heading.clone(),
                ));
            }
            Some(_) => {}
            None => report.missing_headings.push(article.identifier.clone()),
        }
    }
    report
}

fn titles_match(heading: &str, title: &str) -> bool {
    heading.trim().eq_ignore_ascii_case(title.trim())
}

/// Article-extension files next to the bodies that no index entry resolves to.
///
/// The index and footer files are skipped even when they share the extension.
fn find_orphans(root: &Path, catalog: &Catalog) -> Vec<PathBuf> {
    let config = &catalog.config;
    let articles_dir = config.articles_path(root);

    let skip: BTreeSet<PathBuf> = [Some(catalog.index_path.clone()), config.footer_path(root)]
        .into_iter()
        .flatten()
        .filter_map(|p| fs::canonicalize(p).ok())
        .collect();
    let indexed: BTreeSet<&str> = catalog
        .repository
        .list()
        .iter()
        .map(|a: &Article| a.identifier.as_str())
        .collect();

    WalkDir::new(&articles_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .map(|e| e.eq_ignore_ascii_case(&config.extension))
                .unwrap_or(false)
        })
        .filter(|p| {
            let stem = p
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            !indexed.contains(stem.as_str())
        })
        .filter(|p| {
            fs::canonicalize(p)
                .map(|c| !skip.contains(&c))
                .unwrap_or(true)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn scan_fixtures_lists_in_index_order() {
        let tmp = setup_fixtures();
        let catalog = scan(tmp.path()).unwrap();
        assert_eq!(
            titles(&catalog),
            vec![
                "Tuples in Swift",
                "Initialization in Swift",
                "Optionals in Swift",
            ]
        );
    }

    #[test]
    fn scan_fixtures_find_by_identifier() {
        let tmp = setup_fixtures();
        let catalog = scan(tmp.path()).unwrap();
        let article = find_article(&catalog, "article-5");
        assert_eq!(article.title, "Initialization in Swift");
        assert!(article.body.contains("init("));
    }

    #[test]
    fn scan_reads_footer_without_trailing_newlines() {
        let tmp = setup_fixtures();
        let catalog = scan(tmp.path()).unwrap();
        assert!(catalog.footer.as_str().contains("About the author"));
        assert!(!catalog.footer.as_str().ends_with('\n'));
    }

    #[test]
    fn scan_with_toml_index() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "catalog.toml", "index = \"index.toml\"\nfooter = \"\"\n");
        write_file(
            tmp.path(),
            "index.toml",
            "[[articles]]\ntitle = \"Tuples in Swift\"\nid = \"article-6\"\n",
        );
        write_file(tmp.path(), "article-6.md", "# Tuples in Swift\n");

        let catalog = scan(tmp.path()).unwrap();
        assert_eq!(titles(&catalog), vec!["Tuples in Swift"]);
        assert!(catalog.footer.is_empty());
    }

    #[test]
    fn scan_articles_dir_from_config() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "catalog.toml", "articles_dir = \"posts\"\nfooter = \"\"\n");
        write_file(tmp.path(), "index.md", "- [Tuples](posts/article-6.md)\n");
        fs::create_dir_all(tmp.path().join("posts")).unwrap();
        write_file(&tmp.path().join("posts"), "article-6.md", "# Tuples\n");

        let catalog = scan(tmp.path()).unwrap();
        assert_eq!(catalog.repository.len(), 1);
    }

    #[test]
    fn dangling_index_entry_is_missing_content() {
        let tmp = setup_fixtures();
        fs::remove_file(tmp.path().join("article-5.md")).unwrap();

        let result = scan(tmp.path());
        assert!(matches!(
            result,
            Err(ScanError::Build {
                source: BuildError::MissingContent(ref id),
                ..
            }) if id == "article-5"
        ));
    }

    #[test]
    fn duplicate_link_is_duplicate_identifier() {
        let tmp = setup_fixtures();
        write_file(
            tmp.path(),
            "index.md",
            "- [A](article-6.md)\n- [B](article-6.md)\n",
        );
        let result = scan(tmp.path());
        assert!(matches!(
            result,
            Err(ScanError::Build {
                source: BuildError::DuplicateIdentifier(_),
                ..
            })
        ));
    }

    #[test]
    fn index_without_links_is_empty_index() {
        let tmp = setup_fixtures();
        write_file(tmp.path(), "index.md", "# Nothing here yet\n");
        let result = scan(tmp.path());
        assert!(matches!(
            result,
            Err(ScanError::Build {
                source: BuildError::EmptyIndex,
                ..
            })
        ));
    }

    #[test]
    fn missing_footer_is_error() {
        let tmp = setup_fixtures();
        fs::remove_file(tmp.path().join("footer.md")).unwrap();
        assert!(matches!(scan(tmp.path()), Err(ScanError::Footer { .. })));
    }

    #[test]
    fn missing_index_is_error() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(scan(tmp.path()), Err(ScanError::Index(_))));
    }

    #[test]
    fn bad_config_is_error() {
        let tmp = setup_fixtures();
        write_file(tmp.path(), "catalog.toml", "colour = \"red\"\n");
        assert!(matches!(scan(tmp.path()), Err(ScanError::Config(_))));
    }

    // =========================================================================
    // check tests
    // =========================================================================

    #[test]
    fn fixtures_check_finds_draft_orphan() {
        let tmp = setup_fixtures();
        let catalog = scan(tmp.path()).unwrap();
        let report = check(tmp.path(), &catalog);

        let names: Vec<String> = report
            .orphans
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["draft-generics.md"]);
    }

    #[test]
    fn check_skips_index_and_footer_files() {
        let tmp = setup_fixtures();
        fs::remove_file(tmp.path().join("draft-generics.md")).unwrap();
        let catalog = scan(tmp.path()).unwrap();
        assert!(check(tmp.path(), &catalog).orphans.is_empty());
    }

    #[test]
    fn check_reports_heading_drift() {
        let tmp = setup_fixtures();
        write_file(tmp.path(), "article-6.md", "# Tuples, Revisited\n\nBody.\n");
        let catalog = scan(tmp.path()).unwrap();
        let report = check(tmp.path(), &catalog);

        assert_eq!(
            report.title_mismatches,
            vec![(
                "article-6".to_string(),
                "Tuples in Swift".to_string(),
                "Tuples, Revisited".to_string()
            )]
        );
    }

    #[test]
    fn check_heading_comparison_ignores_case() {
        assert!(titles_match("tuples in swift", "Tuples in Swift"));
        assert!(!titles_match("Tuples", "Tuples in Swift"));
    }

    #[test]
    fn check_reports_missing_heading() {
        let tmp = setup_fixtures();
        write_file(tmp.path(), "article-1.md", "No heading, just prose.\n");
        let catalog = scan(tmp.path()).unwrap();
        let report = check(tmp.path(), &catalog);
        assert_eq!(report.missing_headings, vec!["article-1"]);
        assert!(!report.is_clean());
    }
}
