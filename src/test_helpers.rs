//! Shared test utilities for the article-catalog test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let catalog = scan(tmp.path()).unwrap();
//!
//! let article = find_article(&catalog, "article-5");
//! assert_eq!(titles(&catalog)[0], "Tuples in Swift");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::scan::Catalog;
use crate::types::Article;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write (or overwrite) a file under `dir`.
pub fn write_file(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

// =========================================================================
// Catalog lookups — panics with a clear message on miss
// =========================================================================

/// Find an article by identifier. Panics if not found.
pub fn find_article<'a>(catalog: &'a Catalog, id: &str) -> &'a Article {
    catalog.repository.find(id).unwrap_or_else(|_| {
        let ids: Vec<&str> = catalog
            .repository
            .list()
            .iter()
            .map(|a| a.identifier.as_str())
            .collect();
        panic!("article '{id}' not found. Available: {ids:?}")
    })
}

/// Article titles in listing order.
pub fn titles(catalog: &Catalog) -> Vec<&str> {
    catalog
        .repository
        .list()
        .iter()
        .map(|a| a.title.as_str())
        .collect()
}
