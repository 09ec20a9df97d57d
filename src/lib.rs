//! # Article Catalog
//!
//! A read-only catalog of tutorial articles. An index file lists the articles
//! in reading order, each body is a Markdown file, and one author-bio footer
//! is appended to every article when it is rendered.
//!
//! ```text
//! content/
//! ├── catalog.toml     # optional settings
//! ├── index.md         # 1. [Tuples in Swift](article-6.md) ...
//! ├── footer.md        # shared author bio
//! └── article-6.md     # bodies, addressed by file stem
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`repository`] | `ArticleRepository`: build, list, find, and the shared-footer append |
//! | [`index`] | Index parsing from a Markdown link list or TOML |
//! | [`loader`] | `BodyLoader` trait with filesystem and in-memory loaders |
//! | [`scan`] | Opens a content root into a `Catalog` and checks it for orphans and drift |
//! | [`render`] | Writes articles (Markdown or HTML via Maud) with the footer applied |
//! | [`config`] | `catalog.toml` loading, merging, and validation |
//! | [`naming`] | Identifier derivation and leading-heading extraction |
//! | [`types`] | `Article`, `IndexEntry`, `Footer` |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## The Index Decides Order
//!
//! Articles are listed in the order the index names them. Nothing is sorted
//! by title, filename, or date; reordering the table of contents is how an
//! author reorders the catalog.
//!
//! ## All or Nothing
//!
//! A duplicate identifier, a link to a file that does not exist, or an empty
//! index fails the whole build. A partially built catalog would publish an
//! article list that silently differs from the index.
//!
//! ## Bodies Are Opaque
//!
//! Articles are full of code samples. They are stored and rendered as text
//! and never parsed, compiled, or run. The only structure read from a body is
//! its first heading, for `check`.
//!
//! ## Footer as a Value
//!
//! The footer is read once and passed to the render step as an immutable
//! [`types::Footer`]. Appending it is a pure function of article and footer.

pub mod config;
pub mod index;
pub mod loader;
pub mod naming;
pub mod output;
pub mod render;
pub mod repository;
pub mod scan;
pub mod types;

pub use loader::{BodyLoader, FsLoader, LoadError, MapLoader};
pub use repository::{ArticleRepository, BuildError, NotFound, append_shared_footer};
pub use types::{Article, Footer, IndexEntry};

#[cfg(test)]
pub(crate) mod test_helpers;
