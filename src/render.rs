//! Article rendering.
//!
//! Takes a scanned [`Catalog`] and writes one file per article, each with the
//! shared footer appended exactly once via
//! [`append_shared_footer`](crate::repository::append_shared_footer).
//!
//! ## Formats
//!
//! - **Markdown**: `<id>.md`, the body and footer as plain text.
//! - **Html**: `<id>.html` per article plus an `index.html` table of contents
//!   in catalog order. Markdown is converted with `pulldown-cmark` and wrapped
//!   in a [maud](https://maud.lambda.xyz/) document, so titles are escaped.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html          # Html only
//! ├── article-6.html      # or article-6.md
//! └── article-5.html
//! ```
//!
//! Embedded code samples pass through as fenced code blocks; they are never
//! highlighted, compiled, or executed.

use crate::repository::{ArticleRepository, append_shared_footer};
use crate::scan::Catalog;
use crate::types::Article;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Options, Parser, html as md_html};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Article '{identifier}' would overwrite {}", path.display())]
    PathCollision { identifier: String, path: PathBuf },
}

const INDEX_PAGE: &str = "index.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    #[default]
    Markdown,
    Html,
}

impl RenderFormat {
    pub fn extension(self) -> &'static str {
        match self {
            RenderFormat::Markdown => "md",
            RenderFormat::Html => "html",
        }
    }
}

/// One written file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Article identifier, `None` for the index page
    pub identifier: Option<String>,
    pub title: String,
    pub path: PathBuf,
}

/// Files written by [`render`], index page first when present, then articles
/// in catalog order.
#[derive(Debug, Default)]
pub struct RenderReport {
    pub files: Vec<RenderedFile>,
}

impl RenderReport {
    pub fn article_count(&self) -> usize {
        self.files.iter().filter(|f| f.identifier.is_some()).count()
    }
}

const CSS: &str = r#"
body { max-width: 42rem; margin: 2rem auto; padding: 0 1rem; font-family: system-ui, sans-serif; line-height: 1.6; }
pre { overflow-x: auto; padding: 1rem; background: #f4f4f4; }
nav.pager { display: flex; justify-content: space-between; margin-top: 3rem; }
"#;

pub fn render(
    catalog: &Catalog,
    output_dir: &Path,
    format: RenderFormat,
) -> Result<RenderReport, RenderError> {
    let repo = &catalog.repository;
    check_output_paths(repo, format)?;

    fs::create_dir_all(output_dir)?;
    let mut report = RenderReport::default();

    if format == RenderFormat::Html {
        let path = output_dir.join(INDEX_PAGE);
        let page = render_index_page(&catalog.config.title, repo);
        fs::write(&path, page.into_string())?;
        report.files.push(RenderedFile {
            identifier: None,
            title: catalog.config.title.clone(),
            path,
        });
    }

    for article in repo.list() {
        let text = append_shared_footer(article, &catalog.footer);
        let contents = match format {
            RenderFormat::Markdown => text,
            RenderFormat::Html => {
                let (prev, next) = repo.neighbors(article);
                render_article_page(article, &text, prev, next).into_string()
            }
        };
        let path = output_dir.join(output_file_name(article, format));
        fs::write(&path, contents)?;
        debug!(id = %article.identifier, path = %path.display(), "rendered article");
        report.files.push(RenderedFile {
            identifier: Some(article.identifier.clone()),
            title: article.title.clone(),
            path,
        });
    }

    Ok(report)
}

fn output_file_name(article: &Article, format: RenderFormat) -> String {
    format!("{}.{}", article.identifier, format.extension())
}

/// Every output file name must be distinct, including the HTML index page.
/// Checked before anything is written.
fn check_output_paths(repo: &ArticleRepository, format: RenderFormat) -> Result<(), RenderError> {
    let mut taken = BTreeSet::new();
    if format == RenderFormat::Html {
        taken.insert(INDEX_PAGE.to_string());
    }
    for article in repo.list() {
        let name = output_file_name(article, format);
        if !taken.insert(name.clone()) {
            return Err(RenderError::PathCollision {
                identifier: article.identifier.clone(),
                path: PathBuf::from(name),
            });
        }
    }
    Ok(())
}

/// Convert Markdown to an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

// ============================================================================
// HTML Components
// ============================================================================

fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

fn article_href(article: &Article) -> String {
    format!("{}.html", article.identifier)
}

fn render_index_page(title: &str, repo: &ArticleRepository) -> Markup {
    let content = html! {
        main.index-page {
            h1 { (title) }
            ol.article-list {
                @for article in repo.list() {
                    li {
                        a href=(article_href(article)) { (article.title) }
                    }
                }
            }
        }
    };
    base_document(title, content)
}

fn render_article_page(
    article: &Article,
    text_with_footer: &str,
    prev: Option<&Article>,
    next: Option<&Article>,
) -> Markup {
    let content = html! {
        nav.breadcrumb {
            a href=(INDEX_PAGE) { "All articles" }
        }
        article {
            (PreEscaped(markdown_to_html(text_with_footer)))
        }
        nav.pager {
            @if let Some(p) = prev {
                a.prev href=(article_href(p)) rel="prev" { "← " (p.title) }
            } @else {
                span {}
            }
            @if let Some(n) = next {
                a.next href=(article_href(n)) rel="next" { (n.title) " →" }
            }
        }
    };
    base_document(&article.title, content)
}
