//! CLI output formatting.
//!
//! Each command has a `format_*` function returning `Vec<String>` for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## List
//!
//! ```text
//! Articles
//! 001 Tuples in Swift
//!     Id: article-6
//! 002 Initialization in Swift
//!     Id: article-5
//!
//! Footer
//!     footer.md (3 lines)
//! ```
//!
//! ## Check
//!
//! ```text
//! Orphans
//!     draft-generics.md
//! Title mismatches
//!     article-6: index "Tuples in Swift", heading "Tuples, Revisited"
//! ```
//!
//! ## Render
//!
//! ```text
//! Index → index.html
//! 001 Tuples in Swift → article-6.html
//!
//! Rendered 2 articles
//! ```

use crate::render::RenderReport;
use crate::scan::{Catalog, CheckReport};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

// ============================================================================
// list
// ============================================================================

pub fn format_list_output(catalog: &Catalog) -> Vec<String> {
    let mut lines = vec!["Articles".to_string()];
    for (i, article) in catalog.repository.list().iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), article.title));
        lines.push(format!("    Id: {}", article.identifier));
    }

    lines.push(String::new());
    lines.push("Footer".to_string());
    if catalog.footer.is_empty() {
        lines.push("    (none)".to_string());
    } else {
        lines.push(format!(
            "    {} ({} lines)",
            catalog.config.footer,
            catalog.footer.as_str().lines().count()
        ));
    }
    lines
}

pub fn print_list_output(catalog: &Catalog) {
    for line in format_list_output(catalog) {
        println!("{}", line);
    }
}

// ============================================================================
// check
// ============================================================================

pub fn format_check_output(report: &CheckReport, root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    if !report.orphans.is_empty() {
        lines.push("Orphans (not in index)".to_string());
        for path in &report.orphans {
            lines.push(format!("    {}", display_relative(path, root)));
        }
    }

    if !report.title_mismatches.is_empty() {
        lines.push("Title mismatches".to_string());
        for (id, title, heading) in &report.title_mismatches {
            lines.push(format!(
                "    {}: index \"{}\", heading \"{}\"",
                id, title, heading
            ));
        }
    }

    if !report.missing_headings.is_empty() {
        lines.push("Missing headings".to_string());
        for id in &report.missing_headings {
            lines.push(format!("    {}", id));
        }
    }

    lines
}

pub fn print_check_output(report: &CheckReport, root: &Path) {
    for line in format_check_output(report, root) {
        println!("{}", line);
    }
}

// ============================================================================
// render
// ============================================================================

pub fn format_render_output(report: &RenderReport, output_dir: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    let mut position = 0;
    for file in &report.files {
        let rel = display_relative(&file.path, output_dir);
        match file.identifier {
            Some(_) => {
                position += 1;
                lines.push(format!("{} {} → {}", format_index(position), file.title, rel));
            }
            None => lines.push(format!("Index → {}", rel)),
        }
    }

    lines.push(String::new());
    let n = report.article_count();
    lines.push(format!(
        "Rendered {} article{}",
        n,
        if n == 1 { "" } else { "s" }
    ));
    lines
}

pub fn print_render_output(report: &RenderReport, output_dir: &Path) {
    for line in format_render_output(report, output_dir) {
        println!("{}", line);
    }
}
