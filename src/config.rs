//! Catalog configuration module.
//!
//! Handles loading, validating, and merging `catalog.toml`. The file lives in
//! the content root and is sparse: user values are merged on top of stock
//! defaults, so a file only needs the keys it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "Articles"        # Catalog title (HTML index page)
//! index = "index.md"        # Index file, .md (link list) or .toml
//! articles_dir = "."        # Directory holding article bodies
//! extension = "md"          # Article body file extension
//! footer = "footer.md"      # Shared footer file ("" for none)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "catalog.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Catalog configuration loaded from `catalog.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Catalog title shown on the rendered index page.
    pub title: String,
    /// Index file, relative to the content root.
    pub index: String,
    /// Directory holding article bodies, relative to the content root.
    pub articles_dir: String,
    /// Extension of article body files, without the dot.
    pub extension: String,
    /// Shared footer file, relative to the content root. Empty disables it.
    pub footer: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            title: "Articles".to_string(),
            index: "index.md".to_string(),
            articles_dir: ".".to_string(),
            extension: "md".to_string(),
            footer: "footer.md".to_string(),
        }
    }
}

impl CatalogConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.index.trim().is_empty() {
            return Err(ConfigError::Validation("index must not be empty".into()));
        }
        if self.articles_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "articles_dir must not be empty".into(),
            ));
        }
        if self.extension.is_empty() {
            return Err(ConfigError::Validation(
                "extension must not be empty".into(),
            ));
        }
        if self.extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "extension must not start with a dot".into(),
            ));
        }
        Ok(())
    }

    pub fn index_path(&self, root: &Path) -> PathBuf {
        root.join(&self.index)
    }

    pub fn articles_path(&self, root: &Path) -> PathBuf {
        root.join(&self.articles_dir)
    }

    /// `None` when the footer is disabled.
    pub fn footer_path(&self, root: &Path) -> Option<PathBuf> {
        (!self.footer.is_empty()).then(|| root.join(&self.footer))
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(CatalogConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `catalog.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<CatalogConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: CatalogConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `catalog.toml` in the content root, falling back to
/// stock defaults when the file is absent.
pub fn load_config(root: &Path) -> Result<CatalogConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `catalog.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Article Catalog Configuration
# =============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Catalog title, used as the heading of the rendered index page.
title = "Articles"

# Index file listing the articles in display order, relative to this file.
#   *.md   - every [Title](article.md) link becomes an entry
#   *.toml - [[articles]] tables with `title` and `id`
index = "index.md"

# Directory holding the article bodies. An entry with id "article-6" is
# read from <articles_dir>/article-6.<extension>.
articles_dir = "."
extension = "md"

# Author bio appended verbatim to every rendered article.
# Set to "" to render articles without a footer.
footer = "footer.md"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = CatalogConfig::default();
        assert_eq!(config.title, "Articles");
        assert_eq!(config.index, "index.md");
        assert_eq!(config.articles_dir, ".");
        assert_eq!(config.extension, "md");
        assert_eq!(config.footer, "footer.md");
    }

    #[test]
    fn parse_partial_config() {
        let config: CatalogConfig = toml::from_str(r#"index = "README.md""#).unwrap();
        assert_eq!(config.index, "README.md");
        assert_eq!(config.extension, "md");
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: CatalogConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn footer_path_disabled_when_empty() {
        let config = CatalogConfig {
            footer: String::new(),
            ..CatalogConfig::default()
        };
        assert_eq!(config.footer_path(Path::new("content")), None);
    }

    #[test]
    fn paths_are_relative_to_root() {
        let config = CatalogConfig::default();
        let root = Path::new("content");
        assert_eq!(config.index_path(root), Path::new("content/index.md"));
        assert_eq!(
            config.footer_path(root),
            Some(PathBuf::from("content/footer.md"))
        );
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
title = "Swift Idioms"
articles_dir = "posts"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.title, "Swift Idioms");
        assert_eq!(config.articles_dir, "posts");
        // Unspecified values keep defaults
        assert_eq!(config.index, "index.md");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "title = [unclosed").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<CatalogConfig, _> = toml::from_str(r#"theme = "dark""#);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "indx = \"typo.md\"\n").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(CatalogConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_empty_index() {
        let config = CatalogConfig {
            index: " ".to_string(),
            ..CatalogConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn validate_extension_with_dot() {
        let config = CatalogConfig {
            extension: ".md".to_string(),
            ..CatalogConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_empty_extension() {
        let config = CatalogConfig {
            extension: String::new(),
            ..CatalogConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "articles_dir = \"\"\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"index = "index.md""#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"index = "README.md""#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("index").unwrap().as_str(), Some("README.md"));
    }

    #[test]
    fn merge_toml_preserves_base_keys() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").unwrap().as_integer(), Some(1));
        assert_eq!(merged.get("b").unwrap().as_integer(), Some(3));
    }

    #[test]
    fn load_raw_config_returns_none_when_no_file() {
        let tmp = TempDir::new().unwrap();
        assert!(load_raw_config(tmp.path()).unwrap().is_none());
    }
}
