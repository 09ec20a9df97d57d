//! Body loaders: where article text comes from.
//!
//! The repository never touches storage itself. It asks a [`BodyLoader`] for
//! each identifier in the index and treats [`LoadError::NotFound`] as a
//! dangling index entry.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("no content for identifier '{0}'")]
    NotFound(String),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Resolves an article identifier to its raw body text.
pub trait BodyLoader {
    fn load(&self, identifier: &str) -> Result<String, LoadError>;
}

impl<F> BodyLoader for F
where
    F: Fn(&str) -> Result<String, LoadError>,
{
    fn load(&self, identifier: &str) -> Result<String, LoadError> {
        self(identifier)
    }
}

/// Reads `<dir>/<identifier>.<extension>` from disk.
#[derive(Debug, Clone)]
pub struct FsLoader {
    dir: PathBuf,
    extension: String,
}

impl FsLoader {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Path the loader reads for `identifier`.
    pub fn path_for(&self, identifier: &str) -> PathBuf {
        self.dir.join(format!("{identifier}.{}", self.extension))
    }
}

impl BodyLoader for FsLoader {
    fn load(&self, identifier: &str) -> Result<String, LoadError> {
        let path = self.path_for(identifier);
        match fs::read_to_string(&path) {
            Ok(body) => Ok(body),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(LoadError::NotFound(identifier.to_string()))
            }
            Err(source) => Err(LoadError::Io { path, source }),
        }
    }
}

/// In-memory loader, mostly for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MapLoader {
    bodies: BTreeMap<String, String>,
}

impl MapLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, identifier: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(identifier.into(), body.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MapLoader
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            bodies: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl BodyLoader for MapLoader {
    fn load(&self, identifier: &str) -> Result<String, LoadError> {
        self.bodies
            .get(identifier)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(identifier.to_string()))
    }
}
