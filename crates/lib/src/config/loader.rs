use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::catalog::{Catalog, CatalogError, RawCatalog};
use crate::consts::{PACKAGES_FILE, TEMPLATES_FILE};
use crate::paths;

#[derive(Debug, Error)]
pub enum LoadError {
  #[error("failed to read {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse {path}: {source}")]
  Json {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("{path} must contain a JSON object at the top level")]
  NotAnObject { path: PathBuf },

  #[error(transparent)]
  Catalog(#[from] CatalogError),
}

/// Ordered directories to read catalog files from, lowest precedence first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath(Vec<PathBuf>);

impl SearchPath {
  pub fn new(dirs: Vec<PathBuf>) -> Self {
    Self(dirs)
  }

  /// The default directories, honouring `PMOD_CONFIG_PATH`.
  pub fn from_env() -> Self {
    Self(paths::search_path())
  }

  /// Append a directory with the highest precedence so far.
  pub fn push(&mut self, dir: impl Into<PathBuf>) {
    self.0.push(dir.into());
  }

  pub fn dirs(&self) -> &[PathBuf] {
    &self.0
  }
}

/// Read `file_name` from every search directory and merge the top-level keys.
///
/// Missing files are skipped. A key defined in a later directory replaces the
/// earlier record but keeps its original position.
pub fn load_document(file_name: &str, search_path: &SearchPath) -> Result<RawCatalog, LoadError> {
  let mut merged = RawCatalog::new();

  for dir in search_path.dirs() {
    let path = dir.join(file_name);
    let Some(document) = read_document(&path)? else {
      continue;
    };
    debug!(path = %path.display(), entries = document.len(), "loaded catalog file");
    for (key, value) in document {
      merged.insert(key, value);
    }
  }

  Ok(merged)
}

/// Load packages and templates and resolve them into a catalog.
pub fn load_catalog(search_path: &SearchPath) -> Result<Catalog, LoadError> {
  let packages = load_document(PACKAGES_FILE, search_path)?;
  let templates = load_document(TEMPLATES_FILE, search_path)?;
  Ok(Catalog::resolve(&packages, &templates)?)
}

fn read_document(path: &Path) -> Result<Option<RawCatalog>, LoadError> {
  let content = match fs::read_to_string(path) {
    Ok(content) => content,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
    Err(source) => {
      return Err(LoadError::Io {
        path: path.to_path_buf(),
        source,
      });
    }
  };

  match serde_json::from_str(&content) {
    Ok(Value::Object(map)) => Ok(Some(map)),
    Ok(_) => Err(LoadError::NotAnObject {
      path: path.to_path_buf(),
    }),
    Err(source) => Err(LoadError::Json {
      path: path.to_path_buf(),
      source,
    }),
  }
}
