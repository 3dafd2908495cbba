//! The resolved package catalog.
//!
//! A [`Catalog`] is built once per invocation from the raw `pkg.json` and
//! `meta.json` documents and is read-only afterwards. It owns the merged
//! packages and the [`AliasIndex`] used to turn user tokens into names.

mod index;
mod resolve;
mod search;
mod types;

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::placeholder::PlaceholderError;

pub use index::{AliasConflict, AliasIndex, AliasTarget};
pub use resolve::{merge_template, resolve};
pub use search::{Lookup, MAX_SUGGESTIONS, SIMILARITY_CUTOFF, find, suggest};
pub use types::{Package, RawCatalog, Template, VarValue, Variables};

/// Errors raised while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("package `{package}` references unknown template `{template}`")]
  TemplateNotFound { package: String, template: String },

  #[error("invalid `{field}` in `{owner}`: expected {expected}")]
  InvalidField {
    owner: String,
    field: String,
    expected: &'static str,
  },

  #[error("invalid value for `{field}` in `{owner}`: {source}")]
  Placeholder {
    owner: String,
    field: String,
    #[source]
    source: PlaceholderError,
  },
}

/// Errors raised when a user token does not name exactly one package.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
  #[error("Invalid Package Name `{0}`")]
  PackageNotFound(String),

  #[error("alias `{alias}` is ambiguous, it is declared by: {}", .candidates.join(", "))]
  AmbiguousAlias { alias: String, candidates: Vec<String> },
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
  packages: Vec<Package>,
  positions: HashMap<String, usize>,
  index: AliasIndex,
}

impl Catalog {
  /// Expand templates and build the alias index.
  pub fn resolve(raw_packages: &RawCatalog, raw_templates: &RawCatalog) -> Result<Self, CatalogError> {
    let packages = resolve(raw_packages, raw_templates)?;
    Ok(Self::from_packages(packages))
  }

  /// Build a catalog from already resolved packages.
  pub fn from_packages(packages: Vec<Package>) -> Self {
    let positions = packages
      .iter()
      .enumerate()
      .map(|(i, p)| (p.name.clone(), i))
      .collect();
    let index = AliasIndex::build(&packages);
    debug!(packages = packages.len(), aliases = index.len(), "catalog ready");
    Self {
      packages,
      positions,
      index,
    }
  }

  pub fn get(&self, name: &str) -> Option<&Package> {
    self.positions.get(name).map(|&i| &self.packages[i])
  }

  /// Packages in document order.
  pub fn packages(&self) -> &[Package] {
    &self.packages
  }

  pub fn index(&self) -> &AliasIndex {
    &self.index
  }

  /// Resolve a name or alias to its package.
  pub fn lookup(&self, token: &str) -> Result<&Package, LookupError> {
    let name = self.index.resolve(token)?;
    self
      .get(name)
      .ok_or_else(|| LookupError::PackageNotFound(token.to_string()))
  }

  /// Resolve a name or alias, suggesting near misses instead of failing outright.
  pub fn find(&self, token: &str) -> Result<Lookup, LookupError> {
    find(token, &self.index)
  }

  pub fn len(&self) -> usize {
    self.packages.len()
  }

  pub fn is_empty(&self) -> bool {
    self.packages.is_empty()
  }
}
