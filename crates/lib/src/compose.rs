//! Per-variable fragment accumulation.
//!
//! Composition walks the requested packages in order and collects, for every
//! environment variable they declare, the list of values they contribute with
//! `{PREFIX}` already substituted. `{HOME}` is left in place for rendering.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::catalog::{Catalog, LookupError, Package};
use crate::consts::CMD_KEY;
use crate::placeholder::{self, PlaceholderError, PrefixResolver};

#[derive(Debug, Error)]
pub enum ComposeError {
  #[error(transparent)]
  Lookup(#[from] LookupError),

  #[error("invalid value for `{variable}` in `{package}`: {source}")]
  Placeholder {
    package: String,
    variable: String,
    #[source]
    source: PlaceholderError,
  },
}

/// Fragments per variable in first-use order, plus literal commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composition {
  variables: Vec<(String, Vec<String>)>,
  positions: HashMap<String, usize>,
  commands: Vec<String>,
}

impl Composition {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append one fragment; the first fragment of a variable fixes its position.
  pub fn push_fragment(&mut self, variable: &str, fragment: String) {
    match self.positions.get(variable) {
      Some(&i) => self.variables[i].1.push(fragment),
      None => {
        self.positions.insert(variable.to_string(), self.variables.len());
        self.variables.push((variable.to_string(), vec![fragment]));
      }
    }
  }

  pub fn push_command(&mut self, command: String) {
    self.commands.push(command);
  }

  /// Add everything `package` contributes.
  pub fn add_package(&mut self, package: &Package) -> Result<(), ComposeError> {
    let resolver = PrefixResolver(package.prefix());
    let invalid = |variable: &str, source: PlaceholderError| ComposeError::Placeholder {
      package: package.name.clone(),
      variable: variable.to_string(),
      source,
    };

    for (variable, value) in package.variables.iter() {
      for template in value.templates() {
        let fragment = placeholder::substitute_partial(template, &resolver).map_err(|e| invalid(variable, e))?;
        self.push_fragment(variable, fragment);
      }
    }

    for command in package.commands() {
      let command = placeholder::substitute_partial(command, &resolver).map_err(|e| invalid(CMD_KEY, e))?;
      self.push_command(command);
    }

    Ok(())
  }

  pub fn fragments(&self, variable: &str) -> Option<&[String]> {
    self.positions.get(variable).map(|&i| self.variables[i].1.as_slice())
  }

  /// Variables in first-use order with their fragments.
  pub fn variables(&self) -> impl Iterator<Item = (&str, &[String])> {
    self.variables.iter().map(|(v, f)| (v.as_str(), f.as_slice()))
  }

  pub fn commands(&self) -> &[String] {
    &self.commands
  }

  pub fn is_empty(&self) -> bool {
    self.variables.is_empty() && self.commands.is_empty()
  }
}

/// Compose the given canonical package names, in order.
///
/// Repeated packages and repeated fragments are kept as they are.
pub fn compose<S: AsRef<str>>(catalog: &Catalog, names: &[S]) -> Result<Composition, ComposeError> {
  let mut composition = Composition::new();

  for name in names {
    let name = name.as_ref();
    let package = catalog
      .get(name)
      .ok_or_else(|| LookupError::PackageNotFound(name.to_string()))?;
    debug!(package = %name, prefix = %package.prefix(), "composing package");
    composition.add_package(package)?;
  }

  Ok(composition)
}
