//! Alias index: every name or keyword a user may type, mapped to a package.

use std::collections::{BTreeMap, HashSet};

use tracing::warn;

use super::{LookupError, Package};

/// What an index key resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasTarget {
  Package(String),

  /// Declared as an alias by several packages; never resolved implicitly.
  Ambiguous(Vec<String>),
}

/// A collision found while building the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasConflict {
  /// `declared_by` lists an alias that is another package's canonical name.
  /// The canonical name keeps precedence.
  ShadowsPackage { alias: String, declared_by: String },

  /// Several packages declare the same alias.
  Shared { alias: String, packages: Vec<String> },
}

#[derive(Debug, Clone, Default)]
pub struct AliasIndex {
  entries: BTreeMap<String, AliasTarget>,
  conflicts: Vec<AliasConflict>,
}

impl AliasIndex {
  /// Register every alias, then every canonical name as an alias of itself.
  ///
  /// Collisions are recorded in [`AliasIndex::conflicts`] and logged.
  pub fn build(packages: &[Package]) -> Self {
    let names: HashSet<&str> = packages.iter().map(|p| p.name.as_str()).collect();

    let mut owners: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for package in packages {
      for alias in &package.aliases {
        if *alias == package.name {
          continue;
        }
        let declared = owners.entry(alias.as_str()).or_default();
        if !declared.contains(&package.name.as_str()) {
          declared.push(package.name.as_str());
        }
      }
    }

    let mut entries = BTreeMap::new();
    let mut conflicts = Vec::new();

    for (alias, declared_by) in owners {
      if names.contains(alias) {
        for owner in declared_by {
          warn!(alias = %alias, declared_by = %owner, "alias is also a package name; the package wins");
          conflicts.push(AliasConflict::ShadowsPackage {
            alias: alias.to_string(),
            declared_by: owner.to_string(),
          });
        }
        continue;
      }

      let target = match declared_by.as_slice() {
        [owner] => AliasTarget::Package(owner.to_string()),
        many => {
          let packages: Vec<String> = many.iter().map(|p| p.to_string()).collect();
          warn!(alias = %alias, packages = %packages.join(", "), "alias declared by several packages");
          conflicts.push(AliasConflict::Shared {
            alias: alias.to_string(),
            packages: packages.clone(),
          });
          AliasTarget::Ambiguous(packages)
        }
      };
      entries.insert(alias.to_string(), target);
    }

    for name in names {
      entries.insert(name.to_string(), AliasTarget::Package(name.to_string()));
    }

    Self { entries, conflicts }
  }

  pub fn get(&self, token: &str) -> Option<&AliasTarget> {
    self.entries.get(token)
  }

  /// Resolve a user token to a canonical package name.
  pub fn resolve(&self, token: &str) -> Result<&str, LookupError> {
    match self.entries.get(token) {
      Some(AliasTarget::Package(name)) => Ok(name.as_str()),
      Some(AliasTarget::Ambiguous(candidates)) => Err(LookupError::AmbiguousAlias {
        alias: token.to_string(),
        candidates: candidates.clone(),
      }),
      None => Err(LookupError::PackageNotFound(token.to_string())),
    }
  }

  /// Every key, sorted.
  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.entries.keys().map(String::as_str)
  }

  pub fn conflicts(&self) -> &[AliasConflict] {
    &self.conflicts
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tracing_test::traced_test;

  fn package(name: &str, aliases: &[&str]) -> Package {
    Package {
      aliases: aliases.iter().map(|a| a.to_string()).collect(),
      ..Package::new(name)
    }
  }

  #[test]
  fn every_name_maps_to_itself() {
    let packages = vec![package("gcc9", &["gcc"]), package("cuda11", &[]), package("mkl", &["intel"])];
    let index = AliasIndex::build(&packages);

    for p in &packages {
      assert_eq!(index.resolve(&p.name).unwrap(), p.name);
    }
    assert_eq!(index.resolve("gcc").unwrap(), "gcc9");
    assert_eq!(index.resolve("intel").unwrap(), "mkl");
    assert!(index.conflicts().is_empty());
  }

  #[test]
  fn unknown_token_is_not_found() {
    let index = AliasIndex::build(&[package("gcc9", &["gcc"])]);
    assert_eq!(index.resolve("clang"), Err(LookupError::PackageNotFound("clang".to_string())));
  }

  #[test]
  fn own_name_as_alias_is_not_a_conflict() {
    let index = AliasIndex::build(&[package("gcc", &["gcc", "gnu"])]);
    assert!(index.conflicts().is_empty());
    assert_eq!(index.len(), 2);
  }

  #[test]
  #[traced_test]
  fn shared_alias_is_ambiguous() {
    let index = AliasIndex::build(&[package("cuda10", &["cuda"]), package("cuda11", &["cuda"])]);

    assert_eq!(
      index.resolve("cuda"),
      Err(LookupError::AmbiguousAlias {
        alias: "cuda".to_string(),
        candidates: vec!["cuda10".to_string(), "cuda11".to_string()],
      })
    );
    assert_eq!(
      index.conflicts(),
      [AliasConflict::Shared {
        alias: "cuda".to_string(),
        packages: vec!["cuda10".to_string(), "cuda11".to_string()],
      }]
    );
    assert!(logs_contain("alias declared by several packages"));
  }

  #[test]
  #[traced_test]
  fn canonical_name_beats_alias() {
    let index = AliasIndex::build(&[package("python", &[]), package("conda", &["python"])]);

    assert_eq!(index.resolve("python").unwrap(), "python");
    assert_eq!(
      index.conflicts(),
      [AliasConflict::ShadowsPackage {
        alias: "python".to_string(),
        declared_by: "conda".to_string(),
      }]
    );
    assert!(logs_contain("the package wins"));
  }

  #[test]
  fn keys_are_sorted() {
    let index = AliasIndex::build(&[package("b", &["z"]), package("a", &[])]);
    assert_eq!(index.keys().collect::<Vec<_>>(), vec!["a", "b", "z"]);
  }
}
