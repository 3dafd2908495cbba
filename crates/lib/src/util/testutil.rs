//! Test utilities for pmod-lib.
//!
//! Builds catalogs and host environments from inline fixtures so unit tests
//! never touch the real configuration files or process environment.

use serde_json::Value;

use crate::catalog::{Catalog, RawCatalog};
use crate::host::HostEnv;

/// Unwrap a `json!` object into a raw catalog document.
pub fn raw(value: Value) -> RawCatalog {
  match value {
    Value::Object(map) => map,
    other => panic!("fixture must be a JSON object, got {other}"),
  }
}

/// Resolve a catalog from inline `pkg.json` / `meta.json` fixtures.
pub fn catalog(packages: Value, templates: Value) -> Catalog {
  Catalog::resolve(&raw(packages), &raw(templates)).unwrap_or_else(|e| panic!("invalid fixture catalog: {e}"))
}

/// A host environment with the given home directory and variables.
pub fn host(home: &str, vars: &[(&str, &str)]) -> HostEnv {
  let mut all: Vec<(String, String)> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
  all.push(("HOME".to_string(), home.to_string()));
  HostEnv::from_vars(all)
}
