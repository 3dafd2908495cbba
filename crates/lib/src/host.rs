//! Read-only snapshot of the invoking process environment.

use std::collections::HashMap;

use crate::paths;

/// The home directory and variable values seen at startup.
///
/// Captured once; rendering in expand mode reads previous values from here
/// and nothing ever writes back to the real environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostEnv {
  home: String,
  vars: HashMap<String, String>,
}

impl HostEnv {
  /// Snapshot the current process environment.
  ///
  /// Variables whose name or value is not valid UTF-8 are skipped.
  pub fn capture() -> Self {
    let vars = std::env::vars_os()
      .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
      .collect();
    let home = paths::home_dir()
      .map(|h| h.to_string_lossy().into_owned())
      .unwrap_or_default();
    Self { home, vars }
  }

  /// Build a snapshot from explicit pairs; `HOME` supplies the home directory.
  pub fn from_vars<I, K, V>(vars: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    let vars: HashMap<String, String> = vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
    let home = vars.get("HOME").cloned().unwrap_or_default();
    Self { home, vars }
  }

  /// The home directory, empty when unknown.
  pub fn home(&self) -> &str {
    &self.home
  }

  pub fn var(&self, name: &str) -> Option<&str> {
    self.vars.get(name).map(String::as_str)
  }
}
