//! Shared helpers for library integration tests.

use std::path::PathBuf;

use pmod_lib::config::{SearchPath, load_catalog};
use pmod_lib::{Catalog, HostEnv};

/// Directory holding `pkg.json` and `meta.json` fixtures.
pub fn fixtures_dir() -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// The fixture catalog, loaded through the real search-path loader.
pub fn fixture_catalog() -> Catalog {
  load_catalog(&SearchPath::new(vec![fixtures_dir()])).unwrap_or_else(|e| panic!("Failed to load fixtures: {}", e))
}

/// A host with `HOME=/home/dev` and a plain system PATH.
pub fn dev_host() -> HostEnv {
  HostEnv::from_vars([
    ("HOME", "/home/dev"),
    ("PATH", "/usr/local/bin:/usr/bin:/bin"),
    ("LD_LIBRARY_PATH", "/usr/lib"),
  ])
}
