mod info;
mod interactive;
mod use_packages;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use pmod_lib::config::{self, SearchPath};
use pmod_lib::{Catalog, ExpandMode, Shell, UseOptions};

use crate::ShellArgs;

pub use info::cmd_info;
pub use interactive::cmd_interactive;
pub use use_packages::cmd_use;

/// Load the catalog from the default search path plus any `--config-dir`.
fn load_catalog(config_dirs: &[PathBuf]) -> Result<Catalog> {
  let mut search = SearchPath::from_env();
  for dir in config_dirs {
    search.push(dir);
  }
  debug!(dirs = ?search.dirs(), "searching for catalog files");

  config::load_catalog(&search).context("Failed to load package catalog")
}

/// Shell and expand mode for rendering. The shell is checked before any
/// file is read.
fn use_options(args: &ShellArgs) -> Result<UseOptions> {
  let shell = match &args.shell {
    Some(name) => name.parse::<Shell>()?,
    None => Shell::detect()?,
  };

  Ok(UseOptions {
    shell,
    mode: ExpandMode::from_not_expand(args.not_expand),
  })
}
