//! Implementation of the `pmod use` command.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;

use pmod_lib::{HostEnv, use_packages};

use super::{load_catalog, use_options};
use crate::ShellArgs;

/// Print the statements for `packages` to stdout.
///
/// Nothing is written unless every package resolves and renders.
pub fn cmd_use(packages: &[String], shell: &ShellArgs, config_dirs: &[PathBuf]) -> Result<()> {
  let options = use_options(shell)?;
  let catalog = load_catalog(config_dirs)?;
  let script = use_packages(&catalog, packages, &options, &HostEnv::capture())?;

  let mut out = io::stdout().lock();
  write!(out, "{}", script)?;
  out.flush()?;
  Ok(())
}
