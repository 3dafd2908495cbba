//! The `use` pipeline: tokens in, rendered script out.

use thiserror::Error;
use tracing::debug;

use crate::catalog::{Catalog, LookupError};
use crate::compose::{ComposeError, compose};
use crate::host::HostEnv;
use crate::render::{ExpandMode, RenderError, Script, render};
use crate::shell::Shell;

#[derive(Debug, Error)]
pub enum UseError {
  #[error(transparent)]
  Lookup(#[from] LookupError),

  #[error(transparent)]
  Compose(#[from] ComposeError),

  #[error(transparent)]
  Render(#[from] RenderError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UseOptions {
  pub shell: Shell,
  pub mode: ExpandMode,
}

/// Resolve every token, compose the packages in request order and render them.
///
/// All tokens are resolved before composition starts, so a bad token fails
/// the whole request and no script is produced.
pub fn use_packages<S: AsRef<str>>(
  catalog: &Catalog,
  tokens: &[S],
  options: &UseOptions,
  host: &HostEnv,
) -> Result<Script, UseError> {
  let names = tokens
    .iter()
    .map(|token| catalog.index().resolve(token.as_ref()))
    .collect::<Result<Vec<_>, _>>()?;
  debug!(packages = ?names, shell = %options.shell, mode = ?options.mode, "using packages");

  let composition = compose(catalog, &names)?;
  Ok(render(options.shell, &composition, host, options.mode)?)
}
