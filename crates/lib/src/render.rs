//! Turning a composition into shell statements.

use std::fmt;

use thiserror::Error;

use crate::compose::Composition;
use crate::consts::{CMD_KEY, PATH_SEPARATOR};
use crate::host::HostEnv;
use crate::placeholder::{self, HomeResolver, PlaceholderError};
use crate::shell::{Previous, Shell};

/// How previous values and `{HOME}` are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExpandMode {
  /// Bake in the home directory and the variable's current value.
  #[default]
  Expand,

  /// Emit `$HOME` and `$VAR` so the shell resolves them when evaluating.
  Defer,
}

impl ExpandMode {
  pub fn from_not_expand(not_expand: bool) -> Self {
    if not_expand { ExpandMode::Defer } else { ExpandMode::Expand }
  }
}

#[derive(Debug, Error)]
pub enum RenderError {
  #[error("cannot render `{variable}`: {source}")]
  Placeholder {
    variable: String,
    #[source]
    source: PlaceholderError,
  },
}

/// One variable's new value and what it is prepended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
  pub variable: String,
  pub value: String,
  pub previous: Previous,
}

/// Fully rendered output: commands first, then one assignment per variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
  shell: Shell,
  commands: Vec<String>,
  assignments: Vec<Assignment>,
}

impl Script {
  pub fn commands(&self) -> &[String] {
    &self.commands
  }

  pub fn assignments(&self) -> &[Assignment] {
    &self.assignments
  }

  /// Output lines in print order.
  pub fn lines(&self) -> Vec<String> {
    let statements = self
      .assignments
      .iter()
      .map(|a| self.shell.assignment(&a.variable, &a.value, &a.previous));
    self.commands.iter().cloned().chain(statements).collect()
  }

  pub fn is_empty(&self) -> bool {
    self.commands.is_empty() && self.assignments.is_empty()
  }
}

impl fmt::Display for Script {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for line in self.lines() {
      writeln!(f, "{}", line)?;
    }
    Ok(())
  }
}

/// Render a composition for `shell`.
///
/// Every line is built before anything is returned; an error leaves nothing
/// half rendered.
pub fn render(shell: Shell, composition: &Composition, host: &HostEnv, mode: ExpandMode) -> Result<Script, RenderError> {
  let home_ref = shell.var_ref("HOME");
  let home = match mode {
    ExpandMode::Expand => HomeResolver(host.home()),
    ExpandMode::Defer => HomeResolver(&home_ref),
  };
  let expand_home = |variable: &str, template: &str| {
    placeholder::substitute(template, &home).map_err(|source| RenderError::Placeholder {
      variable: variable.to_string(),
      source,
    })
  };

  let commands = composition
    .commands()
    .iter()
    .map(|cmd| expand_home(CMD_KEY, cmd))
    .collect::<Result<Vec<_>, _>>()?;

  let separator = PATH_SEPARATOR.to_string();
  let assignments = composition
    .variables()
    .map(|(variable, fragments)| {
      let value = expand_home(variable, &fragments.join(&separator))?;
      let previous = match mode {
        ExpandMode::Expand => Previous::Value(host.var(variable).unwrap_or_default().to_string()),
        ExpandMode::Defer => Previous::Deferred,
      };
      Ok(Assignment {
        variable: variable.to_string(),
        value,
        previous,
      })
    })
    .collect::<Result<Vec<_>, RenderError>>()?;

  Ok(Script {
    shell,
    commands,
    assignments,
  })
}
