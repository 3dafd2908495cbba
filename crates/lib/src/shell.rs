//! Shell dialects and their assignment syntax.

use std::env;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::consts::{FISH_LIST_VAR, PATH_SEPARATOR};

/// Supported shell types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shell {
  Bash,
  Zsh,
  Sh,
  Fish,
  Csh,
  Tcsh,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a supported shell (supported: bash, zsh, sh, fish, csh, tcsh)")]
pub struct UnsupportedShell(pub String);

impl Shell {
  pub const ALL: [Shell; 6] = [Shell::Bash, Shell::Zsh, Shell::Sh, Shell::Fish, Shell::Csh, Shell::Tcsh];

  /// The shell named by `$SHELL`, or bash when it is unset.
  ///
  /// An unrecognised `$SHELL` is an error rather than a silent fallback, so
  /// output is never produced in the wrong syntax.
  pub fn detect() -> Result<Self, UnsupportedShell> {
    current_name().parse()
  }

  /// Get the shell name as a string
  pub fn as_str(&self) -> &'static str {
    match self {
      Shell::Bash => "bash",
      Shell::Zsh => "zsh",
      Shell::Sh => "sh",
      Shell::Fish => "fish",
      Shell::Csh => "csh",
      Shell::Tcsh => "tcsh",
    }
  }

  /// A reference the shell expands to the variable's value at evaluation time.
  pub fn var_ref(&self, name: &str) -> String {
    format!("${}", name)
  }

  /// Statement prepending `value` to `previous` in `variable`.
  ///
  /// Both sides are colon lists; empty sides are dropped so no stray
  /// separator appears. Fish treats `PATH` as a list and gets the entries
  /// space separated instead. csh aborts on a reference to an unset
  /// variable, so a deferred reference there is guarded with `$?VAR`.
  pub fn assignment(&self, variable: &str, value: &str, previous: &Previous) -> String {
    let previous_text = match previous {
      Previous::Value(text) => text.clone(),
      Previous::Deferred => self.var_ref(variable),
    };

    match self {
      Shell::Bash | Shell::Zsh | Shell::Sh => format!("export {}={}", variable, join_path(value, &previous_text)),
      Shell::Fish => {
        let joined = if variable == FISH_LIST_VAR {
          join_list(value, &previous_text)
        } else {
          join_path(value, &previous_text)
        };
        format!("set -x {} {};", variable, joined)
      }
      Shell::Csh | Shell::Tcsh => match previous {
        Previous::Value(_) => format!("setenv {} {};", variable, join_path(value, &previous_text)),
        Previous::Deferred => format!(
          "if ($?{var}) eval 'setenv {var} {set}'; if (! $?{var}) setenv {var} {unset};",
          var = variable,
          set = join_path(value, &format!("${{{}}}", variable)),
          unset = value,
        ),
      },
    }
  }
}

/// What a new value is prepended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Previous {
  /// The value captured from the environment; empty when unset.
  Value(String),

  /// Whatever the variable holds when the statement is evaluated.
  Deferred,
}

impl fmt::Display for Shell {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Shell {
  type Err = UnsupportedShell;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Shell::ALL
      .into_iter()
      .find(|shell| shell.as_str() == s)
      .ok_or_else(|| UnsupportedShell(s.to_string()))
  }
}

/// Basename of `$SHELL`, defaulting to `bash`.
pub fn current_name() -> String {
  env::var("SHELL")
    .ok()
    .and_then(|shell| Path::new(&shell).file_name().map(|n| n.to_string_lossy().into_owned()))
    .filter(|name| !name.is_empty())
    .unwrap_or_else(|| Shell::Bash.as_str().to_string())
}

fn join_path(value: &str, previous: &str) -> String {
  [value, previous]
    .into_iter()
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join(&PATH_SEPARATOR.to_string())
}

fn join_list(value: &str, previous: &str) -> String {
  value
    .split(PATH_SEPARATOR)
    .chain(previous.split(PATH_SEPARATOR))
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}
