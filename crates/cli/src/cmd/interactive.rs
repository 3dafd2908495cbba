//! Implementation of the `pmod interactive` command.
//!
//! Package names are read from stdin, one or more per line, until EOF. Each
//! token is answered on stderr as it arrives; the accumulated selection is
//! then printed exactly like `pmod use` would print it.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use pmod_lib::catalog::{Catalog, Lookup};
use pmod_lib::{HostEnv, use_packages};

use super::{load_catalog, use_options};
use crate::ShellArgs;
use crate::output::or_list;

pub fn cmd_interactive(shell: &ShellArgs, config_dirs: &[PathBuf]) -> Result<()> {
  let options = use_options(shell)?;
  let catalog = load_catalog(config_dirs)?;

  let stdin = io::stdin();
  let prompt = stdin.is_terminal();
  let selection = collect_selection(stdin.lock(), &catalog, &mut io::stderr(), prompt)?;
  debug!(packages = ?selection, "selection complete");

  if selection.is_empty() {
    return Ok(());
  }

  let script = use_packages(&catalog, selection.as_slice(), &options, &HostEnv::capture())?;
  let mut out = io::stdout().lock();
  write!(out, "{}", script)?;
  out.flush()?;
  Ok(())
}

/// Read tokens until EOF and return the canonical names that resolved.
///
/// Lines are split on commas and whitespace. Unresolved tokens are reported
/// to `err` and left out of the selection.
pub fn collect_selection<R: BufRead, W: Write>(
  mut reader: R,
  catalog: &Catalog,
  err: &mut W,
  prompt: bool,
) -> io::Result<Vec<String>> {
  let mut selection = Vec::new();
  let mut line = String::new();

  loop {
    if prompt {
      write!(err, "> ")?;
      err.flush()?;
    }

    line.clear();
    if reader.read_line(&mut line)? == 0 {
      break;
    }

    for token in line.split(|c: char| c == ',' || c.is_whitespace()).filter(|t| !t.is_empty()) {
      match catalog.find(token) {
        Ok(Lookup::Found(name)) => {
          writeln!(err, "# use {}", name)?;
          selection.push(name);
        }
        Ok(Lookup::DidYouMean(suggestion)) => writeln!(err, "# Did you mean {} ?", suggestion)?,
        Ok(Lookup::Alternatives(suggestions)) | Ok(Lookup::Ambiguous(suggestions)) => {
          writeln!(err, "# Did you mean {} ?", or_list(&suggestions))?
        }
        Err(e) => writeln!(err, "# {}", e)?,
      }
    }
  }

  if prompt {
    writeln!(err)?;
  }
  Ok(selection)
}

#[cfg(test)]
mod tests {
  use super::*;
  use pmod_lib::catalog::RawCatalog;
  use serde_json::{Value, json};

  fn raw(value: Value) -> RawCatalog {
    match value {
      Value::Object(map) => map,
      other => panic!("expected an object, got {}", other),
    }
  }

  fn fixture() -> Catalog {
    Catalog::resolve(
      &raw(json!({
        "gcc9": { "__keywords": ["gcc"], "PATH": "/opt/gcc-9/bin" },
        "gcc10": { "PATH": "/opt/gcc-10/bin" },
        "cuda11": { "__keywords": ["cuda"], "PATH": "/usr/local/cuda/bin" },
      })),
      &RawCatalog::new(),
    )
    .unwrap()
  }

  fn run(input: &str) -> (Vec<String>, String) {
    let mut err = Vec::new();
    let selection = collect_selection(input.as_bytes(), &fixture(), &mut err, false).unwrap();
    (selection, String::from_utf8(err).unwrap())
  }

  #[test]
  fn tokens_split_on_commas_and_spaces() {
    let (selection, err) = run("gcc, cuda\ngcc10\n");
    assert_eq!(selection, vec!["gcc9", "cuda11", "gcc10"]);
    assert_eq!(err, "# use gcc9\n# use cuda11\n# use gcc10\n");
  }

  #[test]
  fn near_misses_are_suggested_and_skipped() {
    let (selection, err) = run("cudo11\n");
    assert!(selection.is_empty());
    assert_eq!(err, "# Did you mean cuda11 or cuda ?\n");
  }

  #[test]
  fn unknown_names_are_reported() {
    let (selection, err) = run("tensorflow cuda\n");
    assert_eq!(selection, vec!["cuda11"]);
    assert_eq!(err, "# Invalid Package Name `tensorflow`\n# use cuda11\n");
  }

  #[test]
  fn empty_input_selects_nothing() {
    let (selection, err) = run("");
    assert!(selection.is_empty());
    assert!(err.is_empty());
  }

  #[test]
  fn prompt_written_per_line() {
    let mut err = Vec::new();
    collect_selection("gcc\n".as_bytes(), &fixture(), &mut err, true).unwrap();
    assert_eq!(String::from_utf8(err).unwrap(), "> # use gcc9\n> \n");
  }
}
