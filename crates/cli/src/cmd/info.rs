//! Implementation of the `pmod info` command.

use std::path::PathBuf;

use anyhow::Result;
use serde_json::json;

use pmod_lib::catalog::{Catalog, Lookup, Package, VarValue};
use pmod_lib::consts::PATH_SEPARATOR;

use super::load_catalog;
use crate::output::{or_list, package_line, print_info, print_json, print_stat, print_warning};

/// List every package, or describe the one `name` resolves to.
///
/// A near miss prints suggestions and still succeeds; a name with no close
/// match is an error.
pub fn cmd_info(name: Option<&str>, json: bool, config_dirs: &[PathBuf]) -> Result<()> {
  let catalog = load_catalog(config_dirs)?;

  let Some(name) = name else {
    return list_packages(&catalog, json);
  };

  match catalog.find(name)? {
    Lookup::Found(found) => match catalog.get(&found) {
      Some(package) if json => print_json(package),
      Some(package) => {
        show_package(package);
        Ok(())
      }
      None => Ok(()),
    },
    Lookup::Ambiguous(candidates) => {
      if json {
        return print_json(&json!({ "query": name, "ambiguous": candidates }));
      }
      print_warning(&format!("`{}` is an alias of {}", name, or_list(&candidates)));
      Ok(())
    }
    Lookup::DidYouMean(suggestion) => suggest(name, &[suggestion], json),
    Lookup::Alternatives(suggestions) => suggest(name, &suggestions, json),
  }
}

fn list_packages(catalog: &Catalog, json: bool) -> Result<()> {
  if json {
    return print_json(&catalog.packages());
  }

  if catalog.is_empty() {
    print_info("No packages found in the search path");
    return Ok(());
  }

  for package in catalog.packages() {
    println!("{}", package_line(&package.name, &package.aliases));
  }
  Ok(())
}

fn show_package(package: &Package) {
  println!("{}", package.name);
  if !package.aliases.is_empty() {
    print_stat("Aliases", &package.aliases.join(", "));
  }
  if let Some(prefix) = &package.prefix {
    print_stat("Prefix", prefix);
  }
  for command in package.commands() {
    print_stat("Command", command);
  }
  for (variable, value) in package.variables.iter() {
    let shown = match value {
      VarValue::Single(v) => v.clone(),
      VarValue::List(vs) => vs.join(&PATH_SEPARATOR.to_string()),
    };
    print_stat(variable, &shown);
  }
}

fn suggest(name: &str, suggestions: &[String], json: bool) -> Result<()> {
  if json {
    return print_json(&json!({ "query": name, "suggestions": suggestions }));
  }
  print_info(&format!("Did you mean {} ?", or_list(suggestions)));
  Ok(())
}
