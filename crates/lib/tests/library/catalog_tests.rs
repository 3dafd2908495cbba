//! Resolution and alias index behaviour on a realistic catalog.

use pmod_lib::catalog::{Lookup, VarValue};

use super::common::fixture_catalog;

mod resolution {
  use super::*;

  #[test]
  fn template_fields_fill_in_but_package_wins() {
    let catalog = fixture_catalog();
    let gcc = catalog.get("gcc9").unwrap();

    assert_eq!(gcc.template_ref, None);
    assert_eq!(
      gcc.variables.get("CC"),
      Some(&VarValue::Single("{PREFIX}/bin/gcc".to_string()))
    );
    assert_eq!(
      gcc.variables.names().collect::<Vec<_>>(),
      vec!["CC", "PATH", "LD_LIBRARY_PATH", "MANPATH"]
    );
  }

  #[test]
  fn template_free_packages_keep_their_fields() {
    let catalog = fixture_catalog();
    let cudnn = catalog.get("cudnn8").unwrap();

    assert_eq!(cudnn.prefix(), "/opt/cudnn-8");
    assert_eq!(cudnn.variables.names().collect::<Vec<_>>(), vec!["LD_LIBRARY_PATH", "CPATH"]);
    assert!(cudnn.aliases.is_empty());
  }

  #[test]
  fn packages_keep_document_order() {
    let catalog = fixture_catalog();
    let names: Vec<_> = catalog.packages().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["gcc9", "cuda11", "cudnn8", "rustup", "conda"]);
  }
}

mod aliases {
  use super::*;

  #[test]
  fn every_name_is_its_own_alias() {
    let catalog = fixture_catalog();
    for package in catalog.packages() {
      assert_eq!(catalog.index().resolve(&package.name).unwrap(), package.name);
    }
  }

  #[test]
  fn keywords_resolve_to_owner() {
    let catalog = fixture_catalog();
    assert_eq!(catalog.lookup("gnu").unwrap().name, "gcc9");
    assert_eq!(catalog.lookup("cargo").unwrap().name, "rustup");
    assert!(catalog.index().conflicts().is_empty());
  }

  #[test]
  fn near_miss_is_suggested() {
    let catalog = fixture_catalog();
    assert_eq!(catalog.find("cudnn-8").unwrap(), Lookup::DidYouMean("cudnn8".to_string()));
  }
}
