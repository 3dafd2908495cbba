//! End-to-end `use` rendering against the fixture catalog.

use pmod_lib::catalog::LookupError;
use pmod_lib::{ExpandMode, Shell, UseError, UseOptions, use_packages};

use super::common::{dev_host, fixture_catalog};

fn options(shell: Shell, mode: ExpandMode) -> UseOptions {
  UseOptions { shell, mode }
}

#[test]
fn bash_expand_merges_with_current_environment() {
  let catalog = fixture_catalog();
  let script = use_packages(
    &catalog,
    &["cuda", "cudnn8"],
    &options(Shell::Bash, ExpandMode::Expand),
    &dev_host(),
  )
  .unwrap();

  assert_eq!(
    script.lines(),
    vec![
      "export PATH=/usr/local/cuda-11.0/bin:/usr/local/bin:/usr/bin:/bin",
      "export LD_LIBRARY_PATH=/usr/local/cuda-11.0/lib64:/usr/local/cuda-11.0/extras/CUPTI/lib64:/opt/cudnn-8/lib64:/usr/lib",
      "export CPATH=/opt/cudnn-8/include",
    ]
  );
}

#[test]
fn bash_defer_references_shell_variables() {
  let catalog = fixture_catalog();
  let script = use_packages(
    &catalog,
    &["rust"],
    &options(Shell::Bash, ExpandMode::Defer),
    &dev_host(),
  )
  .unwrap();

  assert_eq!(script.lines(), vec!["export PATH=$HOME/.cargo/bin:$PATH"]);
}

#[test]
fn fish_expand_splits_path_only() {
  let catalog = fixture_catalog();
  let script = use_packages(
    &catalog,
    &["rustup", "cudnn8"],
    &options(Shell::Fish, ExpandMode::Expand),
    &dev_host(),
  )
  .unwrap();

  assert_eq!(
    script.lines(),
    vec![
      "set -x PATH /home/dev/.cargo/bin /usr/local/bin /usr/bin /bin;",
      "set -x LD_LIBRARY_PATH /opt/cudnn-8/lib64:/usr/lib;",
      "set -x CPATH /opt/cudnn-8/include;",
    ]
  );
}

#[test]
fn commands_printed_before_assignments() {
  let catalog = fixture_catalog();
  let script = use_packages(
    &catalog,
    &["conda"],
    &options(Shell::Zsh, ExpandMode::Expand),
    &dev_host(),
  )
  .unwrap();

  assert_eq!(
    script.lines(),
    vec![
      "source /home/dev/miniconda3/etc/profile.d/conda.sh",
      "export PATH=/home/dev/miniconda3/bin:/usr/local/bin:/usr/bin:/bin",
    ]
  );
}

#[test]
fn alias_and_name_render_identically() {
  let catalog = fixture_catalog();
  let opts = options(Shell::Bash, ExpandMode::Defer);
  let by_alias = use_packages(&catalog, &["gcc"], &opts, &dev_host()).unwrap();
  let by_name = use_packages(&catalog, &["gcc9"], &opts, &dev_host()).unwrap();
  assert_eq!(by_alias.to_string(), by_name.to_string());
}

#[test]
fn unknown_package_produces_no_script() {
  let catalog = fixture_catalog();
  let result = use_packages(
    &catalog,
    &["cuda", "tensorflow"],
    &options(Shell::Bash, ExpandMode::Expand),
    &dev_host(),
  );

  assert!(matches!(
    result,
    Err(UseError::Lookup(LookupError::PackageNotFound(ref name))) if name == "tensorflow"
  ));
}
