//! Well-known directories and the catalog search path.

use std::path::PathBuf;

use crate::consts::{APP_NAME, CONFIG_PATH_ENV, SYSTEM_CONFIG_DIR};

/// Returns the user's home directory, if known.
#[cfg(windows)]
pub fn home_dir() -> Option<PathBuf> {
  std::env::var_os("USERPROFILE").map(PathBuf::from)
}

/// Returns the user's home directory, if known.
#[cfg(not(windows))]
pub fn home_dir() -> Option<PathBuf> {
  std::env::var_os("HOME").filter(|h| !h.is_empty()).map(PathBuf::from)
}

/// Returns the per-user configuration directory for the application.
#[cfg(windows)]
pub fn config_dir() -> Option<PathBuf> {
  std::env::var_os("APPDATA").map(|appdata| PathBuf::from(appdata).join(APP_NAME))
}

/// Returns the per-user configuration directory for the application.
#[cfg(not(windows))]
pub fn config_dir() -> Option<PathBuf> {
  let config_home = std::env::var_os("XDG_CONFIG_HOME")
    .filter(|c| !c.is_empty())
    .map(PathBuf::from)
    .or_else(|| home_dir().map(|h| h.join(".config")))?;
  Some(config_home.join(APP_NAME))
}

/// Directories searched for catalog files, lowest precedence first.
///
/// `PMOD_CONFIG_PATH` replaces the defaults when set. Otherwise the system
/// directory, the user configuration directory and the current directory
/// are searched in that order.
pub fn search_path() -> Vec<PathBuf> {
  if let Some(custom) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
    return std::env::split_paths(&custom).collect();
  }

  let mut dirs = vec![PathBuf::from(SYSTEM_CONFIG_DIR)];
  dirs.extend(config_dir());
  dirs.push(PathBuf::from("."));
  dirs
}

#[cfg(test)]
#[cfg(not(windows))]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  #[serial]
  fn xdg_config_home_takes_precedence() {
    temp_env::with_vars(
      [
        ("XDG_CONFIG_HOME", Some("/custom/config")),
        ("HOME", Some("/home/user")),
      ],
      || {
        assert_eq!(config_dir(), Some(PathBuf::from("/custom/config").join(APP_NAME)));
      },
    );
  }

  #[test]
  #[serial]
  fn config_falls_back_to_home() {
    temp_env::with_vars(
      [("XDG_CONFIG_HOME", None::<&str>), ("HOME", Some("/home/user"))],
      || {
        assert_eq!(config_dir(), Some(PathBuf::from("/home/user/.config").join(APP_NAME)));
      },
    );
  }

  #[test]
  #[serial]
  fn no_home_means_no_user_config() {
    temp_env::with_vars(
      [
        (CONFIG_PATH_ENV, None::<&str>),
        ("XDG_CONFIG_HOME", None::<&str>),
        ("HOME", None::<&str>),
      ],
      || {
        assert_eq!(home_dir(), None);
        assert_eq!(config_dir(), None);
        assert_eq!(
          search_path(),
          vec![PathBuf::from(SYSTEM_CONFIG_DIR), PathBuf::from(".")]
        );
      },
    );
  }

  #[test]
  #[serial]
  fn default_search_order() {
    temp_env::with_vars(
      [
        (CONFIG_PATH_ENV, None::<&str>),
        ("XDG_CONFIG_HOME", None::<&str>),
        ("HOME", Some("/home/user")),
      ],
      || {
        assert_eq!(
          search_path(),
          vec![
            PathBuf::from("/usr/local/etc/pmod"),
            PathBuf::from("/home/user/.config/pmod"),
            PathBuf::from("."),
          ]
        );
      },
    );
  }

  #[test]
  #[serial]
  fn env_override_replaces_defaults() {
    temp_env::with_var(CONFIG_PATH_ENV, Some("/a:/b"), || {
      assert_eq!(search_path(), vec![PathBuf::from("/a"), PathBuf::from("/b")]);
    });
  }
}
