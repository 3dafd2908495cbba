//! Names and reserved keys shared across the crate.

pub const APP_NAME: &str = "pmod";

/// File holding package definitions, looked up along the search path.
pub const PACKAGES_FILE: &str = "pkg.json";

/// File holding templates ("meta" packages), looked up along the search path.
pub const TEMPLATES_FILE: &str = "meta.json";

/// Colon separated list of directories replacing the default search path.
pub const CONFIG_PATH_ENV: &str = "PMOD_CONFIG_PATH";

/// System-wide configuration directory, searched first.
pub const SYSTEM_CONFIG_DIR: &str = "/usr/local/etc/pmod";

/// Keys starting with this marker are never environment variables.
pub const RESERVED_MARKER: &str = "__";

pub const KEYWORDS_KEY: &str = "__keywords";
pub const PREFIX_KEY: &str = "__prefix";
pub const META_KEY: &str = "__meta";
pub const CMD_KEY: &str = "__cmd";

/// Separator between fragments of a path-like variable.
pub const PATH_SEPARATOR: char = ':';

/// The one variable fish expects as a list rather than a colon string.
pub const FISH_LIST_VAR: &str = "PATH";
