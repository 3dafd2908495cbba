//! pmod-lib: package resolution and shell environment rendering for pmod.
//!
//! The pipeline is linear and runs once per invocation:
//! - `config`: load `pkg.json` / `meta.json` from the search path
//! - `catalog`: merge templates into packages and build the alias index
//! - `compose`: accumulate per-variable path fragments for the requested packages
//! - `render`: merge fragments with previous values and print them for a `Shell`

pub mod activate;
pub mod catalog;
pub mod compose;
pub mod config;
pub mod consts;
pub mod host;
pub mod paths;
pub mod placeholder;
pub mod render;
pub mod shell;
pub mod util;

pub use activate::{UseError, UseOptions, use_packages};
pub use catalog::{Catalog, CatalogError, Lookup, LookupError, Package, Template, VarValue};
pub use compose::{ComposeError, Composition, compose};
pub use host::HostEnv;
pub use render::{Assignment, ExpandMode, RenderError, Script, render};
pub use shell::{Previous, Shell, UnsupportedShell};
