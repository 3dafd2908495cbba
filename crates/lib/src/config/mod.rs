//! Loading catalog documents from the search path.
//!
//! `pkg.json` and `meta.json` are looked up in every search directory. Later
//! directories override earlier ones package by package (whole records are
//! replaced, fields are not merged).

mod loader;

pub use loader::{LoadError, SearchPath, load_catalog, load_document};
