//! Library integration tests against the fixture catalog.

mod catalog_tests;
mod common;
mod use_tests;
