//! Data model shared by the vigil matcher and filter crates.
//!
//! Everything here is plain data: discovered tasks, their containers and the
//! records a filter run attaches to them.

mod domain;
pub use domain::*;
