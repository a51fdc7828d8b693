// src/namemap/mod.rs
// Rename corpus: view-qualified column renames plus table/view synonyms.

pub mod index;
pub mod loader;

pub use index::{ColumnMap, NameMapEntry, NameMapIndex};
pub use loader::{load, LoadError};
