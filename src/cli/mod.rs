// src/cli/mod.rs
// CLI surface: rename and validate subcommands.

pub mod rename;
pub mod validate;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use thiserror::Error;
use walkdir::WalkDir;

use crate::configdb::DbError;
use crate::namemap::LoadError;
use crate::validate::source::SchemaSourceError;

#[derive(Parser)]
#[command(name = "remapdb")]
#[command(
    about = "Rewrites identifier names recorded in embedded configuration databases after a backing database migration",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rewrite recorded column, view, and procedure names using a rename corpus
    Rename(rename::RenameArgs),

    /// Cross-check recorded form-field names against a live database schema
    Validate(validate::ValidateArgs),
}

/// Errors that abort a whole run.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Corpus(#[from] LoadError),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error(transparent)]
    Schema(#[from] SchemaSourceError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("No configuration databases to process")]
    NoInputFiles,
}

/// Per-run tally used for the exit status.
#[derive(Debug, Default)]
pub struct RunStatus {
    pub processed: usize,
    pub failed: usize,
    pub validation_errors: usize,
}

impl RunStatus {
    pub fn clean(&self) -> bool {
        self.failed == 0 && self.validation_errors == 0
    }
}

/// Explicit paths plus any `*.db` files found under `input_dir`, sorted
/// and deduplicated.
pub fn collect_config_dbs(explicit: &[PathBuf], input_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = explicit.to_vec();
    if let Some(dir) = input_dir {
        for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
            if entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "db")
                    .unwrap_or(false)
            {
                files.push(entry.into_path());
            }
        }
    }
    files.sort();
    files.dedup();
    files
}
