// src/cli/rename.rs

use std::path::PathBuf;

use clap::Args;
use tracing::error;

use crate::namemap;
use crate::options::{load_options_file, RunOptions};
use crate::resolve::ResolutionEngine;
use crate::rewrite::rewrite_config_db;

use super::{collect_config_dbs, RunError, RunStatus};

#[derive(Args, Debug)]
pub struct RenameArgs {
    /// Tab-delimited rename corpus: View, SourceColumnName, NewColumnName[, IsColumnAlias]
    #[arg(long)]
    pub column_map: PathBuf,

    /// Tab-delimited table synonym list: SourceTableName, TargetTableName
    #[arg(long)]
    pub table_synonyms: Option<PathBuf>,

    /// Configuration database files to process
    pub config_dbs: Vec<PathBuf>,

    /// Directory searched for *.db configuration databases
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Write modified copies into this directory instead of updating in place
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Report the records that would change without writing anything
    #[arg(long)]
    pub preview: bool,

    /// JSON options file; explicit flags override its values
    #[arg(long)]
    pub options_file: Option<PathBuf>,

    /// Leave unmapped names in their current case
    #[arg(long)]
    pub no_snake_case: bool,

    /// Replace spaces with underscores in unmapped names
    #[arg(long)]
    pub replace_spaces: bool,

    /// Snake-case view names that have no corpus entry
    #[arg(long)]
    pub rename_undefined_views: bool,

    /// Do not prefix renamed objects with their database-group schema
    #[arg(long)]
    pub no_schema_prefix: bool,
}

impl RenameArgs {
    fn options(&self) -> Result<RunOptions, RunError> {
        let mut options = match &self.options_file {
            Some(path) => load_options_file(path)?,
            None => RunOptions::default(),
        };
        if self.preview {
            options.preview = true;
        }
        if self.no_snake_case {
            options.snake_case_column_names = false;
        }
        if self.replace_spaces {
            options.replace_spaces_with_underscores = true;
        }
        if self.rename_undefined_views {
            options.rename_undefined_views = true;
        }
        if self.no_schema_prefix {
            options.prefix_view_schema = false;
        }
        Ok(options)
    }
}

pub fn run(args: &RenameArgs) -> Result<RunStatus, RunError> {
    let options = args.options()?;
    let map = namemap::load(&args.column_map, args.table_synonyms.as_deref())?;

    let files = collect_config_dbs(&args.config_dbs, args.input_dir.as_deref());
    if files.is_empty() {
        return Err(RunError::NoInputFiles);
    }

    if options.preview {
        println!("=== Rename (preview) ===\n");
    } else {
        println!("=== Rename ===\n");
    }

    let mut engine = ResolutionEngine::new(&map, &options);
    let mut status = RunStatus::default();
    let mut total_changes = 0usize;
    for path in &files {
        match rewrite_config_db(path, args.output_dir.as_deref(), &mut engine, &options) {
            Ok(counts) => {
                println!("{}", counts.summary(&path.display().to_string(), options.preview));
                total_changes += counts.total();
                status.processed += 1;
            }
            // Open and write failures abort this file only; later files
            // still get processed.
            Err(e) => {
                error!("{}: {}", path.display(), e);
                println!("'{}': FAILED ({})", path.display(), e);
                status.failed += 1;
            }
        }
    }

    let verb = if options.preview { "would change" } else { "changed" };
    println!(
        "\n{} of {} databases processed, {} records {} in total",
        status.processed,
        files.len(),
        total_changes,
        verb
    );
    if !engine.missing_views().is_empty() {
        println!(
            "{} view(s) had no column rename map (see log for names)",
            engine.missing_views().len()
        );
    }
    if status.failed > 0 {
        println!("{} database(s) failed", status.failed);
    }
    Ok(status)
}
