// src/cli/validate.rs

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use tracing::error;

use crate::configdb::{DbConnection, DbReader};
use crate::namemap;
use crate::validate::source::SchemaFileSource;
use crate::validate::{KnownGaps, Validator};

use super::{collect_config_dbs, RunError, RunStatus};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Tab-delimited rename corpus: View, SourceColumnName, NewColumnName[, IsColumnAlias]
    #[arg(long)]
    pub column_map: PathBuf,

    /// Tab-delimited table synonym list: SourceTableName, TargetTableName
    #[arg(long)]
    pub table_synonyms: Option<PathBuf>,

    /// Tab-delimited live-schema dump: Database, Schema, TableOrView, Column
    #[arg(long)]
    pub schema_file: PathBuf,

    /// Configuration database files to validate
    pub config_dbs: Vec<PathBuf>,

    /// Directory searched for *.db configuration databases
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Validate every configuration against this one database instead of
    /// resolving through its database-group tag
    #[arg(long)]
    pub postgres_db: Option<String>,

    /// JSON file of known acceptable gaps: config db -> table -> columns
    #[arg(long)]
    pub known_gaps: Option<PathBuf>,

    /// Also write the run summary to this file
    #[arg(long)]
    pub results_file: Option<PathBuf>,
}

pub fn run(args: &ValidateArgs) -> Result<RunStatus, RunError> {
    // The corpus is loaded up front in both modes so a missing file fails
    // the run before any database is touched.
    let _map = namemap::load(&args.column_map, args.table_synonyms.as_deref())?;

    let files = collect_config_dbs(&args.config_dbs, args.input_dir.as_deref());
    if files.is_empty() {
        return Err(RunError::NoInputFiles);
    }

    let known_gaps = match &args.known_gaps {
        Some(path) => KnownGaps::load(path)?,
        None => KnownGaps::default(),
    };
    let source = SchemaFileSource::new(&args.schema_file);
    let mut validator = Validator::new(&source, args.postgres_db.clone(), known_gaps);

    println!("=== Validate ===\n");

    let mut status = RunStatus::default();
    let mut results: Vec<String> = Vec::new();
    for path in &files {
        let config_db = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let outcome = DbConnection::open_read(path)
            .and_then(|conn| {
                let params = DbReader::read_general_params(&conn)?;
                let form_fields = DbReader::read_form_fields(&conn)?;
                Ok((params, form_fields))
            })
            .map_err(RunError::from)
            .and_then(|(params, form_fields)| {
                validator
                    .validate_config_db(&config_db, &params, &form_fields)
                    .map_err(RunError::from)
            });

        match outcome {
            Ok(outcome) => {
                println!("{}", outcome.summary());
                for issue in &outcome.issues {
                    println!("  {}", issue);
                }
                results.push(outcome.summary());
                status.validation_errors += outcome.errors;
                status.processed += 1;
            }
            Err(e) => {
                error!("{}: {}", path.display(), e);
                println!("'{}': FAILED ({})", path.display(), e);
                results.push(format!("'{}': FAILED ({})", path.display(), e));
                status.failed += 1;
            }
        }
    }

    let summary = if status.validation_errors == 0 && status.failed == 0 {
        format!("All {} configuration database(s) validated cleanly", status.processed)
    } else {
        format!(
            "{} validation error(s) across {} database(s); {} database(s) failed",
            status.validation_errors,
            status.processed,
            status.failed
        )
    };
    println!("\n{}", summary);

    if let Some(path) = &args.results_file {
        let mut file = fs::File::create(path)?;
        writeln!(
            file,
            "remapdb validation results - {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        for line in &results {
            writeln!(file, "{}", line)?;
        }
        writeln!(file, "{}", summary)?;
    }

    Ok(status)
}
