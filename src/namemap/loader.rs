// src/namemap/loader.rs
// Parses the tab-delimited rename corpus and table-synonym list.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use super::index::{NameMapEntry, NameMapIndex};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Rename map file not found: {0}")]
    MissingFile(PathBuf),
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Load the column-rename corpus, then overlay table synonyms.
///
/// `synonym_path` is optional; `None` (or in practice a blank CLI value)
/// yields an index with no synonyms. Either path existing but unreadable,
/// or a non-blank path that does not exist, is an error.
pub fn load(
    column_map_path: &Path,
    synonym_path: Option<&Path>,
) -> Result<NameMapIndex, LoadError> {
    let mut index = NameMapIndex::default();
    load_column_map(column_map_path, &mut index)?;
    if let Some(path) = synonym_path {
        load_table_synonyms(path, &mut index)?;
    }
    info!(
        "Loaded rename corpus: {} views, {} column renames ({} alias rows)",
        index.view_count(),
        index.entry_count(),
        index.alias_entry_count()
    );
    for warning in index.warnings() {
        warn!("{}", warning);
    }
    Ok(index)
}

fn open_lines(path: &Path) -> Result<BufReader<File>, LoadError> {
    if !path.is_file() {
        return Err(LoadError::MissingFile(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

fn load_column_map(path: &Path, index: &mut NameMapIndex) -> Result<(), LoadError> {
    let reader = open_lines(path)?;
    let mut first_data_row = true;
    for (line_number, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();

        // Optional header row, detected by its literal column names.
        if first_data_row {
            first_data_row = false;
            if fields[0].trim() == "View"
                || fields.get(1).map(|f| f.trim()) == Some("SourceColumnName")
            {
                continue;
            }
        }

        if fields.len() < 3 {
            warn!(
                "{}:{}: expected at least 3 tab-separated fields, found {}; row skipped",
                path.display(),
                line_number + 1,
                fields.len()
            );
            continue;
        }

        let view = fields[0].trim();
        let entry = NameMapEntry {
            source: fields[1].trim().to_string(),
            target: fields[2].trim().to_string(),
            is_alias: fields
                .get(3)
                .map(|f| parse_bool(f.trim()))
                .unwrap_or(false),
        };
        if view.is_empty() || entry.source.is_empty() {
            continue;
        }
        // Duplicate (view, source) pairs keep the first occurrence.
        index.register_view(view).insert_first_wins(entry);
    }
    Ok(())
}

fn load_table_synonyms(path: &Path, index: &mut NameMapIndex) -> Result<(), LoadError> {
    let reader = open_lines(path)?;
    let mut first_data_row = true;
    for (line_number, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();

        if first_data_row {
            first_data_row = false;
            if fields[0].trim() == "SourceTableName" {
                continue;
            }
        }

        if fields.len() < 2 {
            warn!(
                "{}:{}: expected at least 2 tab-separated fields, found {}; row skipped",
                path.display(),
                line_number + 1,
                fields.len()
            );
            continue;
        }

        let source = fields[0].trim();
        let target = fields[1].trim();
        if source.is_empty() || target.is_empty() {
            continue;
        }
        index.merge_synonym(source, target);
    }
    Ok(())
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "yes" | "1" | "y" | "t"
    )
}
