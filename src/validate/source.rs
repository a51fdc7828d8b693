// src/validate/source.rs
// Injected live-schema capability: something that can produce all
// (schema, table_or_view, column) triples for a database identifier.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct SchemaColumn {
    pub schema: String,
    pub table: String,
    pub column: String,
}

#[derive(Error, Debug)]
pub enum SchemaSourceError {
    #[error("Schema source file not found: {0}")]
    MissingFile(PathBuf),
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Schema source has no rows for database '{0}'")]
    UnknownDatabase(String),
}

/// Capability for retrieving a live database's schema. Catalog/system
/// schemas are the producer's job to exclude.
pub trait SchemaSource {
    fn columns_for_database(
        &self,
        database: &str,
    ) -> Result<Vec<SchemaColumn>, SchemaSourceError>;
}

/// File-backed schema source: a tab-delimited dump with columns
/// `Database`, `Schema`, `TableOrView`, `Column` (header row optional).
pub struct SchemaFileSource {
    path: PathBuf,
}

impl SchemaFileSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl SchemaSource for SchemaFileSource {
    fn columns_for_database(
        &self,
        database: &str,
    ) -> Result<Vec<SchemaColumn>, SchemaSourceError> {
        if !self.path.is_file() {
            return Err(SchemaSourceError::MissingFile(self.path.clone()));
        }
        let file = File::open(&self.path).map_err(|source| SchemaSourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let reader = BufReader::new(file);

        let mut columns = Vec::new();
        let mut saw_database = false;
        let mut first_data_row = true;
        for (line_number, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| SchemaSourceError::Io {
                path: self.path.clone(),
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if first_data_row {
                first_data_row = false;
                if fields[0].trim() == "Database" {
                    continue;
                }
            }
            if fields.len() < 4 {
                warn!(
                    "{}:{}: expected 4 tab-separated fields, found {}; row skipped",
                    self.path.display(),
                    line_number + 1,
                    fields.len()
                );
                continue;
            }
            if !fields[0].trim().eq_ignore_ascii_case(database) {
                continue;
            }
            saw_database = true;
            columns.push(SchemaColumn {
                schema: fields[1].trim().to_string(),
                table: fields[2].trim().to_string(),
                column: fields[3].trim().to_string(),
            });
        }
        if !saw_database {
            return Err(SchemaSourceError::UnknownDatabase(database.to_string()));
        }
        Ok(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn dump_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("remapdb_schema_{}", name));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_reads_rows_for_requested_database() {
        let path = dump_file(
            "basic.tsv",
            "Database\tSchema\tTableOrView\tColumn\n\
             package_db\tpublic\tv_jobs\tjob\n\
             package_db\tpublic\tv_jobs\tpriority\n\
             other_db\tpublic\tv_other\tx\n",
        );
        let source = SchemaFileSource::new(&path);
        let columns = source.columns_for_database("package_db").unwrap();
        assert_eq!(columns.len(), 2);
        assert!(columns.iter().all(|c| c.table == "v_jobs"));
    }

    #[test]
    fn test_unknown_database_is_an_error() {
        let path = dump_file("unknown.tsv", "package_db\tpublic\tv_jobs\tjob\n");
        let source = SchemaFileSource::new(&path);
        match source.columns_for_database("missing_db") {
            Err(SchemaSourceError::UnknownDatabase(name)) => assert_eq!(name, "missing_db"),
            other => panic!("expected UnknownDatabase, got {:?}", other.map(|_| ())),
        }
    }
}
