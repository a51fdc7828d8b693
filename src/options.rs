// src/options.rs
// Run options: defaults, optional JSON options file, CLI overrides.

use std::fs;
use std::io::{self, BufReader, ErrorKind};
use std::path::Path;

use tracing::{error, info};

/// Options governing a rename or validate run.
///
/// Loaded from an optional JSON options file, then overridden by explicit
/// CLI flags. Field names double as the JSON keys.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct RunOptions {
    pub snake_case_column_names: bool,
    pub replace_spaces_with_underscores: bool,
    pub rename_undefined_views: bool,
    pub prefix_view_schema: bool,
    pub preview: bool,
    pub rename_entry_page: bool,
    pub rename_list_report: bool,
    pub rename_detail_report: bool,
    pub rename_stored_procedures: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            snake_case_column_names: true,
            replace_spaces_with_underscores: false,
            rename_undefined_views: false,
            prefix_view_schema: true,
            preview: false,
            rename_entry_page: true,
            rename_list_report: true,
            rename_detail_report: true,
            rename_stored_procedures: true,
        }
    }
}

/// Load options from a JSON file. A missing file returns the defaults;
/// a file that exists but does not parse is an error.
pub fn load_options_file(path: &Path) -> io::Result<RunOptions> {
    info!("Loading options file {:?}", path);
    match fs::File::open(path) {
        Ok(file) => {
            let reader = BufReader::new(file);
            match serde_json::from_reader(reader) {
                Ok(options) => Ok(options),
                Err(e) => {
                    error!("Failed to parse options file {:?}: {}", path, e);
                    Err(io::Error::new(
                        ErrorKind::InvalidData,
                        format!("Failed to parse options file: {}", e),
                    ))
                }
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("Options file {:?} not found. Using defaults.", path);
            Ok(RunOptions::default())
        }
        Err(e) => {
            error!("Failed to open options file {:?}: {}", path, e);
            Err(e)
        }
    }
}
