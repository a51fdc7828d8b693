// src/validate/mod.rs
// Schema validation: cross-checks recorded form-field names against a
// live database schema fetched through an injected SchemaSource.

pub mod source;

use std::collections::HashMap;
use std::fs;
use std::io::{self, BufReader, ErrorKind};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::configdb::records::{FormField, GeneralParams};
use crate::ident::{split_schema, strip_quotes};
use crate::resolve::groups;

use source::{SchemaSource, SchemaSourceError};

/// `table/view name -> column set` within one schema.
pub type TableColumns = HashMap<String, Vec<String>>;
/// `schema -> tables` for one live database.
pub type SchemaMap = HashMap<String, TableColumns>;

/// Entry-page view values that mean "no view configured".
const PLACEHOLDER_VIEWS: [&str; 2] = ["(none)", "na"];

/// Per-run cache of live schemas, fetched at most once per database name.
#[derive(Default)]
pub struct LiveSchemaCache {
    by_database: HashMap<String, SchemaMap>,
}

impl LiveSchemaCache {
    pub fn get_or_fetch(
        &mut self,
        source: &dyn SchemaSource,
        database: &str,
    ) -> Result<&SchemaMap, SchemaSourceError> {
        if !self.by_database.contains_key(database) {
            info!("Fetching live schema for database '{}'", database);
            let mut map: SchemaMap = HashMap::new();
            for column in source.columns_for_database(database)? {
                map.entry(column.schema)
                    .or_default()
                    .entry(column.table)
                    .or_default()
                    .push(column.column);
            }
            self.by_database.insert(database.to_string(), map);
        }
        Ok(&self.by_database[database])
    }
}

/// Progress through validating one configuration database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStage {
    NotStarted,
    SchemaResolved,
    FieldsChecked,
    Done,
}

/// Result of validating one configuration database.
#[derive(Debug)]
pub struct ValidationOutcome {
    pub config_db: String,
    pub stage: ValidationStage,
    pub skipped: bool,
    pub errors: usize,
    pub issues: Vec<String>,
}

impl ValidationOutcome {
    fn skipped(config_db: &str, reason: String) -> Self {
        warn!("'{}': {}", config_db, reason);
        Self {
            config_db: config_db.to_string(),
            stage: ValidationStage::Done,
            skipped: true,
            errors: 0,
            issues: vec![reason],
        }
    }

    pub fn summary(&self) -> String {
        if self.skipped {
            format!("'{}': skipped ({})", self.config_db, self.issues.join("; "))
        } else if self.errors == 0 {
            format!("'{}': OK", self.config_db)
        } else {
            format!("'{}': {} error(s)", self.config_db, self.errors)
        }
    }
}

/// Known acceptable gaps: `config db -> table/view -> ignorable columns`,
/// loaded from an optional JSON file.
#[derive(Debug, Default, serde::Deserialize)]
pub struct KnownGaps(HashMap<String, HashMap<String, Vec<String>>>);

impl KnownGaps {
    pub fn load(path: &Path) -> io::Result<Self> {
        match fs::File::open(path) {
            Ok(file) => serde_json::from_reader(BufReader::new(file)).map_err(|e| {
                io::Error::new(
                    ErrorKind::InvalidData,
                    format!("Failed to parse known-gaps file: {}", e),
                )
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    fn is_allowed(&self, config_db: &str, table: &str, column: &str) -> bool {
        self.0
            .get(config_db)
            .and_then(|tables| tables.get(table))
            .map(|columns| columns.iter().any(|c| c == column))
            .unwrap_or(false)
    }
}

pub struct Validator<'a> {
    source: &'a dyn SchemaSource,
    cache: LiveSchemaCache,
    /// Fixed database name used for every configuration (Postgres mode);
    /// `None` resolves through the database-group tag instead.
    fixed_database: Option<String>,
    known_gaps: KnownGaps,
}

impl<'a> Validator<'a> {
    pub fn new(
        source: &'a dyn SchemaSource,
        fixed_database: Option<String>,
        known_gaps: KnownGaps,
    ) -> Self {
        Self {
            source,
            cache: LiveSchemaCache::default(),
            fixed_database,
            known_gaps,
        }
    }

    /// Validate one configuration database's form-field names against the
    /// live schema of its target database. `Err` means the schema itself
    /// could not be fetched, which aborts processing of this file.
    pub fn validate_config_db(
        &mut self,
        config_db: &str,
        params: &GeneralParams,
        form_fields: &[FormField],
    ) -> Result<ValidationOutcome, SchemaSourceError> {
        let mut stage = ValidationStage::NotStarted;

        let database = match &self.fixed_database {
            Some(name) => name.clone(),
            None => match groups::database_name_for(&params.database_group) {
                Some(name) => name.to_string(),
                None => {
                    return Ok(ValidationOutcome::skipped(
                        config_db,
                        format!(
                            "no live database known for group '{}'",
                            params.database_group
                        ),
                    ));
                }
            },
        };

        let view = params.entry_page_view.trim();
        if view.is_empty()
            || PLACEHOLDER_VIEWS
                .iter()
                .any(|p| view.eq_ignore_ascii_case(p))
        {
            return Ok(ValidationOutcome::skipped(
                config_db,
                "entry page view is undefined".to_string(),
            ));
        }

        let schema_map = self.cache.get_or_fetch(self.source, &database)?;
        let mut issues = Vec::new();
        let mut errors = 0;

        let Some((table_name, live_columns)) =
            resolve_table(schema_map, view, &mut issues)
        else {
            let issue = format!("view '{}' not found in any schema of '{}'", view, database);
            warn!("'{}': {}", config_db, issue);
            issues.push(issue);
            return Ok(ValidationOutcome {
                config_db: config_db.to_string(),
                stage,
                skipped: false,
                errors: 1,
                issues,
            });
        };
        stage = ValidationStage::SchemaResolved;
        debug!("'{}': stage {:?}", config_db, stage);

        for field in form_fields {
            check_field(
                config_db,
                &table_name,
                &field.name,
                &live_columns,
                &self.known_gaps,
                &mut issues,
                &mut errors,
            );
        }
        stage = ValidationStage::FieldsChecked;
        debug!("'{}': stage {:?}", config_db, stage);

        for issue in &issues {
            warn!("'{}': {}", config_db, issue);
        }
        stage = ValidationStage::Done;
        Ok(ValidationOutcome {
            config_db: config_db.to_string(),
            stage,
            skipped: false,
            errors,
            issues,
        })
    }
}

/// Find the view's column set: exact `(schema, name)` first, then a scan
/// of the remaining schemas in name order for the first name-only match
/// (disclosed as a warning). The sort keeps the fallback pick stable when
/// several schemas carry the same view name.
fn resolve_table(
    schema_map: &SchemaMap,
    view: &str,
    issues: &mut Vec<String>,
) -> Option<(String, Vec<String>)> {
    let stripped = strip_quotes(view);
    let (schema, bare) = split_schema(&stripped);
    let bare = strip_quotes(&bare);

    if let Some(columns) = schema_map.get(&schema).and_then(|t| t.get(&bare)) {
        return Some((bare, columns.clone()));
    }
    let mut other_schemas: Vec<&String> = schema_map.keys().collect();
    other_schemas.sort();
    for other_schema in other_schemas {
        if let Some(columns) = schema_map.get(other_schema).and_then(|t| t.get(&bare)) {
            issues.push(format!(
                "view '{}' found in schema '{}' rather than '{}'",
                bare, other_schema, schema
            ));
            return Some((bare, columns.clone()));
        }
    }
    None
}

fn check_field(
    config_db: &str,
    table: &str,
    field_name: &str,
    live_columns: &[String],
    known_gaps: &KnownGaps,
    issues: &mut Vec<String>,
    errors: &mut usize,
) {
    if live_columns.iter().any(|c| c == field_name) {
        return;
    }
    if let Some(close_case) = live_columns
        .iter()
        .find(|c| c.eq_ignore_ascii_case(field_name))
    {
        issues.push(format!(
            "field '{}' matches column '{}' only case-insensitively",
            field_name, close_case
        ));
        *errors += 1;
        return;
    }
    if known_gaps.is_allowed(config_db, table, field_name) {
        return;
    }

    let (distance, suggestions) = closest_matches(field_name, live_columns);
    if suggestions.is_empty() {
        issues.push(format!("field '{}' has no matching column", field_name));
    } else {
        issues.push(format!(
            "field '{}' has no matching column; closest: {} (distance {})",
            field_name,
            suggestions.join(", "),
            distance
        ));
    }
    *errors += 1;
}

/// Closest live columns by Damerau-Levenshtein distance, including ties.
fn closest_matches(target: &str, candidates: &[String]) -> (usize, Vec<String>) {
    let mut best = usize::MAX;
    let mut matches = Vec::new();
    for candidate in candidates {
        let distance = strsim::damerau_levenshtein(target, candidate);
        if distance < best {
            best = distance;
            matches.clear();
            matches.push(candidate.clone());
        } else if distance == best {
            matches.push(candidate.clone());
        }
    }
    (best, matches)
}

#[cfg(test)]
mod tests {
    use super::source::{SchemaColumn, SchemaSource, SchemaSourceError};
    use super::*;

    struct FakeSource {
        rows: Vec<(String, String, String, String)>,
    }

    impl SchemaSource for FakeSource {
        fn columns_for_database(
            &self,
            database: &str,
        ) -> Result<Vec<SchemaColumn>, SchemaSourceError> {
            let columns: Vec<SchemaColumn> = self
                .rows
                .iter()
                .filter(|(db, _, _, _)| db == database)
                .map(|(_, schema, table, column)| SchemaColumn {
                    schema: schema.clone(),
                    table: table.clone(),
                    column: column.clone(),
                })
                .collect();
            if columns.is_empty() {
                return Err(SchemaSourceError::UnknownDatabase(database.to_string()));
            }
            Ok(columns)
        }
    }

    fn fake_source() -> FakeSource {
        let rows = [
            ("package_db", "public", "v_jobs", "job"),
            ("package_db", "public", "v_jobs", "priority"),
            ("package_db", "public", "v_jobs", "aj_tool_name"),
        ];
        FakeSource {
            rows: rows
                .iter()
                .map(|(a, b, c, d)| {
                    (a.to_string(), b.to_string(), c.to_string(), d.to_string())
                })
                .collect(),
        }
    }

    fn field(name: &str) -> FormField {
        FormField {
            id: 1,
            name: name.to_string(),
            label: String::new(),
            field_type: String::new(),
            new_name: name.to_string(),
        }
    }

    fn params(view: &str) -> GeneralParams {
        let mut params = GeneralParams::default();
        params.entry_page_view = view.to_string();
        params.database_group = "package".to_string();
        params
    }

    #[test]
    fn test_exact_match_passes() {
        let source = fake_source();
        let mut validator = Validator::new(&source, None, KnownGaps::default());
        let outcome = validator
            .validate_config_db("jobs.db", &params("public.v_jobs"), &[field("job")])
            .unwrap();
        assert_eq!(outcome.errors, 0);
        assert_eq!(outcome.stage, ValidationStage::Done);
        assert!(!outcome.skipped);
    }

    #[test]
    fn test_case_mismatch_counts_error() {
        let source = fake_source();
        let mut validator = Validator::new(&source, None, KnownGaps::default());
        let outcome = validator
            .validate_config_db("jobs.db", &params("public.v_jobs"), &[field("Job")])
            .unwrap();
        assert_eq!(outcome.errors, 1);
        assert!(outcome.issues[0].contains("case-insensitively"));
    }

    #[test]
    fn test_typo_gets_fuzzy_suggestion() {
        let source = fake_source();
        let mut validator = Validator::new(&source, None, KnownGaps::default());
        let outcome = validator
            .validate_config_db("jobs.db", &params("public.v_jobs"), &[field("Jbo")])
            .unwrap();
        assert_eq!(outcome.errors, 1);
        assert!(outcome.issues[0].contains("job"), "{:?}", outcome.issues);
    }

    #[test]
    fn test_schema_fallback_warns_but_resolves() {
        let source = fake_source();
        let mut validator = Validator::new(&source, None, KnownGaps::default());
        let outcome = validator
            .validate_config_db("jobs.db", &params("other_schema.v_jobs"), &[field("job")])
            .unwrap();
        assert_eq!(outcome.errors, 0);
        assert!(outcome.issues[0].contains("rather than"));
    }

    #[test]
    fn test_schema_fallback_is_stable_across_duplicate_schemas() {
        let rows = [
            ("package_db", "zeta", "v_jobs", "job"),
            ("package_db", "alpha", "v_jobs", "job"),
            ("package_db", "beta", "v_jobs", "job"),
        ];
        let source = FakeSource {
            rows: rows
                .iter()
                .map(|(a, b, c, d)| {
                    (a.to_string(), b.to_string(), c.to_string(), d.to_string())
                })
                .collect(),
        };
        for _ in 0..4 {
            let mut validator = Validator::new(&source, None, KnownGaps::default());
            let outcome = validator
                .validate_config_db("jobs.db", &params("public.v_jobs"), &[field("job")])
                .unwrap();
            assert_eq!(outcome.errors, 0);
            assert!(
                outcome.issues[0].contains("schema 'alpha'"),
                "{:?}",
                outcome.issues
            );
        }
    }

    #[test]
    fn test_undefined_view_is_skipped() {
        let source = fake_source();
        let mut validator = Validator::new(&source, None, KnownGaps::default());
        for view in ["", "(none)"] {
            let outcome = validator
                .validate_config_db("jobs.db", &params(view), &[field("job")])
                .unwrap();
            assert!(outcome.skipped);
            assert_eq!(outcome.errors, 0);
        }
    }

    #[test]
    fn test_unknown_group_is_skipped() {
        let source = fake_source();
        let mut validator = Validator::new(&source, None, KnownGaps::default());
        let mut p = params("public.v_jobs");
        p.database_group = "mystery".to_string();
        let outcome = validator
            .validate_config_db("jobs.db", &p, &[field("job")])
            .unwrap();
        assert!(outcome.skipped);
    }

    #[test]
    fn test_fixed_database_overrides_group() {
        let source = fake_source();
        let mut validator = Validator::new(
            &source,
            Some("package_db".to_string()),
            KnownGaps::default(),
        );
        let mut p = params("public.v_jobs");
        p.database_group = "mystery".to_string();
        let outcome = validator
            .validate_config_db("jobs.db", &p, &[field("job")])
            .unwrap();
        assert_eq!(outcome.errors, 0);
    }

    #[test]
    fn test_known_gap_suppresses_error() {
        let source = fake_source();
        let gaps: KnownGaps = serde_json::from_str(
            r#"{"jobs.db": {"v_jobs": ["legacy_only_field"]}}"#,
        )
        .unwrap();
        let mut validator = Validator::new(&source, None, gaps);
        let outcome = validator
            .validate_config_db(
                "jobs.db",
                &params("public.v_jobs"),
                &[field("legacy_only_field")],
            )
            .unwrap();
        assert_eq!(outcome.errors, 0);
    }

    #[test]
    fn test_schema_cache_fetches_once() {
        let source = fake_source();
        let mut cache = LiveSchemaCache::default();
        let first = cache.get_or_fetch(&source, "package_db").unwrap().len();
        let second = cache.get_or_fetch(&source, "package_db").unwrap().len();
        assert_eq!(first, second);
    }
}
