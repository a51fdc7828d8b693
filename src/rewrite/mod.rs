// src/rewrite/mod.rs
// Per-configuration-database rename pass: resolves every dependent record
// collection and writes the changes back in one transaction.

pub mod datacols;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::{debug, info};

use crate::configdb::records::{GeneralParams, HotLink};
use crate::configdb::reader::{TABLE_DETAIL_REPORT_HOTLINKS, TABLE_LIST_REPORT_HOTLINKS};
use crate::configdb::{DbConnection, DbError, DbReader, DbResult, DbWriter};
use crate::ident::extract_plus_prefix;
use crate::options::RunOptions;
use crate::resolve::{ParameterRole, ResolutionEngine};

use datacols::{rewrite_data_column_list, rewrite_sort_column_list};

/// Changed-record tallies for one configuration database.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeCounts {
    pub form_fields: usize,
    pub choosers: usize,
    pub options: usize,
    pub external_sources: usize,
    pub sproc_args: usize,
    pub hotlinks: usize,
    pub primary_filters: usize,
    pub general_params: usize,
}

impl ChangeCounts {
    pub fn total(&self) -> usize {
        self.form_fields
            + self.choosers
            + self.options
            + self.external_sources
            + self.sproc_args
            + self.hotlinks
            + self.primary_filters
            + self.general_params
    }

    pub fn summary(&self, config_db: &str, preview: bool) -> String {
        let verb = if preview { "would change" } else { "changed" };
        if self.total() == 0 {
            return format!("'{}': no records {}", config_db, verb);
        }
        let mut parts = Vec::new();
        for (count, label) in [
            (self.form_fields, "form fields"),
            (self.choosers, "choosers"),
            (self.options, "field options"),
            (self.external_sources, "external sources"),
            (self.sproc_args, "sproc args"),
            (self.hotlinks, "hotlinks"),
            (self.primary_filters, "primary filters"),
            (self.general_params, "general params"),
        ] {
            if count > 0 {
                parts.push(format!("{} {}", count, label));
            }
        }
        format!(
            "'{}': {} records {} ({})",
            config_db,
            self.total(),
            verb,
            parts.join(", ")
        )
    }
}

/// Rewrite one configuration database.
///
/// With an output directory the source file is copied there first and the
/// copy is rewritten; otherwise the rewrite happens in place. Preview mode
/// opens the source read-only, copies nothing, and only counts.
pub fn rewrite_config_db(
    path: &Path,
    output_dir: Option<&Path>,
    engine: &mut ResolutionEngine,
    options: &RunOptions,
) -> DbResult<ChangeCounts> {
    let config_db = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    info!("Processing configuration database '{}'", config_db);

    let target_path = if options.preview {
        path.to_path_buf()
    } else {
        stage_target(path, output_dir)?
    };
    let conn = if options.preview {
        DbConnection::open_read(&target_path)?
    } else {
        DbConnection::open_write(&target_path)?
    };

    let params = DbReader::read_general_params(&conn)?;
    let mut form_fields = DbReader::read_form_fields(&conn)?;
    let mut choosers = DbReader::read_form_field_choosers(&conn)?;
    let mut field_options = DbReader::read_form_field_options(&conn)?;
    let mut sproc_args = DbReader::read_sproc_args(&conn)?;
    let mut external_sources = DbReader::read_external_sources(&conn)?;
    let mut list_hotlinks = DbReader::read_hotlinks(&conn, TABLE_LIST_REPORT_HOTLINKS, "id")?;
    let mut detail_hotlinks = DbReader::read_hotlinks(&conn, TABLE_DETAIL_REPORT_HOTLINKS, "idx")?;
    let mut primary_filters = DbReader::read_primary_filters(&conn)?;

    let mut counts = ChangeCounts::default();
    let mut param_updates: Vec<(&'static str, String)> = Vec::new();
    let group = params.database_group.clone();

    // Entry page: form fields drive a rename map that propagates into the
    // dependent record collections.
    if options.rename_entry_page && !params.entry_page_view.trim().is_empty() {
        let view_resolution = engine.rename_view_or_procedure(
            ParameterRole::EntryPage,
            &params.entry_page_view,
            &group,
        );
        let entry_view = view_resolution.name.clone();
        if view_resolution.changed {
            param_updates.push((GeneralParams::KEY_ENTRY_PAGE_VIEW, entry_view.clone()));
        }

        let mut rename_map: HashMap<String, String> = HashMap::new();
        for field in &mut form_fields {
            let resolution =
                engine.resolve(ParameterRole::EntryPage, &entry_view, &field.name, true);
            if resolution.changed {
                field.new_name = resolution.name.clone();
                rename_map.insert(field.name.clone(), resolution.name);
                counts.form_fields += 1;
            }
        }
        debug!(
            "'{}': {} of {} form fields renamed",
            config_db,
            rename_map.len(),
            form_fields.len()
        );

        for arg in &mut sproc_args {
            if let Some(new_name) = rename_map.get(&arg.field) {
                arg.new_field = new_name.clone();
                arg.updated = true;
                counts.sproc_args += 1;
            }
        }
        for chooser in &mut choosers {
            if let Some(new_name) = rename_map.get(&chooser.field) {
                chooser.new_field = new_name.clone();
                chooser.updated = true;
            }
            if let Some(new_name) = rename_map.get(&chooser.cross_reference) {
                chooser.new_cross_reference = new_name.clone();
                chooser.updated = true;
            }
            if chooser.updated {
                counts.choosers += 1;
            }
        }
        for option in &mut field_options {
            if let Some(new_name) = rename_map.get(&option.field) {
                option.new_field = new_name.clone();
                option.updated = true;
                counts.options += 1;
            }
        }
        for source in &mut external_sources {
            if let Some(new_name) = rename_map.get(&source.field) {
                source.new_field = new_name.clone();
                source.updated = true;
                counts.external_sources += 1;
            }
        }

        let id_resolution = engine.resolve(
            ParameterRole::EntryPage,
            &entry_view,
            &params.entry_page_id_col,
            true,
        );
        if id_resolution.changed {
            param_updates.push((GeneralParams::KEY_ENTRY_PAGE_ID_COL, id_resolution.name));
        }
        let data_cols = rewrite_data_column_list(
            engine,
            ParameterRole::EntryPage,
            &entry_view,
            &params.entry_page_data_cols,
            true,
        );
        if data_cols.changed {
            param_updates.push((GeneralParams::KEY_ENTRY_PAGE_DATA_COLS, data_cols.name));
        }
    }

    if options.rename_stored_procedures {
        for (key, current) in [
            (GeneralParams::KEY_ENTRY_SPROC, &params.entry_sproc),
            (GeneralParams::KEY_OPERATIONS_SPROC, &params.operations_sproc),
        ] {
            let resolution =
                engine.rename_view_or_procedure(ParameterRole::StoredProcedure, current, &group);
            if resolution.changed {
                param_updates.push((key, resolution.name));
            }
        }
    }

    if options.rename_list_report && !params.list_report_view.trim().is_empty() {
        let view_resolution = engine.rename_view_or_procedure(
            ParameterRole::ListReport,
            &params.list_report_view,
            &group,
        );
        let list_view = view_resolution.name.clone();
        if view_resolution.changed {
            param_updates.push((GeneralParams::KEY_LIST_REPORT_VIEW, list_view.clone()));
        }

        for link in &mut list_hotlinks {
            if rewrite_hotlink(engine, ParameterRole::ListReport, &list_view, link, true) {
                counts.hotlinks += 1;
            }
        }
        for filter in &mut primary_filters {
            let resolution =
                engine.resolve(ParameterRole::ListReport, &list_view, &filter.field_name, true);
            if resolution.changed {
                filter.new_field_name = resolution.name;
                filter.updated = true;
                counts.primary_filters += 1;
            }
        }

        let id_resolution = engine.resolve(
            ParameterRole::ListReport,
            &list_view,
            &params.list_report_id_col,
            true,
        );
        if id_resolution.changed {
            param_updates.push((GeneralParams::KEY_LIST_REPORT_ID_COL, id_resolution.name));
        }
        let sort_cols = rewrite_sort_column_list(
            engine,
            ParameterRole::ListReport,
            &list_view,
            &params.list_report_sort_cols,
        );
        if sort_cols.changed {
            param_updates.push((GeneralParams::KEY_LIST_REPORT_SORT_COLS, sort_cols.name));
        }
        let data_cols = rewrite_data_column_list(
            engine,
            ParameterRole::ListReport,
            &list_view,
            &params.list_report_data_cols,
            false,
        );
        if data_cols.changed {
            param_updates.push((GeneralParams::KEY_LIST_REPORT_DATA_COLS, data_cols.name));
        }
    }

    if options.rename_detail_report && !params.detail_report_view.trim().is_empty() {
        let view_resolution = engine.rename_view_or_procedure(
            ParameterRole::DetailReport,
            &params.detail_report_view,
            &group,
        );
        let detail_view = view_resolution.name.clone();
        if view_resolution.changed {
            param_updates.push((GeneralParams::KEY_DETAIL_REPORT_VIEW, detail_view.clone()));
        }

        for link in &mut detail_hotlinks {
            if rewrite_hotlink(engine, ParameterRole::DetailReport, &detail_view, link, false) {
                counts.hotlinks += 1;
            }
        }

        let id_resolution = engine.resolve(
            ParameterRole::DetailReport,
            &detail_view,
            &params.detail_report_id_col,
            true,
        );
        if id_resolution.changed {
            param_updates.push((GeneralParams::KEY_DETAIL_REPORT_ID_COL, id_resolution.name));
        }
        let sort_cols = rewrite_sort_column_list(
            engine,
            ParameterRole::DetailReport,
            &detail_view,
            &params.detail_report_sort_cols,
        );
        if sort_cols.changed {
            param_updates.push((GeneralParams::KEY_DETAIL_REPORT_SORT_COLS, sort_cols.name));
        }
        let data_cols = rewrite_data_column_list(
            engine,
            ParameterRole::DetailReport,
            &detail_view,
            &params.detail_report_data_cols,
            false,
        );
        if data_cols.changed {
            param_updates.push((GeneralParams::KEY_DETAIL_REPORT_DATA_COLS, data_cols.name));
        }
    }

    counts.general_params = param_updates.len();

    if options.preview {
        info!("{}", counts.summary(&config_db, true));
        return Ok(counts);
    }

    write_back(
        &conn,
        &config_db,
        &form_fields,
        &choosers,
        &field_options,
        &sproc_args,
        &external_sources,
        &list_hotlinks,
        &detail_hotlinks,
        &primary_filters,
        &param_updates,
    )?;
    info!("{}", counts.summary(&config_db, false));
    Ok(counts)
}

fn stage_target(path: &Path, output_dir: Option<&Path>) -> DbResult<PathBuf> {
    let Some(dir) = output_dir else {
        return Ok(path.to_path_buf());
    };
    fs::create_dir_all(dir)?;
    let file_name = path
        .file_name()
        .ok_or_else(|| DbError::Other(format!("Not a file: {}", path.display())))?;
    let dest = dir.join(file_name);
    fs::copy(path, &dest)?;
    debug!("Copied {:?} -> {:?}", path, dest);
    Ok(dest)
}

/// Resolve a hotlink's field name (preserving any `+` computed-column
/// prefix) and its argument column. The `value` sentinel on list-report
/// hotlinks means "this same column" and is left alone.
fn rewrite_hotlink(
    engine: &mut ResolutionEngine,
    role: ParameterRole,
    view: &str,
    link: &mut HotLink,
    value_sentinel: bool,
) -> bool {
    let (prefix, base) = extract_plus_prefix(&link.field_name);
    let resolution = engine.resolve(role, view, &base, true);
    if resolution.changed {
        link.new_field_name = format!("{}{}", prefix, resolution.name);
        link.updated = true;
    }

    let skip_arg = link.which_arg.trim().is_empty()
        || (value_sentinel && link.which_arg.eq_ignore_ascii_case("value"));
    if !skip_arg {
        let arg_resolution = engine.resolve(role, view, &link.which_arg, true);
        if arg_resolution.changed {
            link.new_which_arg = arg_resolution.name;
            link.updated = true;
        }
    }
    link.updated
}

#[allow(clippy::too_many_arguments)]
fn write_back(
    conn: &Connection,
    config_db: &str,
    form_fields: &[crate::configdb::records::FormField],
    choosers: &[crate::configdb::records::FormFieldChooser],
    field_options: &[crate::configdb::records::FormFieldOption],
    sproc_args: &[crate::configdb::records::StoredProcArgument],
    external_sources: &[crate::configdb::records::ExternalSource],
    list_hotlinks: &[HotLink],
    detail_hotlinks: &[HotLink],
    primary_filters: &[crate::configdb::records::PrimaryFilter],
    param_updates: &[(&'static str, String)],
) -> DbResult<()> {
    let apply = || -> DbResult<()> {
        let tx = conn.unchecked_transaction()?;
        for field in form_fields.iter().filter(|f| f.new_name != f.name) {
            DbWriter::update_form_field_name(&tx, field.id, &field.new_name)?;
        }
        for chooser in choosers.iter().filter(|c| c.updated) {
            DbWriter::update_chooser(
                &tx,
                chooser.id,
                &chooser.new_field,
                &chooser.new_cross_reference,
            )?;
        }
        for option in field_options.iter().filter(|o| o.updated) {
            DbWriter::update_form_field_option(&tx, option.id, &option.new_field)?;
        }
        for arg in sproc_args.iter().filter(|a| a.updated) {
            DbWriter::update_sproc_arg(&tx, arg.id, &arg.new_field)?;
        }
        for source in external_sources.iter().filter(|s| s.updated) {
            DbWriter::update_external_source(&tx, source.id, &source.new_field)?;
        }
        for link in list_hotlinks.iter().filter(|l| l.updated) {
            DbWriter::update_hotlink(
                &tx,
                TABLE_LIST_REPORT_HOTLINKS,
                "id",
                link.id,
                &link.new_field_name,
                &link.new_which_arg,
            )?;
        }
        for link in detail_hotlinks.iter().filter(|l| l.updated) {
            DbWriter::update_hotlink(
                &tx,
                TABLE_DETAIL_REPORT_HOTLINKS,
                "idx",
                link.id,
                &link.new_field_name,
                &link.new_which_arg,
            )?;
        }
        for filter in primary_filters.iter().filter(|f| f.updated) {
            DbWriter::update_primary_filter(&tx, filter.id, &filter.new_field_name)?;
        }
        for (key, value) in param_updates {
            DbWriter::update_general_param(&tx, key, value)?;
        }
        tx.commit()?;
        Ok(())
    };
    apply().map_err(|e| DbError::WriteFailed(format!("'{}': {}", config_db, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namemap::{NameMapEntry, NameMapIndex};
    use rusqlite::Connection;

    fn corpus() -> NameMapIndex {
        let mut index = NameMapIndex::default();
        for view in ["public.v_analysis_job_entry", "public.v_analysis_job_list_report"] {
            index.register_view(view).insert_first_wins(NameMapEntry {
                source: "AJ_jobID".to_string(),
                target: "job".to_string(),
                is_alias: false,
            });
        }
        index
    }

    fn fixture_db(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("remapdb_rewrite_{}.db", name));
        let _ = fs::remove_file(&path);
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE general_params (name TEXT, value TEXT);
             CREATE TABLE form_fields (id INTEGER, name TEXT, label TEXT, type TEXT);
             CREATE TABLE form_field_choosers (id INTEGER, field TEXT, cross_reference TEXT,
                 type TEXT, pick_list_name TEXT, helper_name TEXT);
             CREATE TABLE form_field_options (id INTEGER, field TEXT);
             CREATE TABLE external_sources (id INTEGER, field TEXT, source_page TEXT,
                 source_column TEXT, source_type TEXT);
             CREATE TABLE sproc_args (id INTEGER, field TEXT, argument_name TEXT,
                 procedure_name TEXT);
             CREATE TABLE list_report_hotlinks (id INTEGER, field_name TEXT, link_type TEXT,
                 which_arg TEXT);
             CREATE TABLE detail_report_hotlinks (idx INTEGER, field_name TEXT, link_type TEXT,
                 which_arg TEXT);
             CREATE TABLE list_report_primary_filter (id INTEGER, label TEXT, field_name TEXT);
             INSERT INTO general_params VALUES
                 ('EntryPageView', 'v_analysis_job_entry'),
                 ('EntryPageIDCol', 'AJ_jobID'),
                 ('ListReportView', 'v_analysis_job_list_report'),
                 ('ListReportIDCol', 'AJ_jobID'),
                 ('DetailReportView', 'v_analysis_job_list_report'),
                 ('DatabaseGroup', 'package');
             INSERT INTO form_fields VALUES
                 (1, 'AJ_jobID', 'Job', 'text'),
                 (2, 'AJ_ToolName', 'Tool', 'text');
             INSERT INTO form_field_choosers VALUES
                 (1, 'AJ_ToolName', 'AJ_jobID', 'list', 'tools', '');
             INSERT INTO sproc_args VALUES (1, 'AJ_jobID', '@job', 'add_update_job');
             INSERT INTO list_report_hotlinks VALUES
                 (1, '+AJ_ToolName', 'detail_report', 'value'),
                 (2, 'AJ_jobID', 'detail_report', 'AJ_Priority');
             INSERT INTO detail_report_hotlinks VALUES
                 (1, '+AJ_ToolName', 'url', 'Value'),
                 (2, 'AJ_jobID', 'url', '');
             INSERT INTO list_report_primary_filter VALUES (1, 'Job', 'AJ_jobID');",
        )
        .unwrap();
        path
    }

    fn query_one(conn: &Connection, sql: &str) -> String {
        conn.query_row(sql, [], |row| row.get(0)).unwrap()
    }

    #[test]
    fn test_full_rename_pass() {
        let path = fixture_db("full");
        let index = corpus();
        let options = RunOptions::default();
        let mut engine = ResolutionEngine::new(&index, &options);

        let counts = rewrite_config_db(&path, None, &mut engine, &options).unwrap();
        assert!(counts.total() > 0);

        let conn = Connection::open(&path).unwrap();
        // mapped column wins over heuristic conversion
        assert_eq!(
            query_one(&conn, "SELECT name FROM form_fields WHERE id = 1"),
            "job"
        );
        // unmapped column falls back to snake_case with prefix stripping
        assert_eq!(
            query_one(&conn, "SELECT name FROM form_fields WHERE id = 2"),
            "tool_name"
        );
        // rename map propagates into dependents
        assert_eq!(
            query_one(&conn, "SELECT field FROM sproc_args WHERE id = 1"),
            "job"
        );
        assert_eq!(
            query_one(&conn, "SELECT field FROM form_field_choosers WHERE id = 1"),
            "tool_name"
        );
        assert_eq!(
            query_one(
                &conn,
                "SELECT cross_reference FROM form_field_choosers WHERE id = 1"
            ),
            "job"
        );
        // hotlink keeps its computed-column prefix; 'value' sentinel is untouched
        assert_eq!(
            query_one(
                &conn,
                "SELECT field_name FROM list_report_hotlinks WHERE id = 1"
            ),
            "+tool_name"
        );
        assert_eq!(
            query_one(
                &conn,
                "SELECT which_arg FROM list_report_hotlinks WHERE id = 1"
            ),
            "value"
        );
        assert_eq!(
            query_one(
                &conn,
                "SELECT which_arg FROM list_report_hotlinks WHERE id = 2"
            ),
            "priority"
        );
        assert_eq!(
            query_one(
                &conn,
                "SELECT field_name FROM list_report_primary_filter WHERE id = 1"
            ),
            "job"
        );
        // governing views were normalized to their qualified mapped names
        assert_eq!(
            query_one(
                &conn,
                "SELECT value FROM general_params WHERE name = 'EntryPageView'"
            ),
            "public.v_analysis_job_entry"
        );
        assert_eq!(
            query_one(
                &conn,
                "SELECT value FROM general_params WHERE name = 'EntryPageIDCol'"
            ),
            "job"
        );
    }

    #[test]
    fn test_detail_hotlinks_keyed_by_idx_resolve_value_args() {
        let path = fixture_db("detail");
        let index = corpus();
        let options = RunOptions::default();
        let mut engine = ResolutionEngine::new(&index, &options);

        rewrite_config_db(&path, None, &mut engine, &options).unwrap();

        let conn = Connection::open(&path).unwrap();
        assert_eq!(
            query_one(
                &conn,
                "SELECT field_name FROM detail_report_hotlinks WHERE idx = 1"
            ),
            "+tool_name"
        );
        // 'value' is only a sentinel on list reports; detail-report
        // arguments get resolved like any other column
        assert_eq!(
            query_one(
                &conn,
                "SELECT which_arg FROM detail_report_hotlinks WHERE idx = 1"
            ),
            "value"
        );
        assert_eq!(
            query_one(
                &conn,
                "SELECT field_name FROM detail_report_hotlinks WHERE idx = 2"
            ),
            "job"
        );
        // blank arguments stay blank
        assert_eq!(
            query_one(
                &conn,
                "SELECT which_arg FROM detail_report_hotlinks WHERE idx = 2"
            ),
            ""
        );
    }

    #[test]
    fn test_second_run_is_idempotent() {
        let path = fixture_db("idempotent");
        let index = corpus();
        let options = RunOptions::default();

        let mut engine = ResolutionEngine::new(&index, &options);
        rewrite_config_db(&path, None, &mut engine, &options).unwrap();

        let mut engine = ResolutionEngine::new(&index, &options);
        let counts = rewrite_config_db(&path, None, &mut engine, &options).unwrap();
        assert_eq!(counts.total(), 0, "second run changed records: {:?}", counts);
    }

    #[test]
    fn test_failed_update_rolls_back_whole_database() {
        let path = fixture_db("rollback");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(
                "CREATE TRIGGER sproc_args_locked BEFORE UPDATE ON sproc_args
                 BEGIN SELECT RAISE(ABORT, 'sproc_args is locked'); END;",
            )
            .unwrap();
        }
        let index = corpus();
        let options = RunOptions::default();
        let mut engine = ResolutionEngine::new(&index, &options);

        let result = rewrite_config_db(&path, None, &mut engine, &options);
        assert!(matches!(result, Err(DbError::WriteFailed(_))));

        // form fields were updated before the failing statement in the
        // same transaction, so the rollback must undo them too
        let conn = Connection::open(&path).unwrap();
        assert_eq!(
            query_one(&conn, "SELECT name FROM form_fields WHERE id = 1"),
            "AJ_jobID"
        );
        assert_eq!(
            query_one(&conn, "SELECT name FROM form_fields WHERE id = 2"),
            "AJ_ToolName"
        );
        assert_eq!(
            query_one(
                &conn,
                "SELECT value FROM general_params WHERE name = 'EntryPageView'"
            ),
            "v_analysis_job_entry"
        );
    }

    #[test]
    fn test_preview_writes_nothing() {
        let path = fixture_db("preview");
        let index = corpus();
        let mut options = RunOptions::default();
        options.preview = true;
        let mut engine = ResolutionEngine::new(&index, &options);

        let counts = rewrite_config_db(&path, None, &mut engine, &options).unwrap();
        assert!(counts.total() > 0);

        let conn = Connection::open(&path).unwrap();
        assert_eq!(
            query_one(&conn, "SELECT name FROM form_fields WHERE id = 1"),
            "AJ_jobID"
        );
    }

    #[test]
    fn test_output_dir_leaves_source_untouched() {
        let path = fixture_db("outdir");
        let out_dir = std::env::temp_dir().join("remapdb_rewrite_outdir");
        let _ = fs::remove_dir_all(&out_dir);
        let index = corpus();
        let options = RunOptions::default();
        let mut engine = ResolutionEngine::new(&index, &options);

        rewrite_config_db(&path, Some(&out_dir), &mut engine, &options).unwrap();

        let source = Connection::open(&path).unwrap();
        assert_eq!(
            query_one(&source, "SELECT name FROM form_fields WHERE id = 1"),
            "AJ_jobID"
        );
        let copy = Connection::open(out_dir.join(path.file_name().unwrap())).unwrap();
        assert_eq!(
            query_one(&copy, "SELECT name FROM form_fields WHERE id = 1"),
            "job"
        );
    }

    #[test]
    fn test_missing_tables_mean_nothing_to_do() {
        let path = std::env::temp_dir().join("remapdb_rewrite_empty.db");
        let _ = fs::remove_file(&path);
        Connection::open(&path).unwrap();
        let index = corpus();
        let options = RunOptions::default();
        let mut engine = ResolutionEngine::new(&index, &options);

        let counts = rewrite_config_db(&path, None, &mut engine, &options).unwrap();
        assert_eq!(counts.total(), 0);
    }
}
