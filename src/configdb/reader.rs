// src/configdb/reader.rs

use rusqlite::Connection;
use tracing::debug;

use super::error::DbResult;
use super::records::{
    ExternalSource, FormField, FormFieldChooser, FormFieldOption, GeneralParams, HotLink,
    PrimaryFilter, StoredProcArgument,
};

/// Table names expected in a configuration database. All are optional;
/// a missing table reads as an empty collection.
pub const TABLE_GENERAL_PARAMS: &str = "general_params";
pub const TABLE_FORM_FIELDS: &str = "form_fields";
pub const TABLE_FORM_FIELD_CHOOSERS: &str = "form_field_choosers";
pub const TABLE_FORM_FIELD_OPTIONS: &str = "form_field_options";
pub const TABLE_EXTERNAL_SOURCES: &str = "external_sources";
pub const TABLE_SPROC_ARGS: &str = "sproc_args";
pub const TABLE_LIST_REPORT_HOTLINKS: &str = "list_report_hotlinks";
pub const TABLE_DETAIL_REPORT_HOTLINKS: &str = "detail_report_hotlinks";
pub const TABLE_LIST_REPORT_PRIMARY_FILTER: &str = "list_report_primary_filter";

pub struct DbReader;

impl DbReader {
    /// Check if a table exists in the database
    pub fn table_exists(conn: &Connection, table_name: &str) -> DbResult<bool> {
        let exists: bool = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?",
            [table_name],
            |row| row.get::<_, i32>(0).map(|v| v > 0),
        )?;
        if !exists {
            debug!("Table '{}' not present; treating as empty", table_name);
        }
        Ok(exists)
    }

    /// Read general parameters from the name/value table.
    /// Unknown keys are ignored; known keys default to empty string.
    pub fn read_general_params(conn: &Connection) -> DbResult<GeneralParams> {
        let mut params = GeneralParams::default();
        if !Self::table_exists(conn, TABLE_GENERAL_PARAMS)? {
            return Ok(params);
        }
        let mut stmt = conn.prepare(&format!(
            "SELECT name, value FROM {}",
            TABLE_GENERAL_PARAMS
        ))?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
            let (name, value) = row?;
            params.set(name.trim(), &value);
        }
        Ok(params)
    }

    pub fn read_form_fields(conn: &Connection) -> DbResult<Vec<FormField>> {
        if !Self::table_exists(conn, TABLE_FORM_FIELDS)? {
            return Ok(Vec::new());
        }
        let mut stmt = conn.prepare(&format!(
            "SELECT id, name, label, type FROM {} ORDER BY id",
            TABLE_FORM_FIELDS
        ))?;
        let rows = stmt.query_map([], |row| {
            let name: String = row.get(1)?;
            Ok(FormField {
                id: row.get(0)?,
                new_name: name.clone(),
                name,
                label: row.get(2)?,
                field_type: row.get(3)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn read_form_field_choosers(conn: &Connection) -> DbResult<Vec<FormFieldChooser>> {
        if !Self::table_exists(conn, TABLE_FORM_FIELD_CHOOSERS)? {
            return Ok(Vec::new());
        }
        let mut stmt = conn.prepare(&format!(
            "SELECT id, field, cross_reference, type, pick_list_name, helper_name FROM {} ORDER BY id",
            TABLE_FORM_FIELD_CHOOSERS
        ))?;
        let rows = stmt.query_map([], |row| {
            let field: String = row.get(1)?;
            let cross_reference: String = row.get(2)?;
            Ok(FormFieldChooser {
                id: row.get(0)?,
                new_field: field.clone(),
                new_cross_reference: cross_reference.clone(),
                field,
                cross_reference,
                chooser_type: row.get(3)?,
                pick_list_name: row.get(4)?,
                helper_name: row.get(5)?,
                updated: false,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn read_form_field_options(conn: &Connection) -> DbResult<Vec<FormFieldOption>> {
        if !Self::table_exists(conn, TABLE_FORM_FIELD_OPTIONS)? {
            return Ok(Vec::new());
        }
        let mut stmt = conn.prepare(&format!(
            "SELECT id, field FROM {} ORDER BY id",
            TABLE_FORM_FIELD_OPTIONS
        ))?;
        let rows = stmt.query_map([], |row| {
            let field: String = row.get(1)?;
            Ok(FormFieldOption {
                id: row.get(0)?,
                new_field: field.clone(),
                field,
                updated: false,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn read_sproc_args(conn: &Connection) -> DbResult<Vec<StoredProcArgument>> {
        if !Self::table_exists(conn, TABLE_SPROC_ARGS)? {
            return Ok(Vec::new());
        }
        let mut stmt = conn.prepare(&format!(
            "SELECT id, field, argument_name, procedure_name FROM {} ORDER BY id",
            TABLE_SPROC_ARGS
        ))?;
        let rows = stmt.query_map([], |row| {
            let field: String = row.get(1)?;
            Ok(StoredProcArgument {
                id: row.get(0)?,
                new_field: field.clone(),
                field,
                argument_name: row.get(2)?,
                procedure_name: row.get(3)?,
                updated: false,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn read_external_sources(conn: &Connection) -> DbResult<Vec<ExternalSource>> {
        if !Self::table_exists(conn, TABLE_EXTERNAL_SOURCES)? {
            return Ok(Vec::new());
        }
        let mut stmt = conn.prepare(&format!(
            "SELECT id, field, source_page, source_column, source_type FROM {} ORDER BY id",
            TABLE_EXTERNAL_SOURCES
        ))?;
        let rows = stmt.query_map([], |row| {
            let field: String = row.get(1)?;
            Ok(ExternalSource {
                id: row.get(0)?,
                new_field: field.clone(),
                field,
                source_page: row.get(2)?,
                source_column: row.get(3)?,
                source_type: row.get(4)?,
                updated: false,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Read hotlinks. The detail-report table is keyed by `idx` rather
    /// than `id`; `key_column` covers both layouts.
    pub fn read_hotlinks(
        conn: &Connection,
        table_name: &str,
        key_column: &str,
    ) -> DbResult<Vec<HotLink>> {
        if !Self::table_exists(conn, table_name)? {
            return Ok(Vec::new());
        }
        let mut stmt = conn.prepare(&format!(
            "SELECT {key}, field_name, link_type, which_arg FROM {table} ORDER BY {key}",
            key = key_column,
            table = table_name
        ))?;
        let rows = stmt.query_map([], |row| {
            let field_name: String = row.get(1)?;
            let which_arg: String = row.get(3)?;
            Ok(HotLink {
                id: row.get(0)?,
                new_field_name: field_name.clone(),
                new_which_arg: which_arg.clone(),
                field_name,
                link_type: row.get(2)?,
                which_arg,
                updated: false,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn read_primary_filters(conn: &Connection) -> DbResult<Vec<PrimaryFilter>> {
        if !Self::table_exists(conn, TABLE_LIST_REPORT_PRIMARY_FILTER)? {
            return Ok(Vec::new());
        }
        let mut stmt = conn.prepare(&format!(
            "SELECT id, label, field_name FROM {} ORDER BY id",
            TABLE_LIST_REPORT_PRIMARY_FILTER
        ))?;
        let rows = stmt.query_map([], |row| {
            let field_name: String = row.get(2)?;
            Ok(PrimaryFilter {
                id: row.get(0)?,
                new_field_name: field_name.clone(),
                label: row.get(1)?,
                field_name,
                updated: false,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
