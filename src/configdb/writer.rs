// src/configdb/writer.rs
// Write-back of renamed records. All updates for one configuration
// database run inside a single transaction; a failed statement rolls the
// whole database back.

use rusqlite::{params, Transaction};

use super::error::DbResult;
use super::reader::{
    TABLE_EXTERNAL_SOURCES, TABLE_FORM_FIELDS, TABLE_FORM_FIELD_CHOOSERS,
    TABLE_FORM_FIELD_OPTIONS, TABLE_GENERAL_PARAMS, TABLE_LIST_REPORT_PRIMARY_FILTER,
    TABLE_SPROC_ARGS,
};

pub struct DbWriter;

impl DbWriter {
    pub fn update_form_field_name(tx: &Transaction, id: i64, new_name: &str) -> DbResult<()> {
        tx.execute(
            &format!("UPDATE {} SET name = ? WHERE id = ?", TABLE_FORM_FIELDS),
            params![new_name, id],
        )?;
        Ok(())
    }

    pub fn update_chooser(
        tx: &Transaction,
        id: i64,
        new_field: &str,
        new_cross_reference: &str,
    ) -> DbResult<()> {
        tx.execute(
            &format!(
                "UPDATE {} SET field = ?, cross_reference = ? WHERE id = ?",
                TABLE_FORM_FIELD_CHOOSERS
            ),
            params![new_field, new_cross_reference, id],
        )?;
        Ok(())
    }

    pub fn update_form_field_option(tx: &Transaction, id: i64, new_field: &str) -> DbResult<()> {
        tx.execute(
            &format!("UPDATE {} SET field = ? WHERE id = ?", TABLE_FORM_FIELD_OPTIONS),
            params![new_field, id],
        )?;
        Ok(())
    }

    pub fn update_sproc_arg(tx: &Transaction, id: i64, new_field: &str) -> DbResult<()> {
        tx.execute(
            &format!("UPDATE {} SET field = ? WHERE id = ?", TABLE_SPROC_ARGS),
            params![new_field, id],
        )?;
        Ok(())
    }

    pub fn update_external_source(tx: &Transaction, id: i64, new_field: &str) -> DbResult<()> {
        tx.execute(
            &format!("UPDATE {} SET field = ? WHERE id = ?", TABLE_EXTERNAL_SOURCES),
            params![new_field, id],
        )?;
        Ok(())
    }

    pub fn update_hotlink(
        tx: &Transaction,
        table_name: &str,
        key_column: &str,
        id: i64,
        new_field_name: &str,
        new_which_arg: &str,
    ) -> DbResult<()> {
        tx.execute(
            &format!(
                "UPDATE {} SET field_name = ?, which_arg = ? WHERE {} = ?",
                table_name, key_column
            ),
            params![new_field_name, new_which_arg, id],
        )?;
        Ok(())
    }

    pub fn update_primary_filter(tx: &Transaction, id: i64, new_field_name: &str) -> DbResult<()> {
        tx.execute(
            &format!(
                "UPDATE {} SET field_name = ? WHERE id = ?",
                TABLE_LIST_REPORT_PRIMARY_FILTER
            ),
            params![new_field_name, id],
        )?;
        Ok(())
    }

    pub fn update_general_param(tx: &Transaction, key: &str, value: &str) -> DbResult<()> {
        tx.execute(
            &format!("UPDATE {} SET value = ? WHERE name = ?", TABLE_GENERAL_PARAMS),
            params![value, key],
        )?;
        Ok(())
    }
}
