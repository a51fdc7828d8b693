// src/configdb/records.rs
// General parameters and the dependent record collections read from one
// configuration database.

/// Named parameter slots from the `general_params` table.
///
/// Each slot corresponds to exactly one storage key; unknown keys are
/// ignored on load and absent keys stay empty.
#[derive(Debug, Clone, Default)]
pub struct GeneralParams {
    pub detail_report_view: String,
    pub detail_report_id_col: String,
    pub detail_report_data_cols: String,
    pub detail_report_sort_cols: String,
    pub list_report_view: String,
    pub list_report_id_col: String,
    pub list_report_data_cols: String,
    pub list_report_sort_cols: String,
    pub entry_page_view: String,
    pub entry_page_id_col: String,
    pub entry_page_data_cols: String,
    pub entry_sproc: String,
    pub operations_sproc: String,
    pub database_group: String,
}

impl GeneralParams {
    pub const KEY_DETAIL_REPORT_VIEW: &'static str = "DetailReportView";
    pub const KEY_DETAIL_REPORT_ID_COL: &'static str = "DetailReportIDCol";
    pub const KEY_DETAIL_REPORT_DATA_COLS: &'static str = "DetailReportDataCols";
    pub const KEY_DETAIL_REPORT_SORT_COLS: &'static str = "DetailReportSortCols";
    pub const KEY_LIST_REPORT_VIEW: &'static str = "ListReportView";
    pub const KEY_LIST_REPORT_ID_COL: &'static str = "ListReportIDCol";
    pub const KEY_LIST_REPORT_DATA_COLS: &'static str = "ListReportDataCols";
    pub const KEY_LIST_REPORT_SORT_COLS: &'static str = "ListReportSortCols";
    pub const KEY_ENTRY_PAGE_VIEW: &'static str = "EntryPageView";
    pub const KEY_ENTRY_PAGE_ID_COL: &'static str = "EntryPageIDCol";
    pub const KEY_ENTRY_PAGE_DATA_COLS: &'static str = "EntryPageDataCols";
    pub const KEY_ENTRY_SPROC: &'static str = "EntrySproc";
    pub const KEY_OPERATIONS_SPROC: &'static str = "OperationsSproc";
    pub const KEY_DATABASE_GROUP: &'static str = "DatabaseGroup";

    /// Set the slot for a storage key. Returns false for unknown keys,
    /// which callers ignore.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        let slot = match key {
            Self::KEY_DETAIL_REPORT_VIEW => &mut self.detail_report_view,
            Self::KEY_DETAIL_REPORT_ID_COL => &mut self.detail_report_id_col,
            Self::KEY_DETAIL_REPORT_DATA_COLS => &mut self.detail_report_data_cols,
            Self::KEY_DETAIL_REPORT_SORT_COLS => &mut self.detail_report_sort_cols,
            Self::KEY_LIST_REPORT_VIEW => &mut self.list_report_view,
            Self::KEY_LIST_REPORT_ID_COL => &mut self.list_report_id_col,
            Self::KEY_LIST_REPORT_DATA_COLS => &mut self.list_report_data_cols,
            Self::KEY_LIST_REPORT_SORT_COLS => &mut self.list_report_sort_cols,
            Self::KEY_ENTRY_PAGE_VIEW => &mut self.entry_page_view,
            Self::KEY_ENTRY_PAGE_ID_COL => &mut self.entry_page_id_col,
            Self::KEY_ENTRY_PAGE_DATA_COLS => &mut self.entry_page_data_cols,
            Self::KEY_ENTRY_SPROC => &mut self.entry_sproc,
            Self::KEY_OPERATIONS_SPROC => &mut self.operations_sproc,
            Self::KEY_DATABASE_GROUP => &mut self.database_group,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }
}

/// A configured hyperlink on a list or detail report.
#[derive(Debug, Clone)]
pub struct HotLink {
    pub id: i64,
    pub field_name: String,
    pub link_type: String,
    pub which_arg: String,
    pub new_field_name: String,
    pub new_which_arg: String,
    pub updated: bool,
}

/// A configured filter control on a list report.
#[derive(Debug, Clone)]
pub struct PrimaryFilter {
    pub id: i64,
    pub label: String,
    pub field_name: String,
    pub new_field_name: String,
    pub updated: bool,
}

/// One field on the entry page form.
#[derive(Debug, Clone)]
pub struct FormField {
    pub id: i64,
    pub name: String,
    pub label: String,
    pub field_type: String,
    pub new_name: String,
}

/// A value-picker widget bound to a form field.
#[derive(Debug, Clone)]
pub struct FormFieldChooser {
    pub id: i64,
    pub field: String,
    pub cross_reference: String,
    pub chooser_type: String,
    pub pick_list_name: String,
    pub helper_name: String,
    pub new_field: String,
    pub new_cross_reference: String,
    pub updated: bool,
}

/// A fixed option attached to a form field.
#[derive(Debug, Clone)]
pub struct FormFieldOption {
    pub id: i64,
    pub field: String,
    pub new_field: String,
    pub updated: bool,
}

/// One stored-procedure argument binding.
#[derive(Debug, Clone)]
pub struct StoredProcArgument {
    pub id: i64,
    pub field: String,
    pub argument_name: String,
    pub procedure_name: String,
    pub new_field: String,
    pub updated: bool,
}

/// A form field populated from another page family.
#[derive(Debug, Clone)]
pub struct ExternalSource {
    pub id: i64,
    pub field: String,
    pub source_page: String,
    pub source_column: String,
    pub source_type: String,
    pub new_field: String,
    pub updated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_params_known_and_unknown_keys() {
        let mut params = GeneralParams::default();
        assert!(params.set(GeneralParams::KEY_ENTRY_PAGE_VIEW, "v_jobs"));
        assert!(params.set(GeneralParams::KEY_DATABASE_GROUP, "package"));
        assert!(!params.set("SomeFutureKey", "ignored"));
        assert_eq!(params.entry_page_view, "v_jobs");
        assert_eq!(params.database_group, "package");
        assert_eq!(params.detail_report_view, "");
    }
}
