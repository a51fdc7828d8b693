// src/rewrite/datacols.rs
// Composite data-column list parameters: comma-separated columns with
// optional ` AS alias` suffixes.

use crate::ident::{apply_quoting, QuoteStyle};
use crate::resolve::{ParameterRole, Resolution, ResolutionEngine};

/// Rewrite a comma-separated data-column list against `view`.
///
/// Each entry's base column is resolved with snake-casing requested; the
/// alias after a case-insensitive ` AS ` is resolved too when
/// `rename_aliases` is set (entry pages), otherwise passed through. The
/// list is reassembled as `quoted_name[ AS alias]` joined by `", "`.
pub fn rewrite_data_column_list(
    engine: &mut ResolutionEngine,
    role: ParameterRole,
    view: &str,
    list: &str,
    rename_aliases: bool,
) -> Resolution {
    if list.trim().is_empty() {
        return Resolution::unchanged(list);
    }
    let mut parts = Vec::new();
    for raw in list.split(',') {
        let item = raw.trim();
        if item.is_empty() {
            continue;
        }
        let (base, alias) = split_alias(item);
        let resolved = engine.resolve(role, view, base, true);
        let quoted = apply_quoting(&resolved.name, QuoteStyle::DoubleQuote, false);
        match alias {
            Some(alias) => {
                let alias_name = if rename_aliases {
                    engine.resolve(role, view, alias, true).name
                } else {
                    alias.to_string()
                };
                parts.push(format!("{} AS {}", quoted, alias_name));
            }
            None => parts.push(quoted),
        }
    }
    Resolution::from(list, parts.join(", "))
}

/// Rewrite a comma-separated sort-column list. Sort entries carry no
/// aliases and keep their existing quoting.
pub fn rewrite_sort_column_list(
    engine: &mut ResolutionEngine,
    role: ParameterRole,
    view: &str,
    list: &str,
) -> Resolution {
    if list.trim().is_empty() {
        return Resolution::unchanged(list);
    }
    let parts: Vec<String> = list
        .split(',')
        .map(|raw| raw.trim())
        .filter(|item| !item.is_empty())
        .map(|item| engine.resolve(role, view, item, true).name)
        .collect();
    Resolution::from(list, parts.join(", "))
}

/// Split `name AS alias` (case-insensitive ` AS `) into base and alias.
fn split_alias(item: &str) -> (&str, Option<&str>) {
    let upper = item.to_ascii_uppercase();
    if let Some(pos) = upper.rfind(" AS ") {
        let base = item[..pos].trim();
        let alias = item[pos + 4..].trim();
        if !base.is_empty() && !alias.is_empty() {
            return (base, Some(alias));
        }
    }
    (item, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namemap::{NameMapEntry, NameMapIndex};
    use crate::options::RunOptions;

    fn corpus() -> NameMapIndex {
        let mut index = NameMapIndex::default();
        let map = index.register_view("public.v_jobs");
        map.insert_first_wins(NameMapEntry {
            source: "AJ_jobID".to_string(),
            target: "job".to_string(),
            is_alias: false,
        });
        index
    }

    #[test]
    fn test_split_alias() {
        assert_eq!(split_alias("Col AS C"), ("Col", Some("C")));
        assert_eq!(split_alias("Col as C"), ("Col", Some("C")));
        assert_eq!(split_alias("Col"), ("Col", None));
    }

    #[test]
    fn test_rewrite_list_with_aliases() {
        let index = corpus();
        let options = RunOptions::default();
        let mut engine = ResolutionEngine::new(&index, &options);
        let resolution = rewrite_data_column_list(
            &mut engine,
            ParameterRole::EntryPage,
            "v_jobs",
            "AJ_jobID, AJ_Priority AS Pri_Level",
            true,
        );
        assert_eq!(resolution.name, "job, priority AS pri_level");
        assert!(resolution.changed);
    }

    #[test]
    fn test_aliases_pass_through_outside_entry_page() {
        let index = corpus();
        let options = RunOptions::default();
        let mut engine = ResolutionEngine::new(&index, &options);
        let resolution = rewrite_data_column_list(
            &mut engine,
            ParameterRole::ListReport,
            "v_jobs",
            "AJ_Priority AS Pri_Level",
            false,
        );
        assert_eq!(resolution.name, "priority AS Pri_Level");
    }

    #[test]
    fn test_names_needing_quotes_are_quoted() {
        let index = corpus();
        let mut options = RunOptions::default();
        options.snake_case_column_names = false;
        let mut engine = ResolutionEngine::new(&index, &options);
        let resolution = rewrite_data_column_list(
            &mut engine,
            ParameterRole::ListReport,
            "v_jobs",
            "Job Count",
            false,
        );
        assert_eq!(resolution.name, "\"Job Count\"");
    }

    #[test]
    fn test_sort_columns_resolved_without_quoting() {
        let index = corpus();
        let options = RunOptions::default();
        let mut engine = ResolutionEngine::new(&index, &options);
        let resolution = rewrite_sort_column_list(
            &mut engine,
            ParameterRole::ListReport,
            "v_jobs",
            "AJ_jobID, Priority",
        );
        assert_eq!(resolution.name, "job, priority");
    }
}
