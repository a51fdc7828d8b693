// src/resolve/mod.rs
// Layered name resolution: explicit map -> heuristic conversion -> passthrough.

pub mod groups;

use std::collections::HashSet;

use tracing::warn;

use crate::ident::{is_sql_literal, strip_quotes, to_snake_case};
use crate::namemap::NameMapIndex;
use crate::options::RunOptions;

/// Which configuration surface a name belongs to. Drives warning text and
/// a few role-specific rules (alias renaming, the `value` sentinel).
/// Choosers carry no role of their own: they are renamed through the
/// entry-page rename map, never resolved directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterRole {
    DetailReport,
    ListReport,
    EntryPage,
    StoredProcedure,
}

impl ParameterRole {
    pub fn describe(&self) -> &'static str {
        match self {
            ParameterRole::DetailReport => "detail report",
            ParameterRole::ListReport => "list report",
            ParameterRole::EntryPage => "entry page",
            ParameterRole::StoredProcedure => "stored procedure",
        }
    }
}

/// Outcome of resolving one name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub name: String,
    pub changed: bool,
}

impl Resolution {
    pub(crate) fn unchanged(name: &str) -> Self {
        Self {
            name: name.to_string(),
            changed: false,
        }
    }

    pub(crate) fn from(original: &str, name: String) -> Self {
        Self {
            changed: name != original,
            name,
        }
    }
}

/// Resolves column and object names against the rename corpus under the
/// configured fallback policy. Owns the warn-once set for views that have
/// no corpus entry.
pub struct ResolutionEngine<'a> {
    map: &'a NameMapIndex,
    options: &'a RunOptions,
    missing_views: HashSet<String>,
}

impl<'a> ResolutionEngine<'a> {
    pub fn new(map: &'a NameMapIndex, options: &'a RunOptions) -> Self {
        Self {
            map,
            options,
            missing_views: HashSet::new(),
        }
    }

    /// Resolve a column name recorded against `view`.
    ///
    /// The steps run in order; the first that produces an answer wins:
    /// blank or SQL-literal inputs pass through, then an explicit map
    /// entry, then the heuristic fallback (space replacement and optional
    /// snake-casing). Mapped targets are still snake-cased when requested,
    /// since the corpus records renames, not casing policy.
    pub fn resolve(
        &mut self,
        role: ParameterRole,
        view: &str,
        current: &str,
        snake_case_requested: bool,
    ) -> Resolution {
        if let Some(resolution) = self.pass_through(current) {
            return resolution;
        }
        match self.map_lookup(role, view, current) {
            Some(target) => {
                let mut name = target;
                if snake_case_requested && self.options.snake_case_column_names {
                    name = to_snake_case(&name);
                }
                Resolution::from(current, name)
            }
            None => self.fallback(current, snake_case_requested),
        }
    }

    /// Step 1-2: blank input and SQL literals are never identifiers.
    fn pass_through(&self, current: &str) -> Option<Resolution> {
        if current.trim().is_empty() || is_sql_literal(current) {
            return Some(Resolution::unchanged(current));
        }
        None
    }

    /// Step 3-5: explicit corpus entry for `(view, current)`, warning once
    /// per view that has no map at all.
    fn map_lookup(&mut self, role: ParameterRole, view: &str, current: &str) -> Option<String> {
        match self.map.column_map_for(view) {
            None => {
                self.warn_missing_view(role, view);
                None
            }
            Some(column_map) => column_map.get(current).map(|e| e.target.clone()),
        }
    }

    /// Final step: heuristic normalization when no map entry applies.
    fn fallback(&self, current: &str, snake_case_requested: bool) -> Resolution {
        let mut name = current.to_string();
        if self.options.replace_spaces_with_underscores {
            name = name.replace(' ', "_");
        }
        if snake_case_requested && self.options.snake_case_column_names {
            name = to_snake_case(&name);
        }
        Resolution::from(current, name)
    }

    fn warn_missing_view(&mut self, role: ParameterRole, view: &str) {
        let key = strip_quotes(view);
        if key.is_empty() || !self.missing_views.insert(key.clone()) {
            return;
        }
        warn!(
            "No column rename map for {} view '{}'; falling back to heuristic conversion",
            role.describe(),
            key
        );
    }

    /// Rename a governing view or stored-procedure name.
    ///
    /// Looks the current name up in the synonym list, then the view-name
    /// index; undefined names are snake-cased only when the option allows.
    /// The result gets a schema prefix derived from the database-group tag
    /// unless it is already qualified or prefixing is disabled.
    pub fn rename_view_or_procedure(
        &mut self,
        role: ParameterRole,
        current: &str,
        database_group: &str,
    ) -> Resolution {
        if current.trim().is_empty() {
            return Resolution::unchanged(current);
        }
        let stripped = strip_quotes(current);

        let mut name = if let Some(target) = self.map.synonym_target(&stripped) {
            target.to_string()
        } else if let Some(qualified) = self.map.mapped_view_name(&stripped) {
            qualified.to_string()
        } else {
            self.warn_missing_view(role, &stripped);
            if self.options.rename_undefined_views {
                to_snake_case(&stripped)
            } else {
                current.to_string()
            }
        };

        if self.options.prefix_view_schema && !strip_quotes(&name).contains('.') {
            if let Some(prefix) = groups::schema_prefix_for(database_group) {
                name = format!("{}.{}", prefix, name);
            }
        }
        Resolution::from(current, name)
    }

    /// Views warned about so far; exposed for run reporting.
    pub fn missing_views(&self) -> &HashSet<String> {
        &self.missing_views
    }
}
