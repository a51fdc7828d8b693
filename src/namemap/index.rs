// src/namemap/index.rs

use std::collections::HashMap;

use crate::ident::{split_schema, strip_quotes};

/// One column rename scoped to a qualified view name.
#[derive(Debug, Clone)]
pub struct NameMapEntry {
    pub source: String,
    pub target: String,
    /// Parsed from the corpus but not consulted during resolution; kept so
    /// existing corpora load unchanged.
    pub is_alias: bool,
}

/// Column renames for one view, keyed by source column name.
/// First occurrence wins on duplicate corpus rows.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    entries: HashMap<String, NameMapEntry>,
}

impl ColumnMap {
    pub fn insert_first_wins(&mut self, entry: NameMapEntry) -> bool {
        if self.entries.contains_key(&entry.source) {
            return false;
        }
        self.entries.insert(entry.source.clone(), entry);
        true
    }

    pub fn get(&self, source_column: &str) -> Option<&NameMapEntry> {
        self.entries.get(source_column)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NameMapEntry> {
        self.entries.values()
    }
}

/// Loaded rename corpus with lookup indexes.
///
/// `maps` is keyed by the quote-stripped qualified view name. The two view
/// indexes let callers find the fully qualified mapped name from either a
/// quote-stripped qualified name or a bare unqualified name
/// (first-registered wins for the unqualified index).
#[derive(Debug, Default)]
pub struct NameMapIndex {
    maps: HashMap<String, ColumnMap>,
    by_qualified: HashMap<String, String>,
    by_unqualified: HashMap<String, String>,
    synonyms: HashMap<String, String>,
    warnings: Vec<String>,
}

impl NameMapIndex {
    /// Register a view under both indexes and return its column map.
    /// `qualified` is the name exactly as it appears in the corpus.
    pub fn register_view(&mut self, qualified: &str) -> &mut ColumnMap {
        let key = strip_quotes(qualified);
        self.by_qualified
            .entry(key.clone())
            .or_insert_with(|| qualified.to_string());
        let (_, bare) = split_schema(&key);
        self.by_unqualified
            .entry(bare)
            .or_insert_with(|| qualified.to_string());
        self.maps.entry(key).or_default()
    }

    /// Column map for a view, matched first by quote-stripped qualified
    /// name, then by unqualified name.
    pub fn column_map_for(&self, view: &str) -> Option<&ColumnMap> {
        let key = strip_quotes(view);
        if let Some(map) = self.maps.get(&key) {
            return Some(map);
        }
        let (_, bare) = split_schema(&key);
        let qualified = self.by_unqualified.get(&bare)?;
        self.maps.get(&strip_quotes(qualified))
    }

    /// Fully qualified mapped name for a view or procedure, matched by
    /// qualified then unqualified name.
    pub fn mapped_view_name(&self, name: &str) -> Option<&str> {
        let key = strip_quotes(name);
        if let Some(qualified) = self.by_qualified.get(&key) {
            return Some(qualified);
        }
        let (_, bare) = split_schema(&key);
        self.by_unqualified.get(&bare).map(|s| s.as_str())
    }

    /// Post-migration name for a legacy table name, if a synonym exists.
    pub fn synonym_target(&self, source: &str) -> Option<&str> {
        self.synonyms.get(&strip_quotes(source)).map(|s| s.as_str())
    }

    /// Alias the column map registered for `target` under `source` as well,
    /// so lookups by the pre-migration table name still resolve.
    ///
    /// When `source` already has its own entries the two are unioned;
    /// an existing entry whose target differs is kept and the conflict is
    /// recorded as a warning.
    pub fn merge_synonym(&mut self, source: &str, target: &str) {
        let source_key = strip_quotes(source);
        let target_key = strip_quotes(target);
        self.synonyms.insert(source_key.clone(), target.to_string());

        let Some(target_map) = self.maps.get(&target_key).cloned() else {
            return;
        };
        let source_map = self.register_view(source);
        let mut conflicts = Vec::new();
        for entry in target_map.iter() {
            if let Some(existing) = source_map.get(&entry.source) {
                if existing.target != entry.target {
                    conflicts.push(format!(
                        "synonym merge for '{}': column '{}' maps to '{}' here but '{}' under '{}'; keeping '{}'",
                        source_key,
                        entry.source,
                        existing.target,
                        entry.target,
                        target_key,
                        existing.target
                    ));
                }
                continue;
            }
            source_map.insert_first_wins(entry.clone());
        }
        self.warnings.extend(conflicts);
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn view_count(&self) -> usize {
        self.maps.len()
    }

    pub fn entry_count(&self) -> usize {
        self.maps.values().map(|m| m.len()).sum()
    }

    pub fn alias_entry_count(&self) -> usize {
        self.maps
            .values()
            .flat_map(|m| m.iter())
            .filter(|e| e.is_alias)
            .count()
    }
}
