// src/resolve/groups.rs
// Database-group tag lookups: schema prefixes for object renaming and
// full database names for schema validation.

/// Schema prefix for a configuration's database-group tag.
pub fn schema_prefix_for(group: &str) -> Option<&'static str> {
    match group.trim().to_ascii_lowercase().as_str() {
        "package" => Some("pkg"),
        "ontology" => Some("ont"),
        "broker" => Some("brk"),
        "capture" => Some("cap"),
        "manager_control" => Some("mc"),
        _ => None,
    }
}

/// Live database name for a configuration's database-group tag.
pub fn database_name_for(group: &str) -> Option<&'static str> {
    match group.trim().to_ascii_lowercase().as_str() {
        "package" => Some("package_db"),
        "ontology" => Some("ontology_db"),
        "broker" => Some("broker_db"),
        "capture" => Some("capture_db"),
        "manager_control" => Some("manager_control_db"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_groups() {
        assert_eq!(schema_prefix_for("package"), Some("pkg"));
        assert_eq!(schema_prefix_for("Manager_Control"), Some("mc"));
        assert_eq!(database_name_for("ontology"), Some("ontology_db"));
    }

    #[test]
    fn test_unknown_group() {
        assert_eq!(schema_prefix_for("unknown"), None);
        assert_eq!(database_name_for(""), None);
    }
}
