// src/ident.rs
// Pure identifier operations: schema splitting, quoting, snake_case
// conversion, and plus-prefix extraction for hotlink field names.

/// Schema assumed when a name carries no schema qualifier.
pub const DEFAULT_SCHEMA: &str = "public";

/// Quoting style for emitted identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    DoubleQuote,
    SquareBracket,
}

/// Split a possibly schema-qualified name into `(schema, name)`.
/// Everything before the first `.` is the schema; names without a dot get
/// [`DEFAULT_SCHEMA`]. Blank input is returned as given.
///
/// # Example
/// ```
/// let (schema, name) = split_schema("public.v_jobs");
/// assert_eq!(schema, "public");
/// assert_eq!(name, "v_jobs");
/// ```
pub fn split_schema(name: &str) -> (String, String) {
    if name.trim().is_empty() {
        return (DEFAULT_SCHEMA.to_string(), name.to_string());
    }
    match name.find('.') {
        Some(pos) => (
            strip_quotes(&name[..pos]),
            name[pos + 1..].to_string(),
        ),
        None => (DEFAULT_SCHEMA.to_string(), name.to_string()),
    }
}

/// Remove double-quote and square-bracket quoting from an identifier so it
/// can be used as a lookup key. Works on qualified names too:
/// `"public"."v_jobs"` becomes `public.v_jobs`.
pub fn strip_quotes(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '"' | '[' | ']'))
        .collect()
}

/// Quote an identifier in the given style.
///
/// Already-quoted names, single-quoted string literals, and a bare `*` are
/// passed through unchanged. Otherwise the name is quoted when it contains
/// characters outside `[A-Za-z0-9_]`, or always when `force` is set.
pub fn apply_quoting(name: &str, style: QuoteStyle, force: bool) -> String {
    if name.is_empty() || name == "*" {
        return name.to_string();
    }
    if name.starts_with('"') || name.starts_with('[') || name.starts_with('\'') {
        return name.to_string();
    }
    let needs_quoting = !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !needs_quoting && !force {
        return name.to_string();
    }
    match style {
        QuoteStyle::DoubleQuote => format!("\"{}\"", name),
        QuoteStyle::SquareBracket => format!("[{}]", name),
    }
}

// Legacy per-subsystem column prefixes collapsed during migration.
const STRIP_PREFIXES_3: [&str; 6] = ["aj_", "ds_", "ap_", "sc_", "rr_", "sp_"];
const STRIP_PREFIXES_4: [&str; 2] = ["ajr_", "org_"];

/// Convert an identifier to snake_case.
///
/// Lowercases the name, inserting `_` where a lowercase letter is
/// immediately followed by an uppercase letter. A leading `EUS` not already
/// followed by `_` gets an underscore inserted after it before conversion.
/// After conversion, one leading legacy subsystem prefix (`aj_`, `ds_`,
/// `ap_`, `sc_`, `rr_`, `sp_`, `ajr_`, `org_`) is stripped.
///
/// # Example
/// ```
/// assert_eq!(to_snake_case("AJ_ToolName"), "tool_name");
/// assert_eq!(to_snake_case("EUSUserID"), "eus_user_id");
/// ```
pub fn to_snake_case(name: &str) -> String {
    let working = match name.strip_prefix("EUS") {
        Some(rest) if !rest.starts_with('_') => format!("EUS_{}", rest),
        _ => name.to_string(),
    };

    let mut out = String::with_capacity(working.len() + 4);
    let mut prev_was_lower = false;
    for ch in working.chars() {
        if ch.is_ascii_uppercase() && prev_was_lower {
            out.push('_');
        }
        prev_was_lower = ch.is_ascii_lowercase();
        out.push(ch.to_ascii_lowercase());
    }

    strip_legacy_prefix(&out)
}

fn strip_legacy_prefix(name: &str) -> String {
    for prefix in STRIP_PREFIXES_4 {
        if name.starts_with(prefix) && name.len() > prefix.len() {
            return name[prefix.len()..].to_string();
        }
    }
    for prefix in STRIP_PREFIXES_3 {
        if name.starts_with(prefix) && name.len() > prefix.len() {
            return name[prefix.len()..].to_string();
        }
    }
    name.to_string()
}

/// Peel one or more leading `+` characters (optionally preceded by spaces)
/// off a hotlink field name. Returns `(prefix, base_name)`; concatenating
/// the two reconstructs the input exactly. Names without the prefix return
/// an empty prefix.
pub fn extract_plus_prefix(name: &str) -> (String, String) {
    let mut split_at = 0;
    let bytes = name.as_bytes();
    while split_at < bytes.len() && bytes[split_at] == b' ' {
        split_at += 1;
    }
    if split_at >= bytes.len() || bytes[split_at] != b'+' {
        return (String::new(), name.to_string());
    }
    while split_at < bytes.len() && bytes[split_at] == b'+' {
        split_at += 1;
    }
    (name[..split_at].to_string(), name[split_at..].to_string())
}

/// True for values that are SQL literals rather than identifiers: a
/// single-quoted string or a digit-shaped number with an optional sign.
/// Alphabetic float spellings (`NaN`, `inf`) are identifiers, not numbers.
pub fn is_sql_literal(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.starts_with('\'') {
        return true;
    }
    let digits = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed);
    !digits.is_empty()
        && digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
}
