//! Validation of table and column names that end up in SQL text.
//!
//! Key names are rendered into seek predicates and ORDER BY clauses verbatim,
//! never bound as parameters, so every resolved column is checked here first.

/// Postgres truncates identifiers past 63 bytes.
const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Returns `true` for a bare identifier: an ASCII letter or underscore
/// followed by ASCII letters, digits or underscores, 1 to 63 bytes long.
///
/// ```
/// use mik_keyset::is_valid_sql_identifier;
///
/// assert!(is_valid_sql_identifier("created_at"));
/// assert!(is_valid_sql_identifier("_rowid"));
/// assert!(!is_valid_sql_identifier("9lives"));
/// assert!(!is_valid_sql_identifier("posts.id"));
/// assert!(!is_valid_sql_identifier("id; DROP TABLE posts"));
/// ```
#[must_use]
pub fn is_valid_sql_identifier(name: &str) -> bool {
    let bytes = name.as_bytes();
    match bytes.split_first() {
        Some((first, rest)) if bytes.len() <= MAX_IDENTIFIER_LENGTH => {
            (first.is_ascii_alphabetic() || *first == b'_')
                && rest.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'_')
        },
        _ => false,
    }
}

/// Returns `true` for a column name, bare (`id`) or table-qualified
/// (`posts.id`). Each part must be a valid identifier.
///
/// ```
/// use mik_keyset::is_valid_column;
///
/// assert!(is_valid_column("id"));
/// assert!(is_valid_column("posts.created_at"));
/// assert!(!is_valid_column("public.posts.id"));
/// assert!(!is_valid_column("posts."));
/// ```
#[must_use]
pub fn is_valid_column(name: &str) -> bool {
    match name.split_once('.') {
        Some((table, column)) => is_valid_sql_identifier(table) && is_valid_sql_identifier(column),
        None => is_valid_sql_identifier(name),
    }
}

/// First entry of `columns` that is not a valid column name.
pub(crate) fn first_invalid_column(columns: &[String]) -> Option<&str> {
    columns
        .iter()
        .map(String::as_str)
        .find(|column| !is_valid_column(column))
}

/// Panic unless `name` is a valid bare identifier.
///
/// For names written in code, not for user input.
///
/// ```should_panic
/// mik_keyset::assert_valid_sql_identifier("posts; --", "table");
/// ```
pub fn assert_valid_sql_identifier(name: &str, context: &str) {
    assert!(
        is_valid_sql_identifier(name),
        "Invalid SQL {context} name '{name}': expected an ASCII identifier of 1-63 chars"
    );
}

/// Panic unless `name` is a valid, optionally table-qualified, column name.
pub(crate) fn assert_valid_column(name: &str, context: &str) {
    assert!(
        is_valid_column(name),
        "Invalid SQL {context} name '{name}': must be an identifier, optionally table-qualified"
    );
}
