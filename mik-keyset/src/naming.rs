//! Model field name to storage column name conversion.

use convert_case::{Case, Casing};
use serde::Deserialize;

/// How model-level key names map to column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnNaming {
    /// `CreatedAt` becomes `created_at`, `ID` becomes `id`.
    #[default]
    Snake,
    /// Key names are used as column names unchanged.
    Preserve,
}

impl ColumnNaming {
    /// Column name for a model key.
    #[must_use]
    pub fn column(self, key: &str) -> String {
        match self {
            Self::Snake => key.to_case(Case::Snake),
            Self::Preserve => key.to_string(),
        }
    }

    /// Table-qualified column name, `table.column`; unqualified when `table` is empty.
    #[must_use]
    pub fn qualified(self, table: &str, key: &str) -> String {
        let column = self.column(key);
        if table.is_empty() {
            column
        } else {
            format!("{table}.{column}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case_keys() {
        assert_eq!(ColumnNaming::Snake.column("ID"), "id");
        assert_eq!(ColumnNaming::Snake.column("CreatedAt"), "created_at");
        assert_eq!(ColumnNaming::Snake.column("created_at"), "created_at");
    }

    #[test]
    fn test_preserve_keys() {
        assert_eq!(ColumnNaming::Preserve.column("CreatedAt"), "CreatedAt");
    }

    #[test]
    fn test_qualified() {
        assert_eq!(ColumnNaming::Snake.qualified("users", "ID"), "users.id");
        assert_eq!(ColumnNaming::Snake.qualified("", "ID"), "id");
    }
}
