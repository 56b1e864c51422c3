//! SQL dialect implementations for Postgres, `SQLite` and `MySQL`.
//!
//! Seek predicates are built as expression trees; a dialect only decides how a
//! positional placeholder is spelled when the tree is rendered.

/// SQL dialect trait for database-specific syntax.
pub trait Dialect: Clone + Copy {
    /// Format a parameter placeholder (e.g., `$1` for Postgres, `?1` for `SQLite`).
    ///
    /// `idx` is 1-based.
    fn param(&self, idx: usize) -> String;
}

/// Postgres dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl Dialect for Postgres {
    #[inline]
    fn param(&self, idx: usize) -> String {
        format!("${idx}")
    }
}

/// `SQLite` dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

impl Dialect for Sqlite {
    #[inline]
    fn param(&self, idx: usize) -> String {
        format!("?{idx}")
    }
}

/// `MySQL` dialect (anonymous `?` placeholders, bound in order).
#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

impl Dialect for MySql {
    #[inline]
    fn param(&self, _idx: usize) -> String {
        "?".to_string()
    }
}
