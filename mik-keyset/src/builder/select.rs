//! SELECT query builder.

use crate::dialect::Dialect;
use crate::validate::{assert_valid_column, assert_valid_sql_identifier};

use super::filter::build_filter_expr_impl;
use super::types::{
    Filter, FilterExpr, Operator, QueryResult, SortDir, SortField, Value, order_clause,
};

/// SQL query builder with dialect support.
///
/// Renders `SELECT .. FROM .. WHERE .. ORDER BY .. LIMIT ..`. All filters are
/// joined with `AND` in the order they were added.
#[derive(Debug, Clone)]
pub struct QueryBuilder<D: Dialect> {
    dialect: D,
    pub(crate) table: String,
    fields: Vec<String>,
    pub(crate) filters: Vec<FilterExpr>,
    pub(crate) sorts: Vec<SortField>,
    pub(crate) limit: Option<usize>,
}

impl<D: Dialect> QueryBuilder<D> {
    /// Create a new query builder for the given table.
    ///
    /// # Panics
    ///
    /// Panics if the table name is not a valid SQL identifier.
    pub fn new(dialect: D, table: impl Into<String>) -> Self {
        let table = table.into();
        assert_valid_sql_identifier(&table, "table");
        Self {
            dialect,
            table,
            fields: Vec::new(),
            filters: Vec::new(),
            sorts: Vec::new(),
            limit: None,
        }
    }

    /// The table this query reads from.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Set the fields to SELECT.
    ///
    /// # Panics
    ///
    /// Panics if any field name is not a valid SQL identifier.
    pub fn fields(mut self, fields: &[&str]) -> Self {
        for field in fields {
            assert_valid_column(field, "field");
        }
        self.fields = fields.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Add a filter condition.
    ///
    /// # Panics
    ///
    /// Panics if the field name is not a valid, optionally table-qualified, identifier.
    pub fn filter(mut self, field: impl Into<String>, op: Operator, value: Value) -> Self {
        let field = field.into();
        assert_valid_column(&field, "filter field");
        self.filters.push(FilterExpr::Simple(Filter { field, op, value }));
        self
    }

    /// Add a filter expression, AND-ed with the others.
    pub fn filter_expr(mut self, expr: FilterExpr) -> Self {
        self.filters.push(expr);
        self
    }

    /// Add a sort field.
    ///
    /// # Panics
    ///
    /// Panics if the field name is not a valid, optionally table-qualified, identifier.
    pub fn sort(mut self, field: impl Into<String>, dir: SortDir) -> Self {
        let field = field.into();
        assert_valid_column(&field, "sort field");
        self.sorts.push(SortField::new(field, dir));
        self
    }

    /// Add multiple sort fields.
    pub fn sorts(mut self, sorts: &[SortField]) -> Self {
        self.sorts.extend(sorts.iter().cloned());
        self
    }

    /// Set a limit.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Render `SELECT .. FROM .. [WHERE ..] [ORDER BY ..] [LIMIT ..]` and its
    /// parameters. Placeholders are numbered across all filters in order.
    pub fn build(&self) -> QueryResult {
        let columns = if self.fields.is_empty() {
            "*".to_string()
        } else {
            self.fields.join(", ")
        };
        let mut sql = format!("SELECT {columns} FROM {}", self.table);

        let mut params = Vec::new();
        let mut next_idx = 1;
        let clauses: Vec<String> = self
            .filters
            .iter()
            .filter_map(|expr| {
                let (clause, values, idx) = build_filter_expr_impl(&self.dialect, expr, next_idx);
                // Empty compounds render nothing and bind nothing
                (!clause.is_empty()).then(|| {
                    params.extend(values);
                    next_idx = idx;
                    clause
                })
            })
            .collect();

        if !clauses.is_empty() {
            sql.push_str(&format!(" WHERE {}", clauses.join(" AND ")));
        }
        if !self.sorts.is_empty() {
            sql.push_str(&format!(" ORDER BY {}", order_clause(&self.sorts)));
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        QueryResult { sql, params }
    }
}
