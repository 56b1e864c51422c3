//! The query collaborator a [`Paginator`](crate::Paginator) drives.
//!
//! The paginator never renders or runs SQL itself. It hands a structured seek
//! predicate, a sort list and a limit to a [`Query`], then asks it to execute.
//! [`SqlQuery`] is a ready-made [`Query`] for any driver: it renders through
//! [`QueryBuilder`] and passes the SQL text and parameters to an [`Executor`].

use crate::builder::{FilterExpr, QueryBuilder, QueryResult, SortField};
use crate::dialect::Dialect;

/// Query builder capability consumed by the paginator.
pub trait Query {
    /// Entity type returned by [`select`](Self::select).
    type Row;
    /// Execution failure, surfaced to the caller unchanged.
    type Error;

    /// Table name used to qualify key columns. May be empty.
    fn table(&self) -> &str;

    /// Append a predicate, AND-ed with any existing ones.
    fn filter(&mut self, expr: FilterExpr);

    /// Cap the number of returned rows.
    fn limit(&mut self, limit: usize);

    /// Append ORDER BY fields.
    fn order(&mut self, sorts: &[SortField]);

    /// Execute and return the rows in the requested order.
    fn select(&mut self) -> Result<Vec<Self::Row>, Self::Error>;
}

/// Runs rendered SQL and maps result rows.
pub trait Executor {
    /// Mapped row type.
    type Row;
    /// Driver error.
    type Error;

    /// Execute `query` and return every row.
    fn fetch(&mut self, query: &QueryResult) -> Result<Vec<Self::Row>, Self::Error>;
}

/// [`Query`] backed by a [`QueryBuilder`] and an [`Executor`].
#[derive(Debug, Clone)]
pub struct SqlQuery<D: Dialect, X> {
    builder: QueryBuilder<D>,
    executor: X,
}

impl<D: Dialect, X: Executor> SqlQuery<D, X> {
    /// Wrap a builder (carrying any caller filters) and an executor.
    pub const fn new(builder: QueryBuilder<D>, executor: X) -> Self {
        Self { builder, executor }
    }

    /// The builder, including anything the paginator appended.
    pub const fn builder(&self) -> &QueryBuilder<D> {
        &self.builder
    }

    /// Render the current query.
    pub fn to_sql(&self) -> QueryResult {
        self.builder.build()
    }

    /// Split into builder and executor.
    pub fn into_parts(self) -> (QueryBuilder<D>, X) {
        (self.builder, self.executor)
    }
}

impl<D: Dialect, X: Executor> Query for SqlQuery<D, X> {
    type Row = X::Row;
    type Error = X::Error;

    fn table(&self) -> &str {
        &self.builder.table
    }

    fn filter(&mut self, expr: FilterExpr) {
        self.builder.filters.push(expr);
    }

    fn limit(&mut self, limit: usize) {
        self.builder.limit = Some(limit);
    }

    fn order(&mut self, sorts: &[SortField]) {
        self.builder.sorts.extend_from_slice(sorts);
    }

    fn select(&mut self) -> Result<Vec<Self::Row>, Self::Error> {
        let rendered = self.builder.build();
        self.executor.fetch(&rendered)
    }
}
