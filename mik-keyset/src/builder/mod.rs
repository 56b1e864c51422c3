//! Expression tree and SQL rendering for seek predicates and ORDER BY clauses.

mod filter;
mod select;
mod types;

// Re-export all public items
pub use select::QueryBuilder;
pub use types::{
    CompoundFilter, CursorDirection, Filter, FilterExpr, LogicalOp, Operator, QueryResult,
    SortDir, SortField, Value, and, or, order_clause, simple,
};
