// =============================================================================
// CRATE-LEVEL QUALITY LINTS (following Tokio/Serde standards)
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
#![allow(clippy::doc_markdown)] // Code items in docs - extensive doc changes needed
#![allow(clippy::missing_errors_doc)] // # Errors sections - doc-heavy
#![allow(clippy::missing_panics_doc)] // # Panics sections - doc-heavy
#![allow(clippy::module_name_repetitions)] // Type names matching module - acceptable
#![allow(clippy::return_self_not_must_use)] // Builder pattern methods return Self
#![allow(clippy::must_use_candidate)] // Fluent API doesn't need must_use
#![allow(clippy::match_same_arms)] // Intentional for clarity in some match expressions
#![allow(clippy::double_must_use)] // Functions returning must_use types can have their own docs
#![allow(clippy::format_push_string)] // String building style preference

//! # mik-keyset - Keyset (Cursor) Pagination
//!
//! Pages through ordered rows with opaque cursor tokens instead of offsets.
//! Each page seeks past the boundary row of the previous one with a composite
//! key comparison, so page cost stays flat however deep the client walks.
//!
//! ## Quick Start
//!
//! ```
//! # use mik_keyset::prelude::*;
//! #[derive(Debug)]
//! struct Post {
//!     id: i64,
//! }
//!
//! impl CursorFields for Post {
//!     fn cursor_value(&self, key: &str) -> Option<Value> {
//!         (key == "ID").then(|| Value::Int(self.id))
//!     }
//! }
//!
//! let mut paginator = Paginator::new().limit(2).order(SortDir::Desc);
//!
//! // Plan the first page and render it for a driver
//! let plan = paginator.plan("posts").unwrap();
//! let sql = sqlite("posts")
//!     .fields(&["id"])
//!     .sorts(&plan.sorts)
//!     .limit(plan.fetch_limit)
//!     .build();
//! assert_eq!(sql.sql, "SELECT id FROM posts ORDER BY posts.id DESC LIMIT 3");
//!
//! // Hand back what the driver returned: one more row than the page size
//! let rows = vec![Post { id: 30 }, Post { id: 29 }, Post { id: 28 }];
//! let page = paginator.finish(&plan, rows).unwrap();
//!
//! assert_eq!(page.len(), 2);
//! assert!(page.has_more);
//! assert!(page.cursor.after.is_some());
//! assert!(page.cursor.before.is_none());
//! ```
//!
//! ## Seek Predicates
//!
//! For keys `[CreatedAt, ID]` paging forward in descending order, the
//! predicate is an OR of progressively longer equality prefixes:
//!
//! ```
//! # use mik_keyset::prelude::*;
//! let cond = KeysetCondition::after(
//!     &["created_at".to_string(), "id".to_string()],
//!     vec![Value::String("2024-01-15".into()), Value::Int(42)],
//!     SortDir::Desc,
//! )
//! .unwrap();
//!
//! let rendered = cond.to_filter_expr().to_sql(&Postgres);
//! assert_eq!(
//!     rendered.sql,
//!     "(created_at < $1 OR (created_at = $2 AND id < $3))"
//! );
//! assert_eq!(rendered.params.len(), 3);
//! ```
//!
//! ## Operators
//!
//! | Active cursor | Order | Operator | Scan order |
//! |---------------|-------|----------|------------|
//! | after | `ASC` | `>` | `ASC` |
//! | after | `DESC` | `<` | `DESC` |
//! | before | `ASC` | `<` | `DESC` |
//! | before | `DESC` | `>` | `ASC` |

mod builder;
mod config;
mod dialect;
mod error;
mod naming;
mod pagination;
mod paginator;
mod query;
mod validate;

pub use builder::{
    CompoundFilter, CursorDirection, Filter, FilterExpr, LogicalOp, Operator, QueryBuilder,
    QueryResult, SortDir, SortField, Value, and, or, order_clause, simple,
};
pub use config::{DEFAULT_KEY, DEFAULT_LIMIT, PaginatorConfig};
pub use dialect::{Dialect, MySql, Postgres, Sqlite};
pub use error::{ConfigError, Error};
pub use naming::ColumnNaming;
pub use pagination::{
    Cursor, CursorCodec, CursorError, CursorFields, JsonCursorCodec, KeysetCondition, Page,
    build_order, effective_order, post_process, seek_operator,
};
pub use paginator::{PagePlan, Paginator, ResolvedOptions};
pub use query::{Executor, Query, SqlQuery};
pub use validate::{assert_valid_sql_identifier, is_valid_column, is_valid_sql_identifier};

/// Re-export miniserde's json module, used by the cursor payload.
pub use miniserde::json;

/// Build a query for Postgres.
///
/// Convenience function that creates a `QueryBuilder` with Postgres dialect.
#[must_use]
pub fn postgres(table: &str) -> QueryBuilder<Postgres> {
    QueryBuilder::new(Postgres, table)
}

/// Build a query for `SQLite`.
///
/// Convenience function that creates a `QueryBuilder` with `SQLite` dialect.
#[must_use]
pub fn sqlite(table: &str) -> QueryBuilder<Sqlite> {
    QueryBuilder::new(Sqlite, table)
}

/// Build a query for MySQL.
#[must_use]
pub fn mysql(table: &str) -> QueryBuilder<MySql> {
    QueryBuilder::new(MySql, table)
}

/// Prelude module for convenient imports.
///
/// ```
/// use mik_keyset::prelude::*;
/// let plan = Paginator::new().plan("users").unwrap();
/// assert_eq!(order_clause(&plan.sorts), "users.id DESC");
/// ```
pub mod prelude {
    pub use crate::{
        Cursor, CursorCodec, CursorDirection, CursorError, CursorFields, Dialect, Error, Executor,
        FilterExpr, JsonCursorCodec, KeysetCondition, MySql, Operator, Page, PagePlan, Paginator,
        PaginatorConfig, Postgres, Query, QueryBuilder, QueryResult, SortDir, SortField, Sqlite,
        SqlQuery, Value, mysql, order_clause, postgres, simple, sqlite,
    };
}
