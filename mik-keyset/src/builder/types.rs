//! Core types shared by the predicate builder, the order builder and SQL rendering.

use serde::Deserialize;

/// Comparison operators used by seek predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Equal: `=`
    Eq,
    /// Not equal: `!=`
    Ne,
    /// Greater than: `>`
    Gt,
    /// Greater than or equal: `>=`
    Gte,
    /// Less than: `<`
    Lt,
    /// Less than or equal: `<=`
    Lte,
}

impl Operator {
    /// SQL spelling of the operator.
    #[inline]
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
        }
    }
}

/// Logical operators for compound filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    /// All conditions must match: `AND`
    And,
    /// At least one condition must match: `OR`
    Or,
}

/// A filter expression that can be simple or compound.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// A simple column comparison.
    Simple(Filter),
    /// A compound filter with logical operator.
    Compound(CompoundFilter),
}

/// A compound filter combining multiple expressions with a logical operator.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundFilter {
    /// How the children are joined.
    pub op: LogicalOp,
    /// Child expressions, in render order.
    pub filters: Vec<FilterExpr>,
}

impl CompoundFilter {
    /// Create an AND compound filter.
    #[must_use]
    pub const fn and(filters: Vec<FilterExpr>) -> Self {
        Self {
            op: LogicalOp::And,
            filters,
        }
    }

    /// Create an OR compound filter.
    #[must_use]
    pub const fn or(filters: Vec<FilterExpr>) -> Self {
        Self {
            op: LogicalOp::Or,
            filters,
        }
    }
}

/// Filter condition: `field op value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Storage-qualified column name.
    pub field: String,
    /// Comparison operator.
    pub op: Operator,
    /// Right-hand side, always bound as a parameter.
    pub value: Value,
}

impl Filter {
    /// Create a new filter condition.
    pub fn new(field: impl Into<String>, op: Operator, value: Value) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }
}

/// SQL parameter values, and the values carried by cursor tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL `NULL`.
    Null,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit float.
    Float(f64),
    /// Text.
    String(String),
}

/// Sort direction, applied uniformly to every key of a key set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum SortDir {
    /// Ascending: smallest first.
    #[serde(alias = "asc", alias = "ASC")]
    Asc,
    /// Descending: largest first.
    #[default]
    #[serde(alias = "desc", alias = "DESC")]
    Desc,
}

impl SortDir {
    /// Return the opposite direction.
    #[inline]
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// SQL keyword for this direction.
    #[inline]
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl std::fmt::Display for SortDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Sort field with direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    /// Storage-qualified column name.
    pub field: String,
    /// Direction for this column.
    pub dir: SortDir,
}

impl SortField {
    /// Create a new sort field.
    pub fn new(field: impl Into<String>, dir: SortDir) -> Self {
        Self {
            field: field.into(),
            dir,
        }
    }

    /// Render as `column DIR`.
    #[must_use]
    pub fn to_sql(&self) -> String {
        format!("{} {}", self.field, self.dir)
    }
}

/// Render an ORDER BY body: comma-separated `column DIR` pairs.
///
/// ```
/// use mik_keyset::{SortDir, SortField, order_clause};
///
/// let sorts = [
///     SortField::new("users.created_at", SortDir::Desc),
///     SortField::new("users.id", SortDir::Desc),
/// ];
/// assert_eq!(order_clause(&sorts), "users.created_at DESC, users.id DESC");
/// ```
#[must_use]
pub fn order_clause(sorts: &[SortField]) -> String {
    sorts
        .iter()
        .map(SortField::to_sql)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Which cursor side drives a pagination call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorDirection {
    /// Paginate forward (after the cursor).
    After,
    /// Paginate backward (before the cursor).
    Before,
}

/// Query result with SQL string and parameters.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "QueryResult must be used to execute the query"]
pub struct QueryResult {
    /// Rendered SQL text with dialect placeholders.
    pub sql: String,
    /// Positional parameters, in placeholder order.
    pub params: Vec<Value>,
}

/// Helper function to create a simple filter expression.
pub fn simple(field: impl Into<String>, op: Operator, value: Value) -> FilterExpr {
    FilterExpr::Simple(Filter::new(field, op, value))
}

/// Helper function to create an AND compound filter.
#[must_use]
pub const fn and(filters: Vec<FilterExpr>) -> FilterExpr {
    FilterExpr::Compound(CompoundFilter::and(filters))
}

/// Helper function to create an OR compound filter.
#[must_use]
pub const fn or(filters: Vec<FilterExpr>) -> FilterExpr {
    FilterExpr::Compound(CompoundFilter::or(filters))
}
