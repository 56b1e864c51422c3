//! Shared filter rendering functions.

use super::types::{CompoundFilter, Filter, FilterExpr, LogicalOp, Operator, QueryResult, Value};
use crate::dialect::Dialect;

impl FilterExpr {
    /// Render this expression for `dialect`, numbering placeholders from 1.
    ///
    /// ```
    /// use mik_keyset::{Operator, Postgres, Value, simple};
    ///
    /// let rendered = simple("users.id", Operator::Gt, Value::Int(10)).to_sql(&Postgres);
    /// assert_eq!(rendered.sql, "users.id > $1");
    /// assert_eq!(rendered.params, vec![Value::Int(10)]);
    /// ```
    pub fn to_sql<D: Dialect>(&self, dialect: &D) -> QueryResult {
        let (sql, params, _) = build_filter_expr_impl(dialect, self, 1);
        QueryResult { sql, params }
    }

    /// Collect every column referenced by this expression, in render order.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        let mut out = Vec::new();
        collect_columns(self, &mut out);
        out
    }
}

fn collect_columns<'a>(expr: &'a FilterExpr, out: &mut Vec<&'a str>) {
    match expr {
        FilterExpr::Simple(filter) => out.push(&filter.field),
        FilterExpr::Compound(compound) => {
            for child in &compound.filters {
                collect_columns(child, out);
            }
        },
    }
}

/// Build a filter expression (simple or compound).
pub(crate) fn build_filter_expr_impl<D: Dialect>(
    dialect: &D,
    expr: &FilterExpr,
    start_idx: usize,
) -> (String, Vec<Value>, usize) {
    match expr {
        FilterExpr::Simple(filter) => build_condition_impl(dialect, filter, start_idx),
        FilterExpr::Compound(compound) => build_compound_filter_impl(dialect, compound, start_idx),
    }
}

/// Build a compound filter (AND, OR).
fn build_compound_filter_impl<D: Dialect>(
    dialect: &D,
    compound: &CompoundFilter,
    start_idx: usize,
) -> (String, Vec<Value>, usize) {
    let mut idx = start_idx;
    let mut all_params = Vec::new();
    let mut conditions = Vec::new();

    for filter_expr in &compound.filters {
        let (condition, params, new_idx) = build_filter_expr_impl(dialect, filter_expr, idx);
        conditions.push(condition);
        all_params.extend(params);
        idx = new_idx;
    }

    let joiner = match compound.op {
        LogicalOp::And => " AND ",
        LogicalOp::Or => " OR ",
    };
    let sql = match conditions.len() {
        0 => String::new(),
        1 => conditions.swap_remove(0),
        _ => format!("({})", conditions.join(joiner)),
    };

    (sql, all_params, idx)
}

/// Build a single filter condition.
fn build_condition_impl<D: Dialect>(
    dialect: &D,
    filter: &Filter,
    start_idx: usize,
) -> (String, Vec<Value>, usize) {
    let field = &filter.field;
    let idx = start_idx;

    match (filter.op, &filter.value) {
        // NULL handling
        (Operator::Eq, Value::Null) => (format!("{field} IS NULL"), vec![], idx),
        (Operator::Ne, Value::Null) => (format!("{field} IS NOT NULL"), vec![], idx),

        (op, value) => {
            let sql = format!("{} {} {}", field, op.as_sql(), dialect.param(idx));
            (sql, vec![value.clone()], idx + 1)
        },
    }
}
