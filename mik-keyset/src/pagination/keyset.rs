//! Keyset pagination condition generation.

use crate::builder::{
    CompoundFilter, CursorDirection, Filter, FilterExpr, LogicalOp, Operator, SortDir, Value,
};

/// Strict comparison operator for a seek predicate.
///
/// | Active side | Direction | Operator |
/// |-------------|-----------|----------|
/// | After       | Asc       | `>`      |
/// | After       | Desc      | `<`      |
/// | Before      | Asc       | `<`      |
/// | Before      | Desc      | `>`      |
#[inline]
#[must_use]
pub const fn seek_operator(side: CursorDirection, order: SortDir) -> Operator {
    match (side, order) {
        (CursorDirection::After, SortDir::Asc) | (CursorDirection::Before, SortDir::Desc) => {
            Operator::Gt
        },
        (CursorDirection::After, SortDir::Desc) | (CursorDirection::Before, SortDir::Asc) => {
            Operator::Lt
        },
    }
}

/// Keyset pagination condition.
///
/// Seeks past the row whose key values are `values`, comparing the tuple of
/// `columns` lexicographically.
#[derive(Debug, Clone, PartialEq)]
pub struct KeysetCondition {
    /// Storage-qualified key columns, in tie-break order.
    pub columns: Vec<String>,
    /// Decoded cursor values, one per column.
    pub values: Vec<Value>,
    /// Which cursor side is active.
    pub side: CursorDirection,
    /// Requested (display) sort direction.
    pub order: SortDir,
}

impl KeysetCondition {
    /// Create a condition for paginating after a cursor.
    #[must_use]
    pub fn after(columns: &[String], values: Vec<Value>, order: SortDir) -> Option<Self> {
        Self::new(columns, values, CursorDirection::After, order)
    }

    /// Create a condition for paginating before a cursor.
    #[must_use]
    pub fn before(columns: &[String], values: Vec<Value>, order: SortDir) -> Option<Self> {
        Self::new(columns, values, CursorDirection::Before, order)
    }

    /// Create a condition, or `None` when there is nothing to seek from.
    ///
    /// Returns `None` for an empty key set, an empty value list, or a value
    /// count that does not match the key count.
    #[must_use]
    pub fn new(
        columns: &[String],
        values: Vec<Value>,
        side: CursorDirection,
        order: SortDir,
    ) -> Option<Self> {
        if columns.is_empty() || values.len() != columns.len() {
            return None;
        }
        Some(Self {
            columns: columns.to_vec(),
            values,
            side,
            order,
        })
    }

    /// The strict comparison operator used by every clause.
    #[inline]
    #[must_use]
    pub const fn operator(&self) -> Operator {
        seek_operator(self.side, self.order)
    }

    /// Convert to a filter expression for the query builder.
    ///
    /// For a single key, generates: `k1 OP v1`
    ///
    /// For N keys, a disjunction where clause `i` pins the first `i - 1` keys
    /// with equality and compares key `i` strictly:
    /// `(k1 OP v1) OR (k1 = v1 AND k2 OP v2) OR ... (k1 = v1 AND ... AND kN OP vN)`
    #[must_use]
    pub fn to_filter_expr(&self) -> FilterExpr {
        let op = self.operator();
        let mut or_conditions: Vec<FilterExpr> = Vec::with_capacity(self.columns.len());

        for (i, (column, value)) in self.columns.iter().zip(&self.values).enumerate() {
            // Equality on every preceding key, then the strict comparison
            let mut and_conditions: Vec<FilterExpr> = self
                .columns
                .iter()
                .zip(&self.values)
                .take(i)
                .map(|(c, v)| FilterExpr::Simple(Filter::new(c.clone(), Operator::Eq, v.clone())))
                .collect();
            and_conditions.push(FilterExpr::Simple(Filter::new(
                column.clone(),
                op,
                value.clone(),
            )));

            let condition = match and_conditions.len() {
                1 => and_conditions.swap_remove(0),
                _ => FilterExpr::Compound(CompoundFilter {
                    op: LogicalOp::And,
                    filters: and_conditions,
                }),
            };
            or_conditions.push(condition);
        }

        match or_conditions.len() {
            1 => or_conditions.swap_remove(0),
            _ => FilterExpr::Compound(CompoundFilter {
                op: LogicalOp::Or,
                filters: or_conditions,
            }),
        }
    }

    /// Positional arguments in the order the rendered predicate binds them.
    ///
    /// Clause `i` binds its equality prefix and then value `i`. A NULL in the
    /// prefix renders as `IS NULL` and binds nothing.
    #[must_use]
    pub fn args(&self) -> Vec<Value> {
        (0..self.values.len())
            .flat_map(|i| {
                let prefix = self.values[..i].iter().filter(|v| !matches!(v, Value::Null));
                prefix.chain(std::iter::once(&self.values[i])).cloned()
            })
            .collect()
    }
}
