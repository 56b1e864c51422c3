//! ORDER BY construction for keyset pages.

use crate::builder::{CursorDirection, SortDir, SortField};

/// Direction the query scans in.
///
/// Backward pages are fetched from the opposite end and reversed into
/// display order afterwards, so `Before` flips the requested direction.
#[inline]
#[must_use]
pub const fn effective_order(order: SortDir, side: Option<CursorDirection>) -> SortDir {
    match side {
        Some(CursorDirection::Before) => order.flip(),
        Some(CursorDirection::After) | None => order,
    }
}

/// One sort field per key column, all in the effective direction.
#[must_use]
pub fn build_order(
    columns: &[String],
    order: SortDir,
    side: Option<CursorDirection>,
) -> Vec<SortField> {
    let dir = effective_order(order, side);
    columns
        .iter()
        .map(|column| SortField::new(column.clone(), dir))
        .collect()
}
