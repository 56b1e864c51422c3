//! Post-fetch reshaping of a keyset page.

use log::debug;

use super::codec::CursorError;
use super::cursor::Cursor;
use crate::builder::CursorDirection;

/// One page of results plus the cursors to its neighbours.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Page<T> {
    /// Rows in display order, at most `limit` of them.
    pub items: Vec<T>,
    /// Tokens for the next forward (`after`) and backward (`before`) requests.
    pub cursor: Cursor,
    /// Whether the over-fetch sentinel row was present.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Whether a page after this one can be requested.
    #[inline]
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.cursor.after.is_some()
    }

    /// Whether a page before this one can be requested.
    #[inline]
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.cursor.before.is_some()
    }

    /// Number of rows on this page.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the page has no rows.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consume the page, keeping only its rows.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Trim the sentinel, restore display order and derive next cursors.
///
/// `rows` is what the query returned for `limit + 1` requested rows in the
/// effective order. `encode` turns a boundary row into a token.
pub fn post_process<T, F>(
    mut rows: Vec<T>,
    limit: usize,
    side: Option<CursorDirection>,
    mut encode: F,
) -> Result<Page<T>, CursorError>
where
    F: FnMut(&T) -> Result<String, CursorError>,
{
    if rows.is_empty() {
        return Ok(Page {
            items: rows,
            cursor: Cursor::new(),
            has_more: false,
        });
    }

    let has_more = rows.len() > limit;
    if has_more {
        rows.truncate(limit);
    }

    let backward = side == Some(CursorDirection::Before);
    if backward {
        rows.reverse();
    }

    let mut cursor = Cursor::new();
    if (backward || has_more)
        && let Some(last) = rows.last()
    {
        cursor.after = Some(encode(last)?);
    }
    if (side == Some(CursorDirection::After) || (has_more && backward))
        && let Some(first) = rows.first()
    {
        cursor.before = Some(encode(first)?);
    }

    debug!(
        "keyset page: rows={} has_more={} next_after={} next_before={}",
        rows.len(),
        has_more,
        cursor.after.is_some(),
        cursor.before.is_some()
    );

    Ok(Page {
        items: rows,
        cursor,
        has_more,
    })
}
