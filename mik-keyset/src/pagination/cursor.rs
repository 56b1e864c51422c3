//! The `After`/`Before` token pair used both as pagination input and output.

use crate::builder::CursorDirection;

/// A pair of optional opaque cursor tokens.
///
/// As input, at most one side is active per call: if both are set, `after`
/// wins and `before` is ignored. As output it describes which neighbouring
/// pages exist and how to reach them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct Cursor {
    /// Token for fetching the rows after a page.
    pub after: Option<String>,
    /// Token for fetching the rows before a page.
    pub before: Option<String>,
}

impl Cursor {
    /// Create a cursor with neither side set (first page).
    pub const fn new() -> Self {
        Self {
            after: None,
            before: None,
        }
    }

    /// Set the `after` token.
    pub fn with_after(mut self, token: impl Into<String>) -> Self {
        self.after = Some(token.into());
        self
    }

    /// Set the `before` token.
    pub fn with_before(mut self, token: impl Into<String>) -> Self {
        self.before = Some(token.into());
        self
    }

    /// The side driving pagination and its token, if any.
    ///
    /// A present token counts as active even when it is empty.
    #[must_use]
    pub fn active(&self) -> Option<(CursorDirection, &str)> {
        match (&self.after, &self.before) {
            (Some(after), _) => Some((CursorDirection::After, after.as_str())),
            (None, Some(before)) => Some((CursorDirection::Before, before.as_str())),
            (None, None) => None,
        }
    }

    /// Returns `true` when both sides are set.
    #[inline]
    #[must_use]
    pub const fn is_ambiguous(&self) -> bool {
        self.after.is_some() && self.before.is_some()
    }

    /// Returns `true` when neither side is set.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.after.is_none() && self.before.is_none()
    }
}
