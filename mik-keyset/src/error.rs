//! Error types for pagination and configuration.

use std::convert::Infallible;

use thiserror::Error;

use crate::pagination::CursorError;

/// Errors returned by [`Paginator`](crate::Paginator).
///
/// `E` is the query collaborator's own error type, carried unchanged in
/// [`Error::Query`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error<E = Infallible> {
    /// Decoding the active cursor, or encoding a next cursor, failed.
    #[error(transparent)]
    Cursor(#[from] CursorError),
    /// A resolved key column is not a safe SQL identifier.
    #[error("invalid key column '{0}': must be an identifier, optionally table-qualified")]
    InvalidColumn(String),
    /// The query collaborator failed to execute.
    #[error("query execution failed")]
    Query(#[source] E),
}

impl<E> Error<E> {
    /// The collaborator error, if this is a query failure.
    #[inline]
    pub const fn query(&self) -> Option<&E> {
        match self {
            Self::Query(e) => Some(e),
            _ => None,
        }
    }

    /// Consume into the collaborator error, if this is a query failure.
    #[inline]
    pub fn into_query(self) -> Option<E> {
        match self {
            Self::Query(e) => Some(e),
            _ => None,
        }
    }

    /// Returns `true` if the cursor token or codec caused the failure.
    #[inline]
    #[must_use]
    pub const fn is_cursor_error(&self) -> bool {
        matches!(self, Self::Cursor(_))
    }
}

impl Error<Infallible> {
    /// Reinterpret a planning error under any collaborator error type.
    pub fn widen<E>(self) -> Error<E> {
        match self {
            Self::Cursor(e) => Error::Cursor(e),
            Self::InvalidColumn(c) => Error::InvalidColumn(c),
            Self::Query(never) => match never {},
        }
    }
}

/// Errors from loading or validating a [`PaginatorConfig`](crate::PaginatorConfig).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("invalid paginator config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is out of range.
    #[error("invalid paginator config: {0}")]
    Invalid(String),
}
