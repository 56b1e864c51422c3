//! The pagination orchestrator.

use std::convert::Infallible;

use log::{debug, trace, warn};

use crate::builder::{CursorDirection, FilterExpr, SortDir, SortField};
use crate::config::PaginatorConfig;
use crate::error::Error;
use crate::pagination::{
    Cursor, CursorCodec, CursorError, CursorFields, JsonCursorCodec, KeysetCondition, Page,
    build_order, post_process,
};
use crate::query::Query;
use crate::validate::first_invalid_column;

/// Options after defaults have been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    /// Model-level keys, never empty.
    pub keys: Vec<String>,
    /// Page size, always positive.
    pub limit: usize,
    /// Display direction.
    pub order: SortDir,
}

/// Everything a query needs for one page, computed before execution.
///
/// Use this directly when the query runs somewhere the [`Query`] trait cannot
/// reach (an async driver, a remote service), then hand the rows to
/// [`Paginator::finish`].
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    /// Seek predicate; `None` on the first page.
    pub filter: Option<FilterExpr>,
    /// ORDER BY fields in the effective scan direction.
    pub sorts: Vec<SortField>,
    /// Rows to request: the page size plus the sentinel row.
    pub fetch_limit: usize,
    /// Active cursor side, if any.
    pub side: Option<CursorDirection>,
    /// Resolved options the plan was built from.
    pub options: ResolvedOptions,
}

/// Keyset paginator.
///
/// One instance serves one pagination request at a time; give each
/// concurrent request its own paginator.
///
/// ```
/// use mik_keyset::{Paginator, SortDir};
///
/// let paginator = Paginator::new()
///     .keys(["CreatedAt", "ID"])
///     .limit(20)
///     .order(SortDir::Desc);
///
/// let plan = paginator.plan("posts").unwrap();
/// assert!(plan.filter.is_none());
/// assert_eq!(plan.fetch_limit, 21);
/// assert_eq!(mik_keyset::order_clause(&plan.sorts), "posts.created_at DESC, posts.id DESC");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Paginator<C = JsonCursorCodec> {
    config: PaginatorConfig,
    codec: C,
    cursor: Cursor,
    keys: Vec<String>,
    limit: Option<usize>,
    order: Option<SortDir>,
    next: Cursor,
}

impl Paginator {
    /// Create a paginator with default configuration and the JSON codec.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paginator with explicit configuration and the JSON codec.
    #[must_use]
    pub fn with_config(config: PaginatorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }
}

impl<C: CursorCodec> Paginator<C> {
    /// Swap the cursor codec, keeping every other setting.
    pub fn with_codec<C2: CursorCodec>(self, codec: C2) -> Paginator<C2> {
        Paginator {
            config: self.config,
            codec,
            cursor: self.cursor,
            keys: self.keys,
            limit: self.limit,
            order: self.order,
            next: self.next,
        }
    }

    /// Append sort keys (model field names). Order defines tie-break precedence.
    pub fn keys<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.set_keys(keys);
        self
    }

    /// Set the page size. `0` means "use the default".
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the display direction.
    pub fn order(mut self, order: SortDir) -> Self {
        self.order = Some(order);
        self
    }

    /// Page forward from `token`.
    pub fn after_cursor(mut self, token: impl Into<String>) -> Self {
        self.set_after_cursor(token);
        self
    }

    /// Page backward from `token`.
    pub fn before_cursor(mut self, token: impl Into<String>) -> Self {
        self.set_before_cursor(token);
        self
    }

    /// Replace both cursor tokens, e.g. with a [`Page`]'s next cursor.
    pub fn cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = cursor;
        self
    }

    /// Append sort keys in place.
    pub fn set_keys<I, K>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.keys.extend(keys.into_iter().map(Into::into));
    }

    /// Set the page size in place.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = Some(limit);
    }

    /// Set the display direction in place.
    pub fn set_order(&mut self, order: SortDir) {
        self.order = Some(order);
    }

    /// Set the `after` token in place.
    pub fn set_after_cursor(&mut self, token: impl Into<String>) {
        self.cursor.after = Some(token.into());
    }

    /// Set the `before` token in place.
    pub fn set_before_cursor(&mut self, token: impl Into<String>) {
        self.cursor.before = Some(token.into());
    }

    /// Cursors produced by the last successful [`paginate`](Self::paginate)
    /// or [`finish`](Self::finish).
    pub const fn next_cursor(&self) -> &Cursor {
        &self.next
    }

    /// The configuration this paginator was built with.
    pub const fn config(&self) -> &PaginatorConfig {
        &self.config
    }

    /// Apply configured defaults to unset options.
    pub fn resolve_options(&self) -> ResolvedOptions {
        let keys = if self.keys.is_empty() {
            vec![self.config.default_key.clone()]
        } else {
            self.keys.clone()
        };

        let mut limit = match self.limit {
            Some(0) | None => self.config.default_limit,
            Some(limit) => limit,
        };
        if let Some(max) = self.config.max_limit
            && limit > max
        {
            warn!("keyset limit {limit} exceeds max_limit {max}, clamping");
            limit = max;
        }

        ResolvedOptions {
            keys,
            limit,
            order: self.order.unwrap_or(self.config.default_order),
        }
    }

    /// Build the predicate, order and fetch size for `table` without executing.
    pub fn plan(&self, table: &str) -> Result<PagePlan, Error> {
        let options = self.resolve_options();

        if self.cursor.is_ambiguous() {
            warn!("both after and before cursors set; using after");
        }
        let active = self.cursor.active();
        let side = active.map(|(side, _)| side);

        let columns: Vec<String> = options
            .keys
            .iter()
            .map(|key| self.config.column_naming.qualified(table, key))
            .collect();
        if let Some(column) = first_invalid_column(&columns) {
            return Err(Error::InvalidColumn(column.to_string()));
        }

        let filter = match active {
            Some((side, token)) => {
                let values = self.codec.decode(token, &options.keys)?;
                if !token.is_empty() && values.len() != columns.len() {
                    return Err(CursorError::ArityMismatch {
                        expected: columns.len(),
                        found: values.len(),
                    }
                    .into());
                }
                KeysetCondition::new(&columns, values, side, options.order)
                    .map(|cond| cond.to_filter_expr())
            },
            None => None,
        };

        debug!(
            "keyset plan: table={table} keys={:?} limit={} order={} side={side:?} seek={}",
            options.keys,
            options.limit,
            options.order,
            filter.is_some()
        );
        if let Some(expr) = &filter {
            trace!("keyset predicate columns: {:?}", expr.columns());
        }

        Ok(PagePlan {
            filter,
            sorts: build_order(&columns, options.order, side),
            fetch_limit: options.limit.saturating_add(1),
            side,
            options,
        })
    }

    /// Reshape rows fetched for `plan` into a page and record its next cursor.
    pub fn finish<T: CursorFields>(
        &mut self,
        plan: &PagePlan,
        rows: Vec<T>,
    ) -> Result<Page<T>, Error> {
        self.next = Cursor::new();
        let keys = &plan.options.keys;
        let codec = &self.codec;
        let page = post_process(rows, plan.options.limit, plan.side, |row| {
            codec.encode(row, keys)
        })?;
        self.next = page.cursor.clone();
        Ok(page)
    }

    /// Append the seek predicate, order and limit to `query`, execute it and
    /// reshape the result.
    ///
    /// A collaborator failure is returned as [`Error::Query`] unchanged.
    pub fn paginate<Q>(&mut self, query: &mut Q) -> Result<Page<Q::Row>, Error<Q::Error>>
    where
        Q: Query,
        Q::Row: CursorFields,
    {
        self.next = Cursor::new();
        let plan = self.plan(query.table()).map_err(Error::<Infallible>::widen)?;

        if let Some(expr) = &plan.filter {
            query.filter(expr.clone());
        }
        query.limit(plan.fetch_limit);
        query.order(&plan.sorts);

        let rows = query.select().map_err(Error::Query)?;
        self.finish(&plan, rows).map_err(Error::<Infallible>::widen)
    }
}
