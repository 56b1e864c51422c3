//! Property tests for keyset walks over an in-memory query.
//!
//! The in-memory query evaluates the seek predicate and ORDER BY the paginator
//! hands it, so these tests check the predicate, the order flip and the
//! post-processing together.

use std::cmp::Ordering;
use std::convert::Infallible;

use mik_keyset::{
    CursorCodec, CursorError, CursorFields, Error, FilterExpr, JsonCursorCodec, LogicalOp,
    Operator, Page, Paginator, Query, SortDir, SortField, Value,
};
use proptest::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Rec {
    id: i64,
    score: i64,
}

impl CursorFields for Rec {
    fn cursor_value(&self, key: &str) -> Option<Value> {
        match key {
            "ID" => Some(Value::Int(self.id)),
            "Score" => Some(Value::Int(self.score)),
            _ => None,
        }
    }
}

fn column(rec: &Rec, field: &str) -> Value {
    match field.rsplit('.').next() {
        Some("id") => Value::Int(rec.id),
        Some("score") => Value::Int(rec.score),
        other => panic!("unknown column {other:?}"),
    }
}

fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        _ => panic!("unsupported comparison {a:?} vs {b:?}"),
    }
}

fn matches(expr: &FilterExpr, rec: &Rec) -> bool {
    match expr {
        FilterExpr::Simple(f) => {
            let ord = compare(&column(rec, &f.field), &f.value);
            match f.op {
                Operator::Eq => ord == Ordering::Equal,
                Operator::Ne => ord != Ordering::Equal,
                Operator::Gt => ord == Ordering::Greater,
                Operator::Gte => ord != Ordering::Less,
                Operator::Lt => ord == Ordering::Less,
                Operator::Lte => ord != Ordering::Greater,
            }
        },
        FilterExpr::Compound(c) => match c.op {
            LogicalOp::And => c.filters.iter().all(|e| matches(e, rec)),
            LogicalOp::Or => c.filters.iter().any(|e| matches(e, rec)),
        },
    }
}

/// Evaluates filters, sorts and limits over a fixed row set.
#[derive(Debug, Default)]
struct MemoryQuery {
    rows: Vec<Rec>,
    filters: Vec<FilterExpr>,
    sorts: Vec<SortField>,
    limit: Option<usize>,
    selects: usize,
}

impl MemoryQuery {
    fn new(rows: &[Rec]) -> Self {
        Self {
            rows: rows.to_vec(),
            ..Self::default()
        }
    }
}

impl Query for MemoryQuery {
    type Row = Rec;
    type Error = Infallible;

    fn table(&self) -> &str {
        "recs"
    }

    fn filter(&mut self, expr: FilterExpr) {
        self.filters.push(expr);
    }

    fn limit(&mut self, limit: usize) {
        self.limit = Some(limit);
    }

    fn order(&mut self, sorts: &[SortField]) {
        self.sorts.extend_from_slice(sorts);
    }

    fn select(&mut self) -> Result<Vec<Rec>, Infallible> {
        self.selects += 1;
        let mut out: Vec<Rec> = self
            .rows
            .iter()
            .filter(|r| self.filters.iter().all(|f| matches(f, r)))
            .cloned()
            .collect();
        out.sort_by(|a, b| {
            self.sorts.iter().fold(Ordering::Equal, |acc, s| {
                acc.then_with(|| {
                    let ord = compare(&column(a, &s.field), &column(b, &s.field));
                    match s.dir {
                        SortDir::Asc => ord,
                        SortDir::Desc => ord.reverse(),
                    }
                })
            })
        });
        if let Some(limit) = self.limit {
            out.truncate(limit);
        }
        Ok(out)
    }
}

const KEYS: [&str; 2] = ["Score", "ID"];

fn paginator(limit: usize, order: SortDir) -> Paginator {
    Paginator::new().keys(KEYS).limit(limit).order(order)
}

fn page(rows: &[Rec], paginator: &mut Paginator) -> Page<Rec> {
    paginator.paginate(&mut MemoryQuery::new(rows)).unwrap()
}

fn sorted(rows: &[Rec], order: SortDir) -> Vec<Rec> {
    let mut out = rows.to_vec();
    out.sort_by(|a, b| {
        let ord = a.score.cmp(&b.score).then(a.id.cmp(&b.id));
        match order {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    });
    out
}

fn walk_forward(rows: &[Rec], limit: usize, order: SortDir) -> Vec<Page<Rec>> {
    let mut pages = Vec::new();
    let mut current = paginator(limit, order);
    for _ in 0..=rows.len() + 1 {
        let page = page(rows, &mut current);
        let after = page.cursor.after.clone();
        pages.push(page);
        match after {
            Some(token) => current = paginator(limit, order).after_cursor(token),
            None => break,
        }
    }
    pages
}

fn records() -> impl Strategy<Value = Vec<Rec>> {
    prop::collection::vec(0i64..5, 0..40).prop_map(|scores| {
        scores
            .into_iter()
            .enumerate()
            .map(|(i, score)| Rec {
                id: i as i64 + 1,
                score,
            })
            .collect()
    })
}

fn direction() -> impl Strategy<Value = SortDir> {
    prop_oneof![Just(SortDir::Asc), Just(SortDir::Desc)]
}

proptest! {
    /// Following `after` cursors visits every row once, in key order.
    #[test]
    fn forward_walk_has_no_gaps_or_overlap(
        rows in records(),
        limit in 1usize..8,
        order in direction(),
    ) {
        let pages = walk_forward(&rows, limit, order);
        let seen: Vec<Rec> = pages.iter().flat_map(|p| p.items.clone()).collect();

        prop_assert_eq!(seen, sorted(&rows, order));
        for p in &pages {
            prop_assert!(p.len() <= limit);
        }
    }

    /// The first page reports more rows exactly when they exist.
    #[test]
    fn first_page_has_more_iff_rows_remain(
        rows in records(),
        limit in 1usize..8,
        order in direction(),
    ) {
        let first = page(&rows, &mut paginator(limit, order));

        prop_assert_eq!(first.has_more, rows.len() > limit);
        prop_assert_eq!(first.has_next(), rows.len() > limit);
        prop_assert!(!first.has_prev());
        prop_assert_eq!(first.len(), rows.len().min(limit));
    }

    /// Following `before` cursors from the last page retraces the forward walk.
    #[test]
    fn backward_walk_retraces_forward_pages(
        rows in records(),
        limit in 1usize..8,
        order in direction(),
    ) {
        let forward = walk_forward(&rows, limit, order);
        let Some(last) = forward.last() else {
            return Ok(());
        };

        let mut backward = vec![last.items.clone()];
        let mut before = last.cursor.before.clone();
        while let Some(token) = before {
            let p = page(&rows, &mut paginator(limit, order).before_cursor(token));
            before = p.cursor.before.clone();
            backward.push(p.items);
            prop_assert!(backward.len() <= forward.len());
        }
        backward.reverse();

        let expected: Vec<Vec<Rec>> = forward.iter().map(|p| p.items.clone()).collect();
        prop_assert_eq!(backward, expected);
    }

    /// A token written from a row seeks from that row's key values.
    #[test]
    fn tokens_carry_key_values(id in -(1i64 << 53)..(1i64 << 53), score in any::<i32>()) {
        let keys: Vec<String> = KEYS.iter().map(|k| (*k).to_string()).collect();
        let token = JsonCursorCodec.encode(&Rec { id, score: i64::from(score) }, &keys).unwrap();

        prop_assert_eq!(
            JsonCursorCodec.decode(&token, &keys).unwrap(),
            vec![Value::Int(i64::from(score)), Value::Int(id)]
        );
    }

    /// Arbitrary tokens either decode or fail with an error, never a panic.
    #[test]
    fn arbitrary_tokens_never_panic(token in "[A-Za-z0-9_-]{0,64}") {
        let p = paginator(3, SortDir::Asc).after_cursor(token);
        let _ = p.plan("recs");
    }
}

#[test]
fn decode_failure_never_selects() {
    let rows = [Rec { id: 1, score: 1 }];
    let mut query = MemoryQuery::new(&rows);
    let mut p = paginator(2, SortDir::Asc).before_cursor("@@@");

    let err = p.paginate(&mut query).unwrap_err();

    assert!(matches!(err, Error::Cursor(CursorError::InvalidBase64)));
    assert_eq!(query.selects, 0);
    assert!(p.next_cursor().is_empty());
}

#[test]
fn wrong_arity_token_is_rejected() {
    let token = JsonCursorCodec.encode_values(&[Value::Int(1)]).unwrap();
    let mut query = MemoryQuery::new(&[]);
    let mut p = paginator(2, SortDir::Asc).after_cursor(token);

    let err = p.paginate(&mut query).unwrap_err();

    assert!(matches!(
        err,
        Error::Cursor(CursorError::ArityMismatch {
            expected: 2,
            found: 1
        })
    ));
    assert_eq!(query.selects, 0);
}

#[test]
fn empty_token_starts_from_the_edge() {
    let rows: Vec<Rec> = (1..=5).map(|id| Rec { id, score: 0 }).collect();

    // An empty before token still scans backward from the far end
    let p = page(&rows, &mut paginator(2, SortDir::Asc).before_cursor(""));

    let ids: Vec<i64> = p.items.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![4, 5]);
    assert!(p.has_more);
    assert!(p.cursor.before.is_some());
    assert!(p.cursor.after.is_some());
}

#[test]
fn query_errors_are_carried_unchanged() {
    #[derive(Debug)]
    struct Failing;

    impl Query for Failing {
        type Row = Rec;
        type Error = String;

        fn table(&self) -> &str {
            "recs"
        }
        fn filter(&mut self, _: FilterExpr) {}
        fn limit(&mut self, _: usize) {}
        fn order(&mut self, _: &[SortField]) {}
        fn select(&mut self) -> Result<Vec<Rec>, String> {
            Err("connection reset".to_string())
        }
    }

    let err = Paginator::new().paginate(&mut Failing).unwrap_err();

    assert_eq!(err.query().map(String::as_str), Some("connection reset"));
    assert_eq!(err.into_query().as_deref(), Some("connection reset"));
}
