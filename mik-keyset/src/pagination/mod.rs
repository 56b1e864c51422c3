//! Keyset pagination: seek predicates, order flipping and page reshaping.
//!
//! # How a page is fetched
//!
//! | Step | Component | Output |
//! |------|-----------|--------|
//! | 1 | codec | decoded key values of the active cursor |
//! | 2 | [`KeysetCondition`] | `(k1 OP v1) OR (k1 = v1 AND k2 OP v2) ...` |
//! | 3 | order builder | `k1 DIR, k2 DIR`, flipped when paging backward |
//! | 4 | query | `limit + 1` rows in that order |
//! | 5 | [`post_process`] | trimmed, display-ordered rows plus next cursors |
//!
//! The extra row is the over-fetch sentinel: its presence means another page
//! exists in the scan direction, without a second query.

mod codec;
mod cursor;
mod keyset;
mod order;
mod page;
mod value_conv;

// Re-export all public items
pub use codec::{CursorCodec, CursorError, CursorFields, JsonCursorCodec};
pub use cursor::Cursor;
pub use keyset::{KeysetCondition, seek_operator};
pub use order::{build_order, effective_order};
pub use page::{Page, post_process};
