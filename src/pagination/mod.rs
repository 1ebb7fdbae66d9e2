//! Pagination module
//!
//! Stripe lists page forward with `starting_after`, up to 100 items per
//! page. [`ListCursor`] walks those pages lazily and stops early once a row
//! limit is reached.

mod cursor;
mod types;

pub use cursor::ListCursor;
pub use types::{page_size, CursorPaginator, ListPage, NextPage, PaginationState, MAX_PAGE_SIZE};
