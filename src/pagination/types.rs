//! Pagination types
//!
//! Stripe list endpoints return `{"object": "list", "data": [...], "has_more": bool}`
//! and page forward with `starting_after=<id of the last item>`.

use crate::types::JsonValue;
use serde::Deserialize;

/// Largest page Stripe serves
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size for a query with an optional row limit
///
/// `min(limit, 100)`, or 100 without a limit.
pub fn page_size(limit: Option<u64>) -> u32 {
    match limit {
        Some(limit) => limit.min(u64::from(MAX_PAGE_SIZE)) as u32,
        None => MAX_PAGE_SIZE,
    }
}

/// One page of a list response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPage {
    /// Always `"list"`
    #[serde(default)]
    pub object: String,
    /// Items on this page
    #[serde(default)]
    pub data: Vec<JsonValue>,
    /// Whether another page follows
    #[serde(default)]
    pub has_more: bool,
    /// Endpoint the page came from
    #[serde(default)]
    pub url: Option<String>,
}

impl ListPage {
    /// Id of the last item, used as the next cursor
    pub fn last_id(&self) -> Option<&str> {
        self.data.last()?.get("id")?.as_str()
    }
}

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Fetch again with `starting_after`
    Continue {
        /// Cursor for the next request
        starting_after: String,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Pages fetched so far
    pub pages: u32,
    /// Current cursor value
    pub cursor: Option<String>,
    /// Total records fetched so far
    pub total_fetched: u64,
    /// Records handed to the consumer
    pub emitted: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Set cursor
    pub fn set_cursor(&mut self, cursor: String) {
        self.cursor = Some(cursor);
    }

    /// Add to total fetched
    pub fn add_fetched(&mut self, count: u64) {
        self.total_fetched += count;
    }
}

/// `starting_after` cursor pagination
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorPaginator;

impl CursorPaginator {
    /// Cursor query parameter
    pub const CURSOR_PARAM: &'static str = "starting_after";

    /// Record a fetched page and decide whether another one follows
    ///
    /// An empty page ends pagination even when `has_more` is set.
    pub fn process_page(&self, page: &ListPage, state: &mut PaginationState) -> NextPage {
        state.pages += 1;
        state.add_fetched(page.data.len() as u64);

        if !page.has_more {
            state.mark_done();
            return NextPage::Done;
        }

        match page.last_id() {
            Some(id) if !id.is_empty() => {
                state.set_cursor(id.to_string());
                NextPage::Continue {
                    starting_after: id.to_string(),
                }
            }
            _ => {
                state.mark_done();
                NextPage::Done
            }
        }
    }
}
