//! Lazy list cursor
//!
//! A [`ListCursor`] is a forward-only, non-restartable sequence over a
//! paginated list endpoint. Nothing is requested until the first item is
//! pulled, and pages are fetched one at a time as the buffer drains.

use super::types::{page_size, CursorPaginator, ListPage, PaginationState};
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::types::{JsonValue, QueryPairs};
use futures::stream::{self, Stream};
use std::collections::VecDeque;
use tracing::debug;

/// Cursor over a Stripe list endpoint
#[derive(Debug)]
pub struct ListCursor {
    client: HttpClient,
    path: String,
    query: QueryPairs,
    limit: Option<u64>,
    paginator: CursorPaginator,
    state: PaginationState,
    buffer: VecDeque<JsonValue>,
}

impl ListCursor {
    /// Cursor over `path` with extra query pairs and an optional row limit
    pub fn new(
        client: HttpClient,
        path: impl Into<String>,
        query: QueryPairs,
        limit: Option<u64>,
    ) -> Self {
        Self {
            client,
            path: path.into(),
            query,
            limit,
            paginator: CursorPaginator,
            state: PaginationState::new(),
            buffer: VecDeque::new(),
        }
    }

    /// Pagination progress
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Whether the cursor is exhausted
    pub fn is_done(&self) -> bool {
        self.limit_reached() || (self.state.done && self.buffer.is_empty())
    }

    fn limit_reached(&self) -> bool {
        self.limit.is_some_and(|limit| self.state.emitted >= limit)
    }

    /// Pull the next item, fetching a page when the buffer is empty
    ///
    /// After an error the cursor reports exhaustion.
    pub async fn next(&mut self) -> Result<Option<JsonValue>> {
        loop {
            if self.limit_reached() {
                self.state.mark_done();
                self.buffer.clear();
                return Ok(None);
            }
            if let Some(item) = self.buffer.pop_front() {
                self.state.emitted += 1;
                return Ok(Some(item));
            }
            if self.state.done {
                return Ok(None);
            }
            if let Err(e) = self.fetch_page().await {
                self.state.mark_done();
                return Err(e);
            }
        }
    }

    async fn fetch_page(&mut self) -> Result<()> {
        let mut request = RequestConfig::new()
            .query("limit", page_size(self.limit).to_string())
            .query_pairs(self.query.clone());
        if let Some(cursor) = &self.state.cursor {
            request = request.query(CursorPaginator::CURSOR_PARAM, cursor.as_str());
        }

        debug!(
            path = %self.path,
            page = self.state.pages + 1,
            cursor = ?self.state.cursor,
            "Fetching list page"
        );
        let page: ListPage = self.client.get_json(&self.path, request).await?;
        let next = self.paginator.process_page(&page, &mut self.state);
        debug!(
            path = %self.path,
            items = page.data.len(),
            more = next.is_continue(),
            "Fetched list page"
        );

        self.buffer.extend(page.data);
        Ok(())
    }

    /// Collect every remaining item
    pub async fn collect_all(mut self) -> Result<Vec<JsonValue>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Turn the cursor into a stream that ends after the first error
    pub fn into_stream(self) -> impl Stream<Item = Result<JsonValue>> + Send + 'static {
        stream::try_unfold(self, |mut cursor| async move {
            Ok(cursor.next().await?.map(|item| (item, cursor)))
        })
    }
}

