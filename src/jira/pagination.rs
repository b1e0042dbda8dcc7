use crate::error::TaskyError;
use serde::Deserialize;
use std::future::Future;
use tracing::debug;

pub const DEFAULT_PAGE_SIZE: u64 = 50;
/// Jira silently caps `maxResults` at 100 for project and issue search
pub const MAX_PAGE_SIZE: u64 = 100;

/// Position of the next page to request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub start_at: u64,
    pub max_results: u64,
}

/// One decoded result page, independent of how the endpoint names its items
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub max_results: Option<u64>,
    pub total: Option<u64>,
    pub is_last: Option<bool>,
}

/// `GET /project/search` and friends
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBean<T> {
    pub max_results: Option<u64>,
    pub total: Option<u64>,
    pub is_last: Option<bool>,
    pub next_page: Option<String>,
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
}

/// `GET /search`, which names its items `issues` and has no `isLast`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults<T> {
    pub max_results: Option<u64>,
    pub total: Option<u64>,
    #[serde(default = "Vec::new")]
    pub issues: Vec<T>,
}

impl Cursor {
    pub fn new(page_size: u64) -> Self {
        Self {
            start_at: 0,
            max_results: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Moves past the items of `page`, whatever offset the server echoed back
    pub fn advance<T>(&mut self, page: &Page<T>) {
        self.start_at += page.items.len() as u64;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<T> Page<T> {
    /// Whether no further page should be requested after the one fetched at `cursor`
    pub fn is_final(&self, cursor: Cursor) -> bool {
        if self.is_last == Some(true) || self.items.is_empty() {
            return true;
        }

        let page_size = self
            .max_results
            .filter(|&server| server > 0)
            .map_or(cursor.max_results, |server| server.min(cursor.max_results));
        if (self.items.len() as u64) < page_size {
            return true;
        }

        matches!(self.total, Some(total) if cursor.start_at + self.items.len() as u64 >= total)
    }
}

impl<T> From<PageBean<T>> for Page<T> {
    fn from(bean: PageBean<T>) -> Self {
        // Older servers omit `isLast` but only send `nextPage` when there is one
        let is_last = bean.is_last.or(Some(bean.next_page.is_none()));

        Self {
            items: bean.values,
            max_results: bean.max_results,
            total: bean.total,
            is_last,
        }
    }
}

impl<T> From<SearchResults<T>> for Page<T> {
    fn from(results: SearchResults<T>) -> Self {
        Self {
            items: results.issues,
            max_results: results.max_results,
            total: results.total,
            is_last: None,
        }
    }
}

/// Requests pages until one is final and concatenates their items in server order.
/// The first failing request aborts the whole collection.
pub async fn collect_pages<T, F, Fut>(mut cursor: Cursor, mut fetch: F) -> Result<Vec<T>, TaskyError>
where
    F: FnMut(Cursor) -> Fut,
    Fut: Future<Output = Result<Page<T>, TaskyError>>,
{
    let mut items = Vec::new();

    loop {
        debug!(
            "Fetching page at {} (max {})",
            cursor.start_at, cursor.max_results
        );
        let mut page = fetch(cursor).await?;
        let done = page.is_final(cursor);

        cursor.advance(&page);
        items.append(&mut page.items);

        if done {
            debug!("Got {} items in total", items.len());
            return Ok(items);
        }
    }
}
