//! Token-based pagination bounded by an item cap.
//!
//! A [`Paginator`] asks its [`PageSource`] for pages until the source stops
//! returning a next-page token or the collected count reaches the cap. The
//! stop rule lives in [`should_fetch`] so it can be checked without I/O.

use crate::error::Result;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_page_token: Option<String>,
}

#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send;

    /// Fetches the page addressed by `page_token`, or the first page when
    /// `None`.
    async fn fetch_page(&self, page_token: Option<&str>) -> Result<Page<Self::Item>>;
}

/// Where a paginated walk currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor {
    Start,
    Next(String),
    Exhausted,
}

/// Whether another page should be requested.
pub fn should_fetch(collected: usize, cap: usize, cursor: &Cursor) -> bool {
    collected < cap && !matches!(cursor, Cursor::Exhausted)
}

pub struct Paginator<S: PageSource> {
    source: S,
    cap: usize,
    cursor: Cursor,
    collected: usize,
    pages_fetched: usize,
}

impl<S: PageSource> Paginator<S> {
    pub fn new(source: S, cap: usize) -> Self {
        Self {
            source,
            cap,
            cursor: Cursor::Start,
            collected: 0,
            pages_fetched: 0,
        }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Rewinds to the first page so the sequence can be walked again.
    pub fn restart(&mut self) {
        self.cursor = Cursor::Start;
        self.collected = 0;
        self.pages_fetched = 0;
    }

    /// Next page of items, or `None` once the cap is reached or the source
    /// has no further pages. An error leaves the cursor where it was.
    pub async fn next_page(&mut self) -> Result<Option<Vec<S::Item>>> {
        if !should_fetch(self.collected, self.cap, &self.cursor) {
            return Ok(None);
        }

        let token = match &self.cursor {
            Cursor::Next(token) => Some(token.as_str()),
            _ => None,
        };
        let page = self.source.fetch_page(token).await?;

        self.pages_fetched += 1;
        self.collected += page.items.len();
        self.cursor = match page.next_page_token {
            Some(token) if !token.is_empty() => Cursor::Next(token),
            _ => Cursor::Exhausted,
        };
        tracing::debug!(
            page = self.pages_fetched,
            collected = self.collected,
            more = !matches!(self.cursor, Cursor::Exhausted),
            "fetched page"
        );

        Ok(Some(page.items))
    }

    /// Walks the remaining pages and returns at most `cap` items. Items past
    /// the cap on the final page are dropped.
    pub async fn collect(mut self) -> Result<Vec<S::Item>> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await? {
            items.extend(page);
        }
        items.truncate(self.cap);
        Ok(items)
    }
}
