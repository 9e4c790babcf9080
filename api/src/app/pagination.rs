//! Pagination helper
//!
//! Turns a `?page=N` query value and a post query into one page of results.
//! Malformed or out-of-range page numbers never fail: they clamp to the first
//! or last page, and an empty result still has a single empty page.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Post;
use crate::domain::feed_query::FeedQuery;
use crate::domain::ports::PostRepository;
use crate::error::DomainError;

/// Pagination query params
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    /// Kept raw so that garbage like `?page=abc` falls back to page 1
    pub page: Option<String>,
}

/// One page of items plus enough metadata to render navigation
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number
    pub number: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Number of pages needed for `total_items`, never less than one
pub fn total_pages(total_items: u64, per_page: u64) -> u64 {
    let per_page = per_page.max(1);
    total_items.div_ceil(per_page).max(1)
}

/// Resolve the requested page number against the available pages
pub fn resolve_page_number(raw: Option<&str>, total_pages: u64) -> u64 {
    let requested = raw
        .and_then(|p| p.trim().parse::<i64>().ok())
        .unwrap_or(1);

    if requested < 1 {
        1
    } else {
        (requested as u64).min(total_pages.max(1))
    }
}

/// Fetch one page of posts matching `query`
pub async fn paginate<R>(
    posts: &R,
    query: &FeedQuery,
    raw_page: Option<&str>,
    per_page: u64,
) -> Result<Page<Post>, DomainError>
where
    R: PostRepository + ?Sized,
{
    let per_page = per_page.max(1);
    let total_items = posts.count(query).await?;
    let total_pages = total_pages(total_items, per_page);
    let number = resolve_page_number(raw_page, total_pages);

    let items = if total_items == 0 {
        Vec::new()
    } else {
        posts
            .find(query, Some(per_page), (number - 1) * per_page)
            .await?
    };

    Ok(Page {
        items,
        number,
        per_page,
        total_items,
        total_pages,
    })
}
