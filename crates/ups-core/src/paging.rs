//! Paginated find shared by applications and variants.
//!
//! List endpoints return at most one page of `per_page` items. How much of the
//! collection `find` walks depends on the filter:
//!
//! - identifier present: direct lookup on the singular URL, 404 → empty
//! - other fields only: every page, in order, until a short page
//! - empty: the first page only
//!
//! The empty-filter case is a preview, not a full listing. Use
//! [`scan`] for an exhaustive unfiltered walk.
//!
//! Pages are independent requests, so writers running concurrently with a
//! scan can make it skip or repeat items. No isolation is attempted.

use serde::de::DeserializeOwned;

use crate::client::{UpsClient, path_segment};
use crate::error::Result;
use crate::filter::Filter;

/// One page of a list endpoint. Numbering starts at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: usize,
    pub size: usize,
}

impl Page {
    pub const FIRST: usize = 1;

    pub fn first(size: usize) -> Self {
        Self {
            number: Self::FIRST,
            size,
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self {
            number: self.number + 1,
            size: self.size,
        }
    }
}

/// Find the items of `collection` matching `filter`.
pub(crate) async fn find<T, F>(client: &UpsClient, collection: &str, filter: &F) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    F: Filter<T>,
{
    if let Some(id) = filter.identifier() {
        let id = path_segment(F::IDENTIFIER_KEY, id)?;
        let path = format!("{collection}/{id}");
        tracing::debug!("Direct lookup of {path}");
        let found: Option<T> = client.get_optional(&path).await?;
        return Ok(found.into_iter().filter(|item| filter.matches(item)).collect());
    }

    if filter.is_empty() {
        return client
            .get_page(collection, Page::first(client.page_size()))
            .await;
    }

    scan(client, collection, |item| filter.matches(item)).await
}

/// Walk every page of `collection` and keep the items accepted by `keep`.
///
/// Stops at the first page holding fewer than `page_size` items, so a
/// collection whose length is an exact multiple of the page size costs one
/// extra (empty) request.
pub(crate) async fn scan<T, P>(client: &UpsClient, collection: &str, keep: P) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    P: Fn(&T) -> bool,
{
    let mut page = Page::first(client.page_size());
    let mut matches = Vec::new();

    loop {
        let items: Vec<T> = client.get_page(collection, page).await?;
        let fetched = items.len();
        tracing::debug!("Page {} of {collection}: {fetched} items", page.number);

        matches.extend(items.into_iter().filter(|item| keep(item)));

        if fetched < page.size {
            break;
        }
        page = page.next();
    }

    Ok(matches)
}
