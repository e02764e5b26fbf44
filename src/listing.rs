//! Paginated listing of organizations and repositories
//!
//! A listing is all-or-nothing: if any page still fails after its retries,
//! the pages already fetched are dropped and a [`ListingError`] is returned.

use crate::constants::github::{MAX_PAGES, PAGE_SIZE};
use crate::error::ListingError;
use crate::github::{GitHubApi, Organization, Page, Repository};
use crate::retry::RetryPolicy;
use anyhow::Result;
use std::future::Future;

/// Page size, page ceiling and retry policy of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    pub page_size: u32,
    pub max_pages: u32,
    pub retry: RetryPolicy,
}

impl ListOptions {
    /// Page size actually requested; GitHub serves at most [`PAGE_SIZE`]
    pub fn effective_page_size(&self) -> u32 {
        self.page_size.clamp(1, PAGE_SIZE)
    }
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            max_pages: MAX_PAGES,
            retry: RetryPolicy::default(),
        }
    }
}

/// Fetch pages 1, 2, ... and concatenate them in server order
///
/// Stops after a short page or a page without a next link; fails once
/// `max_pages` pages have been read and the server still offers more.
pub async fn fetch_all_pages<T, F, Fut>(
    what: &str,
    options: &ListOptions,
    mut fetch: F,
) -> Result<Vec<T>, ListingError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let page_size = options.effective_page_size() as usize;
    let mut items = Vec::new();

    for page in 1..=options.max_pages {
        let Page {
            items: batch,
            has_next,
        } = options
            .retry
            .run(what, || fetch(page))
            .await
            .map_err(|cause| ListingError::Request {
                what: what.to_string(),
                page,
                cause,
            })?;

        let count = batch.len();
        tracing::debug!(what, page, count, has_next, "fetched page");
        items.extend(batch);

        if !has_next || count < page_size {
            return Ok(items);
        }
    }

    Err(ListingError::PageLimit {
        what: what.to_string(),
        max_pages: options.max_pages,
    })
}

/// Every organization the session's identity belongs to
pub async fn list_organizations<A: GitHubApi + ?Sized>(
    api: &A,
    options: &ListOptions,
) -> Result<Vec<Organization>, ListingError> {
    let page_size = options.effective_page_size();
    fetch_all_pages("organizations", options, |page| {
        api.organizations_page(page, page_size)
    })
    .await
}

/// Every repository of an organization
pub async fn list_repositories<A: GitHubApi + ?Sized>(
    api: &A,
    org: &str,
    options: &ListOptions,
) -> Result<Vec<Repository>, ListingError> {
    let page_size = options.effective_page_size();
    fetch_all_pages(&format!("repositories of {}", org), options, |page| {
        api.repositories_page(org, page, page_size)
    })
    .await
}
