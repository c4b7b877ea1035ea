//! Page-index pagination over list queries.

use std::future::Future;

use futures::{Stream, TryStreamExt, stream};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Tracing target for pagination.
pub const TRACING_TARGET: &str = "monday_core::pagination";

/// Default number of entries requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Default upper bound on the number of pages walked.
pub const DEFAULT_MAX_PAGES: u32 = 1000;

/// Walks a paged list query starting at page 1.
///
/// The walk ends at the first page shorter than the page size. Needing a
/// page beyond `max_pages` fails with [`ErrorKind::UpstreamShape`].
///
/// [`ErrorKind::UpstreamShape`]: crate::ErrorKind::UpstreamShape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWalker {
    page_size: u32,
    max_pages: u32,
}

impl Default for PageWalker {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_MAX_PAGES)
    }
}

impl PageWalker {
    /// Creates a walker; zero values are raised to one.
    pub fn new(page_size: u32, max_pages: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            max_pages: max_pages.max(1),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// Returns a lazy stream of pages.
    ///
    /// `fetch_page` is called with the 1-based page index only when the next
    /// page is polled. Each call to this method starts a fresh walk.
    pub fn pages<T, F, Fut>(&self, fetch_page: F) -> impl Stream<Item = Result<Vec<T>>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<Vec<T>>>,
    {
        let page_size = self.page_size as usize;
        let max_pages = self.max_pages;

        stream::try_unfold(
            (fetch_page, Some(1u32)),
            move |(mut fetch_page, next)| async move {
                let Some(page) = next else {
                    return Ok(None);
                };

                if page > max_pages {
                    return Err(Error::upstream_shape().with_message(format!(
                        "listing did not end within {max_pages} pages"
                    )));
                }

                let entries = fetch_page(page).await?;
                tracing::trace!(
                    target: TRACING_TARGET,
                    page,
                    entries = entries.len(),
                    "Fetched page"
                );

                let next = (entries.len() >= page_size).then_some(page + 1);
                Ok::<_, Error>(Some((entries, (fetch_page, next))))
            },
        )
    }

    /// Walks every page and concatenates the entries in page order.
    pub async fn collect<T, F, Fut>(&self, fetch_page: F) -> Result<Vec<T>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<Vec<T>>>,
    {
        let entries: Vec<T> = self.pages(fetch_page).try_concat().await?;

        tracing::debug!(
            target: TRACING_TARGET,
            entries = entries.len(),
            "Collected all pages"
        );

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use futures::StreamExt;

    use super::*;
    use crate::ErrorKind;

    fn sized_pages(
        sizes: &'static [usize],
        calls: Arc<AtomicU32>,
    ) -> impl FnMut(u32) -> std::future::Ready<Result<Vec<u32>>> {
        move |page| {
            calls.fetch_add(1, Ordering::SeqCst);
            let size = sizes.get(page as usize - 1).copied().unwrap_or(0);
            std::future::ready(Ok(vec![page; size]))
        }
    }

    #[tokio::test]
    async fn stops_at_the_first_short_page() {
        let calls = Arc::new(AtomicU32::new(0));
        let walker = PageWalker::new(100, 10);

        let entries = walker
            .collect(sized_pages(&[100, 100, 37], calls.clone()))
            .await
            .unwrap();

        assert_eq!(entries.len(), 237);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(entries[0], 1);
        assert_eq!(entries[236], 3);
    }

    #[tokio::test]
    async fn empty_first_page_ends_the_walk() {
        let calls = Arc::new(AtomicU32::new(0));
        let walker = PageWalker::new(100, 10);

        let entries = walker
            .collect(sized_pages(&[], calls.clone()))
            .await
            .unwrap();

        assert!(entries.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exceeding_the_page_cap_fails() {
        let calls = Arc::new(AtomicU32::new(0));
        let walker = PageWalker::new(2, 3);

        let error = walker
            .collect(sized_pages(&[2, 2, 2, 2], calls.clone()))
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::UpstreamShape);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn pages_are_fetched_lazily() {
        let calls = Arc::new(AtomicU32::new(0));
        let walker = PageWalker::new(1, 10);

        let pages = walker.pages(sized_pages(&[1, 1, 1], calls.clone()));
        let first: Vec<_> = pages.take(2).collect().await;

        assert_eq!(first.len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn fetch_errors_stop_the_walk() {
        let walker = PageWalker::new(1, 10);

        let error = walker
            .collect(|page| async move {
                if page == 2 {
                    Err(Error::network_error())
                } else {
                    Ok(vec![page])
                }
            })
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::NetworkError);
    }
}
