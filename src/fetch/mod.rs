//! Paginated fetching against the upstream catalog
//!
//! The page loop is separated from the HTTP client behind the [`PageFetcher`]
//! seam so the pipeline can be driven by anything that yields pages — the
//! real catalog, a recorded archive, or a test fake.

mod client;

pub use client::{CatalogClient, EventFilter, DEFAULT_API_BASE};

use crate::model::{EventsPage, RawEvent};
use async_trait::async_trait;
use thiserror::Error;

/// Upstream page size ceiling.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Errors talking to the upstream catalog. These are the only failures the
/// engine can produce; all transforms over fetched data are total.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("malformed upstream payload: {0}")]
    Payload(String),
}

/// A source of event pages. Pages are numbered from 1.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<EventsPage, FetchError>;
}

/// A full catalog source: event pages plus the parameters endpoint.
#[async_trait]
pub trait Catalog: PageFetcher {
    /// Raw JSON from the upstream parameters endpoint, in whichever shape
    /// the upstream speaks (see [`crate::facets::FacetTable::from_upstream`]).
    async fn get_params(&self) -> Result<serde_json::Value, FetchError>;
}

/// Fetch pages in order and merge them, up to `cap` events.
///
/// Stops when a page comes back short (end of data) or the cap is reached;
/// the result is truncated to exactly `cap`. A failing page propagates —
/// no silent partial result. Pages must be fetched in increasing order
/// because the short page is the termination signal.
pub async fn fetch_all_paged<F>(fetcher: &F, cap: usize) -> Result<Vec<RawEvent>, FetchError>
where
    F: PageFetcher + ?Sized,
{
    let mut events = Vec::new();
    if cap == 0 {
        return Ok(events);
    }

    let per_page = MAX_PAGE_SIZE.min(cap.min(u32::MAX as usize) as u32);
    let mut page = 1u32;
    loop {
        let batch = fetcher.fetch_page(page, per_page).await?;
        let got = batch.events.len();
        tracing::debug!(page, got, total = events.len() + got, "fetched page");
        events.extend(batch.events);

        if got < per_page as usize || events.len() >= cap {
            break;
        }
        page += 1;
    }

    events.truncate(cap);
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fake fetcher backed by a fixed event count, handing out full pages
    /// until the pool runs dry.
    struct PoolFetcher {
        total: usize,
        calls: AtomicU32,
    }

    impl PoolFetcher {
        fn new(total: usize) -> Self {
            Self {
                total,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl PageFetcher for PoolFetcher {
        async fn fetch_page(&self, page: u32, per_page: u32) -> Result<EventsPage, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let offset = (page as usize - 1) * per_page as usize;
            let remaining = self.total.saturating_sub(offset);
            let count = remaining.min(per_page as usize);
            let events = (0..count)
                .map(|i| RawEvent {
                    id: Some((offset + i) as i64 + 1),
                    name: Some(format!("Evento {}", offset + i + 1)),
                    ..Default::default()
                })
                .collect();
            Ok(EventsPage {
                events,
                pagination: None,
            })
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl PageFetcher for FailingFetcher {
        async fn fetch_page(&self, _: u32, _: u32) -> Result<EventsPage, FetchError> {
            Err(FetchError::Status(503))
        }
    }

    #[tokio::test]
    async fn cap_truncates_and_stops_early() {
        // Upstream holds 160 events; cap 150 means two full pages of 100
        // then truncation, not a third request.
        let fetcher = PoolFetcher::new(160);
        let events = fetch_all_paged(&fetcher, 150).await.unwrap();
        assert_eq!(events.len(), 150);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn short_page_terminates() {
        let fetcher = PoolFetcher::new(160);
        let events = fetch_all_paged(&fetcher, 1000).await.unwrap();
        assert_eq!(events.len(), 160);
        // 100 + 60; the short second page ends the loop.
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn small_cap_shrinks_page_size() {
        let fetcher = PoolFetcher::new(500);
        let events = fetch_all_paged(&fetcher, 30).await.unwrap();
        assert_eq!(events.len(), 30);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_cap_fetches_nothing() {
        let fetcher = PoolFetcher::new(10);
        let events = fetch_all_paged(&fetcher, 0).await.unwrap();
        assert!(events.is_empty());
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failure_propagates_without_partial_result() {
        let err = fetch_all_paged(&FailingFetcher, 100).await.unwrap_err();
        assert!(matches!(err, FetchError::Status(503)));
    }

    #[tokio::test]
    async fn exact_multiple_of_page_size_needs_trailing_empty_page() {
        // 200 events with cap 300: two full pages, then the cap is not yet
        // reached so a third (empty) page confirms the end.
        let fetcher = PoolFetcher::new(200);
        let events = fetch_all_paged(&fetcher, 300).await.unwrap();
        assert_eq!(events.len(), 200);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 3);
    }
}
