//! Pipeline operations over a catalog source
//!
//! Two entry points:
//! - [`graph_query`] — one filtered fetch turned into a graph; upstream
//!   failure surfaces as a typed error for the caller to handle.
//! - [`full_ingestion`] — everything the catalog has, up to a cap, turned
//!   into a snapshot of params + events + graph; upstream failure degrades
//!   to the fixed sample dataset so the result is always schema-valid.
//!
//! The engine is stateless across invocations: each call fetches, derives,
//! and returns. Builder and aggregator both read the same immutable event
//! snapshot and run back to back.

use crate::facets::{self, FacetTable};
use crate::fetch::{fetch_all_paged, Catalog, FetchError, PageFetcher};
use crate::graph::{BuildOptions, GraphBuilder, GraphData, GraphEdge, GraphNode};
use crate::model::RawEvent;
use crate::sample;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors from pipeline operations.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("configuration error: {0}")]
    Configuration(String),
}

/// The full-ingestion result: facets, the raw events they came from, the
/// derived graph, and provenance metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub params: FacetTable,
    pub events: Vec<RawEvent>,
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphEdge>,
    /// Epoch milliseconds at snapshot assembly
    pub timestamp: i64,
    pub total_events: usize,
}

/// Run one filtered query and build a graph from the result.
///
/// The filter travels with the fetcher (see
/// [`crate::fetch::CatalogClient::with_filter`]); `cap` bounds how many
/// events are merged across pages.
pub async fn graph_query<F>(
    fetcher: &F,
    cap: usize,
    options: BuildOptions,
) -> Result<GraphData, IngestError>
where
    F: PageFetcher + ?Sized,
{
    let events = fetch_all_paged(fetcher, cap).await?;
    let graph = GraphBuilder::build(&events, options);
    tracing::info!(
        events = events.len(),
        nodes = graph.nodes.len(),
        links = graph.links.len(),
        "graph query complete"
    );
    Ok(graph)
}

/// Ingest the whole catalog (up to `cap` events) into a snapshot.
///
/// Facets are derived from the fetched events and reconciled with the
/// upstream parameters endpoint (upstream wins per non-empty facet). If the
/// event fetch fails the sample dataset takes its place — degrade, don't
/// error. A failing parameters endpoint alone only costs the upstream ids.
pub async fn full_ingestion<C>(catalog: &C, cap: usize, options: BuildOptions) -> Snapshot
where
    C: Catalog + ?Sized,
{
    let (events, params) = match fetch_all_paged(catalog, cap).await {
        Ok(events) => {
            let extracted = facets::aggregate(&events);
            let params = match catalog.get_params().await {
                Ok(raw) => FacetTable::merge(FacetTable::from_upstream(&raw), extracted),
                Err(e) => {
                    tracing::warn!(error = %e, "parameters endpoint unavailable, using extracted facets");
                    extracted
                }
            };
            (events, params)
        }
        Err(e) => {
            tracing::warn!(error = %e, "upstream unavailable, serving sample dataset");
            let events = sample::events();
            let params = facets::aggregate(&events);
            (events, params)
        }
    };

    let graph = GraphBuilder::build(&events, options);
    let total_events = events.len();
    tracing::info!(
        total_events,
        nodes = graph.nodes.len(),
        links = graph.links.len(),
        "full ingestion complete"
    );

    Snapshot {
        params,
        total_events,
        events,
        nodes: graph.nodes,
        links: graph.links,
        timestamp: chrono::Utc::now().timestamp_millis(),
    }
}

/// Load the locally bundled API documentation file for embedding into a
/// download archive. Missing or unparsable files are structured errors the
/// caller can report and continue past.
pub fn load_api_documentation(path: &Path) -> Result<serde_json::Value, IngestError> {
    if !path.exists() {
        return Err(IngestError::Configuration(
            "api documentation file not found".to_string(),
        ));
    }
    let text = std::fs::read_to_string(path)
        .map_err(|e| IngestError::Configuration(format!("unreadable api documentation: {}", e)))?;
    serde_json::from_str(&text)
        .map_err(|e| IngestError::Configuration(format!("invalid api documentation JSON: {}", e)))
}
