//! Cartelera: concert-catalog ingestion and graph normalization engine
//!
//! Ingests paginated concert-event records from a remote catalog API and
//! turns them into a typed entity graph (nodes + labeled edges) plus
//! deduplicated filter facets, suitable for visualization and faceted
//! browsing.
//!
//! # Core Concepts
//!
//! - **Raw events**: untrusted catalog records, validated once at the
//!   deserialization boundary
//! - **Entity graph**: deduplicated nodes keyed by deterministic ids, with a
//!   fixed relation vocabulary on the edges
//! - **Facets**: sorted, name-deduplicated value lists (composers, cities,
//!   instruments, ...) for filtering
//!
//! # Example
//!
//! ```
//! use cartelera::{BuildOptions, GraphBuilder};
//!
//! let events = cartelera::sample::events();
//! let graph = GraphBuilder::build(&events, BuildOptions::default());
//! assert!(!graph.nodes.is_empty());
//! ```

pub mod extract;
pub mod facets;
pub mod fetch;
mod graph;
pub mod ingest;
pub mod model;
pub mod sample;

pub use facets::{FacetEntry, FacetTable};
pub use fetch::{
    fetch_all_paged, Catalog, CatalogClient, EventFilter, FetchError, PageFetcher,
    DEFAULT_API_BASE,
};
pub use graph::{
    hash_id, BuildOptions, GraphBuilder, GraphData, GraphEdge, GraphNode, NodeKind, Relation,
};
pub use ingest::{full_ingestion, graph_query, IngestError, Snapshot};
pub use model::{EventsPage, Participant, Piece, RawEvent};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
