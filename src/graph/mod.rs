//! Core graph data structures and the build pass

mod builder;
mod edge;
mod id;
mod node;

pub use builder::{BuildOptions, GraphBuilder, GraphData};
pub use edge::{GraphEdge, Relation};
pub use id::hash_id;
pub use node::{GraphNode, NodeKind};
