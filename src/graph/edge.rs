//! Labeled edges between graph entities

use serde::{Deserialize, Serialize};

/// The fixed relation vocabulary. Each edge type carries exactly one of
/// these labels; consumers rely on the strings staying stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// event → participant
    PerformedBy,
    /// participant → instrument
    Plays,
    /// event → city
    LocatedIn,
    /// event → location (only when full-location nodes are enabled)
    AtLocation,
    /// event → event_type
    HasType,
    /// event → cycle
    PartOfCycle,
    /// event → piece
    IncludesPiece,
    /// piece → composer
    ComposedBy,
    /// piece → premiere_type
    HasPremiereType,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PerformedBy => "performed_by",
            Self::Plays => "plays",
            Self::LocatedIn => "located_in",
            Self::AtLocation => "at_location",
            Self::HasType => "has_type",
            Self::PartOfCycle => "part_of_cycle",
            Self::IncludesPiece => "includes_piece",
            Self::ComposedBy => "composed_by",
            Self::HasPremiereType => "has_premiere_type",
        }
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed, labeled edge between two node ids.
///
/// Edges are appended per traversal and intentionally not deduplicated:
/// a participant appearing in two events yields two `performed_by` edges,
/// one per event node. Node dedup is the builder's job; edge multiplicity
/// carries information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub label: Relation,
}

impl GraphEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, label: Relation) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            label,
        }
    }
}
