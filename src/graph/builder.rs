//! Single-pass graph construction from raw events

use super::edge::{GraphEdge, Relation};
use super::id::hash_id;
use super::node::{GraphNode, NodeKind};
use crate::extract;
use crate::model::RawEvent;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Configuration toggles for graph construction.
///
/// Two deployed variants of this pipeline disagreed on two points; both are
/// reachable here instead of forking the code path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Also emit a node for the raw location string, in addition to the
    /// derived city node. Default off (city only) — this is a product
    /// decision, see DESIGN.md.
    pub emit_location_nodes: bool,
    /// Key event nodes by the upstream id when one is present, falling back
    /// to the name hash. When off, always use the name hash.
    pub prefer_upstream_ids: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            emit_location_nodes: false,
            prefer_upstream_ids: true,
        }
    }
}

/// The node/edge set produced by a build pass.
///
/// Serialized field name for edges is `links`, matching what graph
/// renderers downstream expect.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphEdge>,
}

/// Incremental, deduplicating graph builder.
///
/// Nodes are interned by id — first seen wins, later occurrences only add
/// edges. Edges are appended per traversal with no dedup. One builder serves
/// one invocation; there is a single writer and no shared state.
pub struct GraphBuilder {
    options: BuildOptions,
    nodes: Vec<GraphNode>,
    links: Vec<GraphEdge>,
    seen: HashSet<String>,
}

impl GraphBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            options,
            nodes: Vec::new(),
            links: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Build a graph from a snapshot of events in one pass.
    pub fn build(events: &[RawEvent], options: BuildOptions) -> GraphData {
        let mut builder = Self::new(options);
        for event in events {
            builder.push_event(event);
        }
        builder.finish()
    }

    /// Fold one event into the graph.
    ///
    /// Total over malformed input: a sub-entity that cannot contribute
    /// (missing name, sentinel value) contributes nothing and the pass
    /// continues.
    pub fn push_event(&mut self, event: &RawEvent) {
        let name = event.name.as_deref().map(str::trim).unwrap_or("");

        // Every event record gets a node: id when present, hash of the name
        // otherwise, hash of "unknown" as the last resort.
        let event_id = match event.id {
            Some(id) if self.options.prefer_upstream_ids => format!("event_{}", id),
            _ => {
                let key = if name.is_empty() { "unknown" } else { name };
                format!("event_{}", hash_id(key))
            }
        };
        let label = if name.is_empty() { "Evento" } else { name };
        self.intern(GraphNode::with_id(&event_id, NodeKind::Event, label));

        for participant in &event.participants {
            let Some(pname) = non_empty(participant.name.as_deref()) else {
                continue;
            };
            let pid = self.intern(GraphNode::new(NodeKind::Participant, pname));
            self.links
                .push(GraphEdge::new(&event_id, &pid, Relation::PerformedBy));

            if let Some(instrument) = participant
                .activity
                .as_deref()
                .and_then(extract::instrument)
            {
                let iid = self.intern(GraphNode::new(NodeKind::Instrument, instrument));
                self.links.push(GraphEdge::new(&pid, &iid, Relation::Plays));
            }
        }

        if let Some(location) = non_empty(event.location.as_deref()) {
            if let Some(city) = extract::city_name(location) {
                let cid = self.intern(GraphNode::new(NodeKind::City, city));
                self.links
                    .push(GraphEdge::new(&event_id, &cid, Relation::LocatedIn));
            }
            if self.options.emit_location_nodes {
                let lid = self.intern(GraphNode::new(NodeKind::Location, location));
                self.links
                    .push(GraphEdge::new(&event_id, &lid, Relation::AtLocation));
            }
        }

        if let Some(event_type) = non_empty(event.event_type.as_deref()) {
            let tid = self.intern(GraphNode::new(NodeKind::EventType, event_type));
            self.links
                .push(GraphEdge::new(&event_id, &tid, Relation::HasType));
        }

        if let Some(cycle) = event
            .cycle
            .as_deref()
            .filter(|c| !extract::is_sentinel(c))
        {
            let cid = self.intern(GraphNode::new(NodeKind::Cycle, cycle.trim()));
            self.links
                .push(GraphEdge::new(&event_id, &cid, Relation::PartOfCycle));
        }

        for piece in &event.program {
            let Some(piece_name) = non_empty(piece.piece_name.as_deref()) else {
                continue;
            };
            let pid = self.intern(GraphNode::new(NodeKind::Piece, piece_name));
            self.links
                .push(GraphEdge::new(&event_id, &pid, Relation::IncludesPiece));

            for composer in &piece.composers {
                if extract::is_sentinel(composer) {
                    continue;
                }
                let cid = self.intern(GraphNode::new(NodeKind::Composer, composer.trim()));
                self.links
                    .push(GraphEdge::new(&pid, &cid, Relation::ComposedBy));
            }

            if let Some(premiere) = piece
                .premiere_type
                .as_deref()
                .filter(|p| !extract::is_sentinel(p))
            {
                let prid = self.intern(GraphNode::new(NodeKind::PremiereType, premiere.trim()));
                self.links
                    .push(GraphEdge::new(&pid, &prid, Relation::HasPremiereType));
            }
        }
    }

    /// Consume the builder and return the accumulated graph.
    pub fn finish(self) -> GraphData {
        GraphData {
            nodes: self.nodes,
            links: self.links,
        }
    }

    /// First-seen-wins node interning; returns the node id either way.
    fn intern(&mut self, node: GraphNode) -> String {
        let id = node.id.clone();
        if self.seen.insert(id.clone()) {
            self.nodes.push(node);
        }
        id
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Participant, Piece};

    fn event() -> RawEvent {
        RawEvent {
            id: Some(12),
            name: Some("Concierto de Otoño".into()),
            location: Some("Teatro Municipal, Santiago (Chile)".into()),
            event_type: Some("Concierto".into()),
            cycle: Some("Temporada Oficial".into()),
            participants: vec![Participant {
                name: Some("Claudio Arrau".into()),
                activity: Some("Pianista - Piano".into()),
                gender: Some("Masculino".into()),
            }],
            program: vec![Piece {
                piece_name: Some("Sonata n.º 23".into()),
                composers: vec!["Beethoven".into(), "Desconocido".into()],
                premiere_type: Some("Estreno en Chile".into()),
            }],
            ..Default::default()
        }
    }

    fn kinds(graph: &GraphData, kind: NodeKind) -> Vec<&str> {
        graph
            .nodes
            .iter()
            .filter(|n| n.kind == kind)
            .map(|n| n.label.as_str())
            .collect()
    }

    #[test]
    fn builds_full_entity_set_for_one_event() {
        let graph = GraphBuilder::build(&[event()], BuildOptions::default());
        assert_eq!(kinds(&graph, NodeKind::Event), ["Concierto de Otoño"]);
        assert_eq!(kinds(&graph, NodeKind::Participant), ["Claudio Arrau"]);
        assert_eq!(kinds(&graph, NodeKind::Instrument), ["Piano"]);
        assert_eq!(kinds(&graph, NodeKind::City), ["Santiago"]);
        assert_eq!(kinds(&graph, NodeKind::Composer), ["Beethoven"]);
        assert_eq!(kinds(&graph, NodeKind::PremiereType), ["Estreno en Chile"]);
        // Sentinel composer contributed nothing; location nodes are off by
        // default.
        assert!(kinds(&graph, NodeKind::Location).is_empty());

        let labels: Vec<_> = graph.links.iter().map(|l| l.label).collect();
        assert!(labels.contains(&Relation::PerformedBy));
        assert!(labels.contains(&Relation::Plays));
        assert!(labels.contains(&Relation::LocatedIn));
        assert!(labels.contains(&Relation::HasType));
        assert!(labels.contains(&Relation::PartOfCycle));
        assert!(labels.contains(&Relation::IncludesPiece));
        assert!(labels.contains(&Relation::ComposedBy));
        assert!(labels.contains(&Relation::HasPremiereType));
    }

    #[test]
    fn repeated_event_dedups_nodes_but_not_edges() {
        let once = GraphBuilder::build(&[event()], BuildOptions::default());
        let twice = GraphBuilder::build(&[event(), event()], BuildOptions::default());
        assert_eq!(once.nodes.len(), twice.nodes.len());
        assert_eq!(twice.links.len(), once.links.len() * 2);
    }

    #[test]
    fn upstream_id_is_preferred_when_present() {
        let graph = GraphBuilder::build(&[event()], BuildOptions::default());
        assert_eq!(graph.nodes[0].id, "event_12");

        let hashed = GraphBuilder::build(
            &[event()],
            BuildOptions {
                prefer_upstream_ids: false,
                ..Default::default()
            },
        );
        assert_eq!(hashed.nodes[0].id, format!("event_{}", hash_id("Concierto de Otoño")));
    }

    #[test]
    fn location_nodes_are_a_toggle() {
        let graph = GraphBuilder::build(
            &[event()],
            BuildOptions {
                emit_location_nodes: true,
                ..Default::default()
            },
        );
        assert_eq!(
            kinds(&graph, NodeKind::Location),
            ["Teatro Municipal, Santiago (Chile)"]
        );
        assert!(graph
            .links
            .iter()
            .any(|l| l.label == Relation::AtLocation));
        // The city node is still derived alongside.
        assert_eq!(kinds(&graph, NodeKind::City), ["Santiago"]);
    }

    #[test]
    fn nameless_idless_event_gets_unknown_keyed_node() {
        let graph = GraphBuilder::build(&[RawEvent::default()], BuildOptions::default());
        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.nodes[0].id, format!("event_{}", hash_id("unknown")));
        assert_eq!(graph.nodes[0].label, "Evento");
        assert!(graph.links.is_empty());
        // Two such events collapse onto the same node.
        let doubled = GraphBuilder::build(
            &[RawEvent::default(), RawEvent::default()],
            BuildOptions::default(),
        );
        assert_eq!(doubled.nodes.len(), 1);
    }

    #[test]
    fn sentinel_cycle_is_not_an_entity() {
        let mut e = event();
        e.cycle = Some("Ninguno".into());
        let graph = GraphBuilder::build(&[e], BuildOptions::default());
        assert!(kinds(&graph, NodeKind::Cycle).is_empty());
    }

    #[test]
    fn shared_participant_across_events_adds_one_node_two_edges() {
        let mut second = event();
        second.id = Some(13);
        second.name = Some("Recital".into());
        let graph = GraphBuilder::build(&[event(), second], BuildOptions::default());
        assert_eq!(kinds(&graph, NodeKind::Participant), ["Claudio Arrau"]);
        let performed: Vec<_> = graph
            .links
            .iter()
            .filter(|l| l.label == Relation::PerformedBy)
            .collect();
        assert_eq!(performed.len(), 2);
        assert_ne!(performed[0].source, performed[1].source);
        assert_eq!(performed[0].target, performed[1].target);
    }
}
