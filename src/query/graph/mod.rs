//! Query graph: the pattern of one statement as nodes and relationships.
//!
//! The graph owns its nodes and edges in two arenas. Adjacency lists and
//! edge endpoints store [`NodeId`]/[`EdgeId`] handles into those arenas,
//! never references, so removing an entity only vacates its slot and stale
//! handles are detected at lookup time. Aliases are the identity key across
//! graphs: clone and merge match entities by alias and issue fresh handles.

use rustc_hash::FxHashSet;

use crate::config::GraphLimits;
use crate::error::{EntityKind, QueryGraphError};
use crate::query::metadata::MetadataProvider;
use crate::types::{CatalogRef, EdgeId, NodeId, Result};

mod components;
mod display;
mod edge;
mod edge_ops;
mod matrix;
mod merge;
mod node;
mod node_ops;
mod path;

pub use components::split_component;
pub use edge::{hop_bounds, HopLimit, QgEdge};
pub use matrix::{BoolMatrix, MatrixError, SparseBoolMatrix};
pub use merge::MergeStats;
pub use node::QgNode;

/// Handle value never issued to a live slot; marks a dangling endpoint.
const DANGLING: u32 = u32::MAX;

/// Converts the next arena position into a handle value.
///
/// Slots are never reused, so the position only grows. `DANGLING` stays
/// reserved.
fn slot_handle(len: usize, kind: &'static str) -> Result<u32> {
    match u32::try_from(len) {
        Ok(slot) if slot != DANGLING => Ok(slot),
        _ => Err(QueryGraphError::PatternTooLarge {
            kind,
            count: len.saturating_add(1),
            max: DANGLING as usize,
        }),
    }
}

/// Pattern graph built for one compiled statement.
#[derive(Debug, Default)]
pub struct QueryGraph {
    nodes: Vec<Option<QgNode>>,
    edges: Vec<Option<QgEdge>>,
    live_nodes: usize,
    live_edges: usize,
    limits: GraphLimits,
}

impl QueryGraph {
    /// Creates an empty graph with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph enforcing `limits` during construction.
    pub fn with_limits(limits: GraphLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// Limits enforced by this graph.
    pub fn limits(&self) -> GraphLimits {
        self.limits
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.live_nodes
    }

    /// Number of live edges.
    pub fn edge_count(&self) -> usize {
        self.live_edges
    }

    /// Number of live nodes and edges.
    pub fn entity_count(&self) -> usize {
        self.live_nodes + self.live_edges
    }

    /// Returns `true` when the graph has no nodes (and therefore no edges).
    pub fn is_empty(&self) -> bool {
        self.live_nodes == 0
    }

    /// Live nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &QgNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|n| (NodeId(idx as u32), n)))
    }

    /// Live edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &QgEdge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|e| (EdgeId(idx as u32), e)))
    }

    /// Node behind `id`, or `None` when the handle is stale.
    pub fn node(&self, id: NodeId) -> Option<&QgNode> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    /// Edge behind `id`, or `None` when the handle is stale.
    pub fn edge(&self, id: EdgeId) -> Option<&QgEdge> {
        self.edges.get(id.index()).and_then(Option::as_ref)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut QgNode> {
        self.nodes.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Handle of the node bound to `alias`.
    ///
    /// Linear scan; graphs are bounded by a single statement's pattern.
    pub fn node_id_by_alias(&self, alias: &str) -> Option<NodeId> {
        self.nodes()
            .find(|(_, n)| n.alias == alias)
            .map(|(id, _)| id)
    }

    /// Handle of the edge bound to `alias`.
    pub fn edge_id_by_alias(&self, alias: &str) -> Option<EdgeId> {
        self.edges()
            .find(|(_, e)| e.alias == alias)
            .map(|(id, _)| id)
    }

    /// Node bound to `alias`.
    pub fn node_by_alias(&self, alias: &str) -> Option<&QgNode> {
        self.nodes().find(|(_, n)| n.alias == alias).map(|(_, n)| n)
    }

    /// Edge bound to `alias`.
    pub fn edge_by_alias(&self, alias: &str) -> Option<&QgEdge> {
        self.edges().find(|(_, e)| e.alias == alias).map(|(_, e)| e)
    }

    /// Node bound to `alias`, failing with an invariant error when absent.
    pub fn require_node(&self, alias: &str) -> Result<NodeId> {
        self.node_id_by_alias(alias)
            .ok_or_else(|| QueryGraphError::unknown_alias(alias, EntityKind::Node))
    }

    /// Edge bound to `alias`, failing with an invariant error when absent.
    pub fn require_edge(&self, alias: &str) -> Result<EdgeId> {
        self.edge_id_by_alias(alias)
            .ok_or_else(|| QueryGraphError::unknown_alias(alias, EntityKind::Edge))
    }

    /// Whether `alias` names a node, an edge, or nothing in this graph.
    pub fn entity_kind(&self, alias: &str) -> EntityKind {
        if self.contains_node(alias) {
            EntityKind::Node
        } else if self.contains_edge(alias) {
            EntityKind::Edge
        } else {
            EntityKind::Unknown
        }
    }

    /// Returns `true` when a node is bound to `alias`.
    pub fn contains_node(&self, alias: &str) -> bool {
        self.node_id_by_alias(alias).is_some()
    }

    /// Returns `true` when an edge is bound to `alias`.
    pub fn contains_edge(&self, alias: &str) -> bool {
        self.edge_id_by_alias(alias).is_some()
    }

    /// Alias of the node behind `id`.
    pub fn node_alias(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(QgNode::alias)
    }

    /// Source and destination aliases of the edge behind `id`.
    pub fn edge_endpoints(&self, id: EdgeId) -> Option<(&str, &str)> {
        let edge = self.edge(id)?;
        Some((self.node_alias(edge.src)?, self.node_alias(edge.dest)?))
    }

    /// Nodes adjacent to `id`, ignoring direction: destinations of outgoing
    /// edges followed by sources of incoming edges. May repeat.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let node = self.node(id);
        let out = node
            .into_iter()
            .flat_map(|n| n.outgoing.iter())
            .filter_map(move |e| self.edge(*e).map(|e| e.dest));
        let inc = node
            .into_iter()
            .flat_map(|n| n.incoming.iter())
            .filter_map(move |e| self.edge(*e).map(|e| e.src));
        out.chain(inc)
    }

    /// Re-resolves labels and relationship types recorded as unresolved.
    ///
    /// Returns how many names were resolved by this call.
    pub fn resolve_unknown_ids(&mut self, catalog: &dyn MetadataProvider) -> usize {
        let mut resolved = 0;
        for node in self.nodes.iter_mut().flatten() {
            if let CatalogRef::Unresolved(name) = &node.label_id {
                if let Some(id) = catalog.resolve_label(name) {
                    node.label_id = CatalogRef::Resolved(id);
                    resolved += 1;
                }
            }
        }
        for edge in self.edges.iter_mut().flatten() {
            for slot in edge.reltype_ids.iter_mut() {
                if let CatalogRef::Unresolved(name) = slot {
                    if let Some(id) = catalog.resolve_edge_type(name) {
                        *slot = CatalogRef::Resolved(id);
                        resolved += 1;
                    }
                }
            }
        }
        resolved
    }

    /// Verifies alias uniqueness, endpoint membership and adjacency
    /// consistency, returning the first violation found.
    pub fn check_invariants(&self) -> Result<()> {
        let mut aliases = FxHashSet::default();
        for (_, node) in self.nodes() {
            if !aliases.insert(node.alias.as_str()) {
                return Err(QueryGraphError::invariant(format!(
                    "node alias '{}' bound twice",
                    node.alias
                )));
            }
        }
        let mut aliases = FxHashSet::default();
        for (id, edge) in self.edges() {
            if !aliases.insert(edge.alias.as_str()) {
                return Err(QueryGraphError::invariant(format!(
                    "edge alias '{}' bound twice",
                    edge.alias
                )));
            }
            for endpoint in [edge.src, edge.dest] {
                if self.node(endpoint).is_none() {
                    return Err(QueryGraphError::invariant(format!(
                        "edge '{}' ({id}) references missing node {endpoint}",
                        edge.alias
                    )));
                }
            }
        }
        for (id, node) in self.nodes() {
            let expected_out = self.edges().filter(|(_, e)| e.src == id).count();
            let expected_in = self.edges().filter(|(_, e)| e.dest == id).count();
            let out_ok = node
                .outgoing
                .iter()
                .all(|e| self.edge(*e).is_some_and(|e| e.src == id));
            let in_ok = node
                .incoming
                .iter()
                .all(|e| self.edge(*e).is_some_and(|e| e.dest == id));
            if !out_ok
                || !in_ok
                || node.outgoing.len() != expected_out
                || node.incoming.len() != expected_in
            {
                return Err(QueryGraphError::invariant(format!(
                    "adjacency of node '{}' disagrees with the edge set",
                    node.alias
                )));
            }
        }
        let live_nodes = self.nodes().count();
        let live_edges = self.edges().count();
        if live_nodes != self.live_nodes || live_edges != self.live_edges {
            return Err(QueryGraphError::invariant("live entity counters drifted"));
        }
        Ok(())
    }
}

impl Clone for QueryGraph {
    /// Deep copy with compacted arenas.
    ///
    /// Nodes are copied without adjacency, then every edge is copied and
    /// reconnected to the copy of its endpoints. The result shares nothing
    /// with `self`; handles from `self` are not valid in the copy.
    fn clone(&self) -> Self {
        let mut copy = QueryGraph::with_limits(self.limits);
        let mut remap = vec![None; self.nodes.len()];
        // Compaction never moves a slot past its source position, so the
        // pushes below cannot run out of handles.
        for (id, node) in self.nodes() {
            remap[id.index()] = copy.push_node(node.detached()).ok();
        }
        for (_, edge) in self.edges() {
            let endpoint = |id: NodeId| remap.get(id.index()).copied().flatten();
            // A dangling endpoint keeps an out-of-range handle; check_invariants reports it.
            let src = endpoint(edge.src).unwrap_or(NodeId(DANGLING));
            let dest = endpoint(edge.dest).unwrap_or(NodeId(DANGLING));
            if copy.push_edge(edge.with_endpoints(src, dest)).is_err() {
                break;
            }
        }
        copy
    }
}
