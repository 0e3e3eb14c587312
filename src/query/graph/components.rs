//! Connected-component decomposition.
//!
//! A statement such as `MATCH (a)-[]->(b), (c)` describes two independent
//! patterns. Planning each connected piece separately lets the planner pick a
//! traversal per piece and join the results with a cartesian product.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::types::NodeId;

use super::QueryGraph;

/// Peels the connected component containing the first node of `remaining`.
///
/// Returns `(component, rest)` where `component` holds every node reachable
/// from the seed (ignoring edge direction) together with the edges between
/// them, and `rest` holds everything else. Both are fresh graphs; `remaining`
/// is not modified. Returns `None` once `remaining` has no nodes.
pub fn split_component(remaining: &QueryGraph) -> Option<(QueryGraph, QueryGraph)> {
    let (seed, _) = remaining.nodes().next()?;

    let mut visited: FxHashSet<&str> = FxHashSet::default();
    let mut frontier: Vec<NodeId> = vec![seed];
    while let Some(id) = frontier.pop() {
        let Some(node) = remaining.node(id) else {
            continue;
        };
        if !visited.insert(node.alias()) {
            continue;
        }
        for neighbor in remaining.neighbors(id) {
            if remaining
                .node_alias(neighbor)
                .is_some_and(|alias| !visited.contains(alias))
            {
                frontier.push(neighbor);
            }
        }
    }

    let mut component = remaining.clone();
    component.retain_nodes(|n| visited.contains(n.alias()));
    let mut rest = remaining.clone();
    rest.retain_nodes(|n| !visited.contains(n.alias()));

    debug!(
        component_nodes = component.node_count(),
        component_edges = component.edge_count(),
        remaining_nodes = rest.node_count(),
        "query_graph.components.split"
    );
    Some((component, rest))
}

impl QueryGraph {
    /// Splits the graph into its maximal connected subgraphs.
    ///
    /// Direction is ignored. Every node and every edge of `self` ends up in
    /// exactly one returned graph; `self` is left untouched. An empty graph
    /// yields no components.
    pub fn connected_components(&self) -> Vec<QueryGraph> {
        let mut components = Vec::new();
        let mut remaining = self.clone();
        while let Some((component, rest)) = split_component(&remaining) {
            components.push(component);
            remaining = rest;
        }
        components
    }

    /// Returns `true` when every node is reachable from every other node.
    /// The empty graph is considered connected.
    pub fn is_connected(&self) -> bool {
        match split_component(self) {
            Some((_, rest)) => rest.is_empty(),
            None => true,
        }
    }
}
