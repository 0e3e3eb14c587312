use tracing::debug;

use crate::error::{EntityKind, QueryGraphError};
use crate::types::Result;

use super::QueryGraph;

/// Summary of a [`QueryGraph::merge`] call.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MergeStats {
    /// Nodes copied from the other graph.
    pub nodes_added: usize,
    /// Edges copied from the other graph.
    pub edges_added: usize,
}

impl MergeStats {
    /// Returns `true` when the merge changed nothing.
    pub fn is_noop(&self) -> bool {
        self.nodes_added == 0 && self.edges_added == 0
    }
}

impl QueryGraph {
    /// Copies into `self` every node and edge of `other` whose alias is not
    /// bound here yet.
    ///
    /// Entities already present are left untouched, even if `other` describes
    /// them differently: the first graph to bind an alias wins. Copied edges
    /// are reconnected to the nodes of `self` carrying their endpoints'
    /// aliases. Merging the same graph twice changes nothing the second time.
    pub fn merge(&mut self, other: &QueryGraph) -> Result<MergeStats> {
        let new_nodes: Vec<_> = other
            .nodes()
            .filter(|(_, n)| !self.contains_node(&n.alias))
            .map(|(_, n)| n.detached())
            .collect();
        let new_edges: Vec<_> = other
            .edges()
            .filter(|(_, e)| !self.contains_edge(&e.alias))
            .collect();
        self.ensure_node_budget(new_nodes.len())?;
        self.ensure_edge_budget(new_edges.len())?;
        for (_, edge) in &new_edges {
            self.ensure_reltype_budget(edge.reltype_count())?;
        }

        let mut stats = MergeStats::default();
        for node in new_nodes {
            self.push_node(node)?;
            stats.nodes_added += 1;
        }
        for (id, edge) in new_edges {
            let (src_alias, dest_alias) = other.edge_endpoints(id).ok_or_else(|| {
                QueryGraphError::invariant(format!(
                    "edge '{}' has a dangling endpoint in the merged graph",
                    edge.alias
                ))
            })?;
            let src = self
                .node_id_by_alias(src_alias)
                .ok_or_else(|| QueryGraphError::unknown_alias(src_alias, EntityKind::Node))?;
            let dest = self
                .node_id_by_alias(dest_alias)
                .ok_or_else(|| QueryGraphError::unknown_alias(dest_alias, EntityKind::Node))?;
            self.push_edge(edge.with_endpoints(src, dest))?;
            stats.edges_added += 1;
        }
        debug!(
            nodes_added = stats.nodes_added,
            edges_added = stats.edges_added,
            "query_graph.merge"
        );
        Ok(stats)
    }
}
