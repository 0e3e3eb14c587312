use tracing::trace;

use crate::error::QueryGraphError;
use crate::types::{EdgeId, NodeId, Result};

use super::{slot_handle, QgEdge, QueryGraph};

impl QueryGraph {
    /// Adds `edge` and connects it to both endpoints.
    ///
    /// The endpoints must be live nodes of this graph and the alias must be
    /// unused.
    pub fn add_edge(&mut self, edge: QgEdge) -> Result<EdgeId> {
        if self.contains_edge(&edge.alias) {
            return Err(QueryGraphError::duplicate_edge(edge.alias));
        }
        for endpoint in [edge.src, edge.dest] {
            if self.node(endpoint).is_none() {
                return Err(QueryGraphError::unknown_node(endpoint));
            }
        }
        self.ensure_edge_budget(1)?;
        self.ensure_reltype_budget(edge.reltype_count())?;
        let id = self.push_edge(edge)?;
        trace!(edge = %id, "query_graph.edge.added");
        Ok(id)
    }

    /// Detaches the edge behind `id` from its endpoints and removes it.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<QgEdge> {
        self.take_edge(id)
            .ok_or_else(|| QueryGraphError::unknown_edge(id))
    }

    /// Swaps the endpoints of the edge behind `id`, moving it between the
    /// endpoints' adjacency lists. The edge keeps its handle and alias.
    pub fn reverse_edge(&mut self, id: EdgeId) -> Result<()> {
        let (src, dest) = match self.edge(id) {
            Some(edge) => (edge.src, edge.dest),
            None => return Err(QueryGraphError::unknown_edge(id)),
        };
        self.disconnect(id, src, dest);
        if let Some(edge) = self.edges.get_mut(id.index()).and_then(Option::as_mut) {
            edge.src = dest;
            edge.dest = src;
        }
        self.connect(id, dest, src);
        trace!(edge = %id, "query_graph.edge.reversed");
        Ok(())
    }

    pub(super) fn push_edge(&mut self, edge: QgEdge) -> Result<EdgeId> {
        let id = EdgeId(slot_handle(self.edges.len(), "edge slots")?);
        let (src, dest) = (edge.src, edge.dest);
        self.edges.push(Some(edge));
        self.live_edges += 1;
        self.connect(id, src, dest);
        Ok(id)
    }

    pub(super) fn take_edge(&mut self, id: EdgeId) -> Option<QgEdge> {
        let edge = self.edges.get_mut(id.index())?.take()?;
        self.live_edges -= 1;
        self.disconnect(id, edge.src, edge.dest);
        trace!(alias = %edge.alias, edge = %id, "query_graph.edge.removed");
        Some(edge)
    }

    fn connect(&mut self, id: EdgeId, src: NodeId, dest: NodeId) {
        if let Some(node) = self.node_mut(src) {
            node.outgoing.push(id);
        }
        if let Some(node) = self.node_mut(dest) {
            node.incoming.push(id);
        }
    }

    fn disconnect(&mut self, id: EdgeId, src: NodeId, dest: NodeId) {
        for endpoint in [src, dest] {
            if let Some(node) = self.node_mut(endpoint) {
                node.detach(id);
            }
        }
    }

    pub(super) fn ensure_edge_budget(&self, additional: usize) -> Result<()> {
        let count = self.live_edges.saturating_add(additional);
        if count > self.limits.max_edges {
            return Err(QueryGraphError::PatternTooLarge {
                kind: "edges",
                count,
                max: self.limits.max_edges,
            });
        }
        Ok(())
    }

    pub(super) fn ensure_reltype_budget(&self, count: usize) -> Result<()> {
        if count > self.limits.max_reltypes_per_edge {
            return Err(QueryGraphError::PatternTooLarge {
                kind: "relationship types on one edge",
                count,
                max: self.limits.max_reltypes_per_edge,
            });
        }
        Ok(())
    }
}
