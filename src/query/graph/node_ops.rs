use tracing::{debug, trace};

use crate::error::QueryGraphError;
use crate::query::metadata::MetadataProvider;
use crate::types::{CatalogRef, NodeId, Result};

use super::{slot_handle, QgNode, QueryGraph};

impl QueryGraph {
    /// Adds an unlabeled node bound to `alias`.
    pub fn add_node(&mut self, alias: &str) -> Result<NodeId> {
        if self.contains_node(alias) {
            return Err(QueryGraphError::duplicate_node(alias));
        }
        self.ensure_node_budget(1)?;
        let id = self.push_node(QgNode::new(alias))?;
        trace!(alias, node = %id, "query_graph.node.added");
        Ok(id)
    }

    /// Attaches `label` to the node behind `id`, resolving it through `catalog`.
    ///
    /// A node keeps the first label it receives; later calls return `false`
    /// and leave the node untouched.
    pub fn set_node_label(
        &mut self,
        id: NodeId,
        label: &str,
        catalog: &dyn MetadataProvider,
    ) -> Result<bool> {
        let node = self
            .node_mut(id)
            .ok_or_else(|| QueryGraphError::unknown_node(id))?;
        if node.is_labeled() {
            return Ok(false);
        }
        let label_id = CatalogRef::from_lookup(label, catalog.resolve_label(label));
        if label_id.is_unresolved() {
            debug!(alias = %node.alias, label, "query_graph.label.unresolved");
        }
        Ok(node.set_label(label, label_id))
    }

    /// Removes the node behind `id` together with every incident edge.
    ///
    /// The removed node is returned with empty adjacency lists.
    pub fn remove_node(&mut self, id: NodeId) -> Result<QgNode> {
        self.take_node(id)
            .ok_or_else(|| QueryGraphError::unknown_node(id))
    }

    /// Removes every node for which `keep` returns `false`, cascading to
    /// incident edges. Returns the number of nodes removed.
    pub fn retain_nodes<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&QgNode) -> bool,
    {
        let doomed: Vec<NodeId> = self
            .nodes()
            .filter(|(_, n)| !keep(n))
            .map(|(id, _)| id)
            .collect();
        doomed
            .into_iter()
            .filter(|id| self.take_node(*id).is_some())
            .count()
    }

    pub(super) fn push_node(&mut self, node: QgNode) -> Result<NodeId> {
        let id = NodeId(slot_handle(self.nodes.len(), "node slots")?);
        self.nodes.push(Some(node));
        self.live_nodes += 1;
        Ok(id)
    }

    pub(super) fn take_node(&mut self, id: NodeId) -> Option<QgNode> {
        let node = self.node(id)?;
        let mut incident: Vec<_> = node
            .outgoing
            .iter()
            .chain(node.incoming.iter())
            .copied()
            .collect();
        // Self-loops are listed on both sides.
        incident.sort_unstable();
        incident.dedup();
        for edge in incident {
            self.take_edge(edge);
        }
        let node = self.nodes.get_mut(id.index())?.take()?;
        self.live_nodes -= 1;
        trace!(alias = %node.alias, node = %id, "query_graph.node.removed");
        Some(node)
    }

    pub(super) fn ensure_node_budget(&self, additional: usize) -> Result<()> {
        let count = self.live_nodes.saturating_add(additional);
        if count > self.limits.max_nodes {
            return Err(QueryGraphError::PatternTooLarge {
                kind: "nodes",
                count,
                max: self.limits.max_nodes,
            });
        }
        Ok(())
    }
}
