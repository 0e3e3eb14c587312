//! Pattern node stored inside a [`QueryGraph`](super::QueryGraph).

use smallvec::SmallVec;

use crate::types::{EdgeId, LabelRef};

/// Inline capacity for adjacency lists; pattern nodes rarely exceed it.
pub(crate) type AdjList = SmallVec<[EdgeId; 4]>;

/// Node of a query graph.
///
/// Adjacency lists hold handles into the owning graph's edge arena. They are
/// maintained exclusively by the graph: `outgoing` lists exactly the edges
/// whose `src` is this node and `incoming` exactly those whose `dest` is this
/// node. A self-loop therefore appears in both lists.
#[derive(Clone, Debug)]
pub struct QgNode {
    pub(crate) alias: String,
    pub(crate) label: Option<String>,
    pub(crate) label_id: LabelRef,
    pub(crate) incoming: AdjList,
    pub(crate) outgoing: AdjList,
}

impl QgNode {
    pub(crate) fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            label: None,
            label_id: LabelRef::Absent,
            incoming: AdjList::new(),
            outgoing: AdjList::new(),
        }
    }

    /// Alias binding the node within the statement.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Label name, if one was declared.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Catalog resolution state of the label.
    pub fn label_id(&self) -> &LabelRef {
        &self.label_id
    }

    /// Returns `true` when a label has been attached.
    pub fn is_labeled(&self) -> bool {
        self.label.is_some()
    }

    /// Edges whose destination is this node, in insertion order.
    pub fn incoming(&self) -> &[EdgeId] {
        &self.incoming
    }

    /// Edges whose source is this node, in insertion order.
    pub fn outgoing(&self) -> &[EdgeId] {
        &self.outgoing
    }

    /// Number of incoming edges.
    pub fn in_degree(&self) -> usize {
        self.incoming.len()
    }

    /// Number of outgoing edges.
    pub fn out_degree(&self) -> usize {
        self.outgoing.len()
    }

    /// Total number of incident edge slots (a self-loop counts twice).
    pub fn degree(&self) -> usize {
        self.in_degree() + self.out_degree()
    }

    /// Attaches a label unless one is already present. First label wins.
    pub(crate) fn set_label(&mut self, label: &str, label_id: LabelRef) -> bool {
        if self.label.is_some() {
            return false;
        }
        self.label = Some(label.to_owned());
        self.label_id = label_id;
        true
    }

    /// Copy with the same identity and label but no adjacency.
    pub(crate) fn detached(&self) -> Self {
        Self {
            alias: self.alias.clone(),
            label: self.label.clone(),
            label_id: self.label_id.clone(),
            incoming: AdjList::new(),
            outgoing: AdjList::new(),
        }
    }

    pub(crate) fn detach(&mut self, edge: EdgeId) {
        self.incoming.retain(|e| *e != edge);
        self.outgoing.retain(|e| *e != edge);
    }
}
