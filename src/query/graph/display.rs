//! Cypher-like rendering used in explain output and debug logs.

use std::fmt;

use crate::types::EdgeId;

use super::{HopLimit, QgEdge, QgNode, QueryGraph};

impl fmt::Display for QgNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "({}:{})", self.alias, label),
            None => write!(f, "({})", self.alias),
        }
    }
}

impl QgEdge {
    fn fmt_body(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}", self.alias)?;
        if !self.reltypes.is_empty() {
            write!(f, ":{}", self.reltypes.join("|"))?;
        }
        if self.is_variable_length() {
            match self.max_hops {
                HopLimit::Bounded(max) if max == self.min_hops => write!(f, "*{max}")?,
                max => write!(f, "*{}..{}", self.min_hops, max)?,
            }
        }
        write!(f, "]")
    }
}

/// Renders one edge with its endpoints, e.g. `(a)-[r:KNOWS*1..]->(b)`.
pub(crate) struct EdgeDisplay<'a> {
    graph: &'a QueryGraph,
    id: EdgeId,
}

impl fmt::Display for EdgeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(edge) = self.graph.edge(self.id) else {
            return write!(f, "<stale {}>", self.id);
        };
        let alias = |id| self.graph.node_alias(id).unwrap_or("?");
        write!(f, "({})-", alias(edge.src))?;
        edge.fmt_body(f)?;
        let arrow = if edge.bidirectional { "-" } else { "->" };
        write!(f, "{arrow}({})", alias(edge.dest))
    }
}

impl QueryGraph {
    /// Displayable rendering of the edge behind `id`.
    pub fn display_edge(&self, id: EdgeId) -> impl fmt::Display + '_ {
        EdgeDisplay { graph: self, id }
    }
}

impl fmt::Display for QueryGraph {
    /// Nodes on the first line, then one edge per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (_, node) in self.nodes() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{node}")?;
            first = false;
        }
        for (id, _) in self.edges() {
            write!(f, "\n{}", self.display_edge(id))?;
        }
        Ok(())
    }
}
