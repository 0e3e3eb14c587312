//! Construction budgets applied while a query graph is populated.

/// Upper bounds enforced by [`QueryGraph`](crate::query::graph::QueryGraph)
/// while nodes and edges are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphLimits {
    /// Maximum number of live nodes.
    pub max_nodes: usize,
    /// Maximum number of live edges.
    pub max_edges: usize,
    /// Maximum number of relationship types listed on one edge.
    pub max_reltypes_per_edge: usize,
}

impl Default for GraphLimits {
    fn default() -> Self {
        Self {
            max_nodes: 10_000,
            max_edges: 10_000,
            max_reltypes_per_edge: 256,
        }
    }
}

impl GraphLimits {
    /// Tight budgets for untrusted, interactive input.
    pub fn strict() -> Self {
        Self {
            max_nodes: 256,
            max_edges: 512,
            max_reltypes_per_edge: 16,
        }
    }

    /// Disables every budget.
    pub fn unbounded() -> Self {
        Self {
            max_nodes: usize::MAX,
            max_edges: usize::MAX,
            max_reltypes_per_edge: usize::MAX,
        }
    }
}
