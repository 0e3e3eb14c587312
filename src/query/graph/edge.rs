//! Pattern relationship stored inside a [`QueryGraph`](super::QueryGraph).

use std::fmt;

use crate::query::ast::HopRange;
use crate::types::{NodeId, RelTypeRef};

/// Upper bound of a relationship's hop range.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum HopLimit {
    /// At most this many hops.
    Bounded(u32),
    /// No declared upper limit.
    Unbounded,
}

impl HopLimit {
    /// Returns the bound, or `None` when unbounded.
    pub fn bound(self) -> Option<u32> {
        match self {
            HopLimit::Bounded(n) => Some(n),
            HopLimit::Unbounded => None,
        }
    }
}

impl fmt::Display for HopLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HopLimit::Bounded(n) => write!(f, "{n}"),
            HopLimit::Unbounded => Ok(()),
        }
    }
}

/// Translates an optional `*start..end` descriptor into `(min_hops, max_hops)`.
///
/// No range means a fixed single hop. An omitted start defaults to one and an
/// omitted end leaves the range unbounded.
pub fn hop_bounds(range: Option<HopRange>) -> (u32, HopLimit) {
    match range {
        None => (1, HopLimit::Bounded(1)),
        Some(range) => (
            range.start.unwrap_or(1),
            range.end.map_or(HopLimit::Unbounded, HopLimit::Bounded),
        ),
    }
}

/// Relationship of a query graph.
#[derive(Clone, Debug)]
pub struct QgEdge {
    pub(crate) alias: String,
    pub(crate) reltypes: Vec<String>,
    pub(crate) reltype_ids: Vec<RelTypeRef>,
    pub(crate) src: NodeId,
    pub(crate) dest: NodeId,
    pub(crate) bidirectional: bool,
    pub(crate) min_hops: u32,
    pub(crate) max_hops: HopLimit,
}

impl QgEdge {
    /// Creates an untyped, directed, single-hop edge between two nodes of the
    /// graph it will be added to.
    pub fn new(alias: impl Into<String>, src: NodeId, dest: NodeId) -> Self {
        Self {
            alias: alias.into(),
            reltypes: Vec::new(),
            reltype_ids: Vec::new(),
            src,
            dest,
            bidirectional: false,
            min_hops: 1,
            max_hops: HopLimit::Bounded(1),
        }
    }

    /// Appends a relationship type together with its resolution state.
    pub fn with_reltype(mut self, name: impl Into<String>, id: RelTypeRef) -> Self {
        self.reltypes.push(name.into());
        self.reltype_ids.push(id);
        self
    }

    /// Marks the edge as undirected.
    pub fn with_bidirectional(mut self, bidirectional: bool) -> Self {
        self.bidirectional = bidirectional;
        self
    }

    /// Sets the hop range.
    pub fn with_hops(mut self, min_hops: u32, max_hops: HopLimit) -> Self {
        self.min_hops = min_hops;
        self.max_hops = max_hops;
        self
    }

    /// Alias binding the relationship within the statement.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Relationship type names, in declaration order.
    pub fn reltypes(&self) -> &[String] {
        &self.reltypes
    }

    /// Resolution state of each relationship type, parallel to [`QgEdge::reltypes`].
    pub fn reltype_ids(&self) -> &[RelTypeRef] {
        &self.reltype_ids
    }

    /// Number of relationship types listed on the edge.
    pub fn reltype_count(&self) -> usize {
        self.reltypes.len()
    }

    /// Source node handle.
    pub fn src(&self) -> NodeId {
        self.src
    }

    /// Destination node handle.
    pub fn dest(&self) -> NodeId {
        self.dest
    }

    /// Whether the pattern declared no direction.
    pub fn is_bidirectional(&self) -> bool {
        self.bidirectional
    }

    /// Minimum number of hops.
    pub fn min_hops(&self) -> u32 {
        self.min_hops
    }

    /// Maximum number of hops.
    pub fn max_hops(&self) -> HopLimit {
        self.max_hops
    }

    /// Returns `true` unless the edge spans exactly one hop.
    pub fn is_variable_length(&self) -> bool {
        self.min_hops != 1 || self.max_hops != HopLimit::Bounded(1)
    }

    /// Returns `true` when both endpoints are the same node.
    pub fn is_self_loop(&self) -> bool {
        self.src == self.dest
    }

    pub(crate) fn with_endpoints(&self, src: NodeId, dest: NodeId) -> Self {
        Self {
            src,
            dest,
            ..self.clone()
        }
    }
}
