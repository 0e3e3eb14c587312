#![allow(missing_docs)]

use std::fmt;

use thiserror::Error;
use tracing::error;

/// Category of pattern entity referenced by an error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntityKind {
    /// A pattern node.
    Node,
    /// A pattern relationship.
    Edge,
    /// Alias not bound in the graph.
    Unknown,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Node => write!(f, "node"),
            EntityKind::Edge => write!(f, "edge"),
            EntityKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Errors raised while building or reshaping a query graph.
///
/// Variants flagged by [`QueryGraphError::is_invariant`] indicate a caller
/// bug (well-formed parser output never triggers them). The remaining
/// variants describe malformed descriptors, budget overruns, or failures
/// reported by the matrix backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryGraphError {
    /// A node with the same alias already exists in the graph.
    #[error("duplicate node alias '{alias}'")]
    DuplicateNodeAlias { alias: String },
    /// An edge with the same alias already exists in the graph.
    #[error("duplicate edge alias '{alias}'")]
    DuplicateEdgeAlias { alias: String },
    /// A node handle does not point at a live node of this graph.
    #[error("node {id} is not a member of this graph")]
    UnknownNode { id: String },
    /// An edge handle does not point at a live edge of this graph.
    #[error("edge {id} is not a member of this graph")]
    UnknownEdge { id: String },
    /// An alias lookup that was required to succeed came back empty.
    #[error("no {kind} bound to alias '{alias}'")]
    UnknownAlias { alias: String, kind: EntityKind },
    /// Structural inconsistency detected by invariant checking.
    #[error("query graph invariant violated: {0}")]
    Invariant(String),
    /// Path descriptors did not alternate node, edge, node, ...
    #[error("malformed path: {reason}")]
    MalformedPath { reason: &'static str },
    /// Variable-length range whose start exceeds its end.
    #[error("invalid hop range on '{alias}': {start}..{end}")]
    InvalidHopRange { alias: String, start: u32, end: u32 },
    /// Construction exceeded a configured budget.
    #[error("pattern exceeds {max} {kind} (got {count})")]
    PatternTooLarge {
        kind: &'static str,
        count: usize,
        max: usize,
    },
    /// The boolean matrix backend rejected an operation.
    #[error("matrix backend error: {0}")]
    Matrix(String),
}

impl QueryGraphError {
    /// Builds a [`QueryGraphError::DuplicateNodeAlias`] and logs it.
    pub fn duplicate_node(alias: impl Into<String>) -> Self {
        Self::DuplicateNodeAlias {
            alias: alias.into(),
        }
        .logged()
    }

    /// Builds a [`QueryGraphError::DuplicateEdgeAlias`] and logs it.
    pub fn duplicate_edge(alias: impl Into<String>) -> Self {
        Self::DuplicateEdgeAlias {
            alias: alias.into(),
        }
        .logged()
    }

    /// Builds a [`QueryGraphError::UnknownNode`] and logs it.
    pub fn unknown_node(id: impl fmt::Display) -> Self {
        Self::UnknownNode { id: id.to_string() }.logged()
    }

    /// Builds a [`QueryGraphError::UnknownEdge`] and logs it.
    pub fn unknown_edge(id: impl fmt::Display) -> Self {
        Self::UnknownEdge { id: id.to_string() }.logged()
    }

    /// Builds a [`QueryGraphError::UnknownAlias`] and logs it.
    pub fn unknown_alias(alias: impl Into<String>, kind: EntityKind) -> Self {
        Self::UnknownAlias {
            alias: alias.into(),
            kind,
        }
        .logged()
    }

    /// Builds a [`QueryGraphError::Invariant`] and logs it.
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant(message.into()).logged()
    }

    /// Returns `true` for programming errors in the caller.
    pub fn is_invariant(&self) -> bool {
        matches!(
            self,
            QueryGraphError::DuplicateNodeAlias { .. }
                | QueryGraphError::DuplicateEdgeAlias { .. }
                | QueryGraphError::UnknownNode { .. }
                | QueryGraphError::UnknownEdge { .. }
                | QueryGraphError::UnknownAlias { .. }
                | QueryGraphError::Invariant(_)
        )
    }

    /// Returns a machine-readable code for the error variant.
    pub fn code(&self) -> &'static str {
        match self {
            QueryGraphError::DuplicateNodeAlias { .. } => "DuplicateNodeAlias",
            QueryGraphError::DuplicateEdgeAlias { .. } => "DuplicateEdgeAlias",
            QueryGraphError::UnknownNode { .. } => "UnknownNode",
            QueryGraphError::UnknownEdge { .. } => "UnknownEdge",
            QueryGraphError::UnknownAlias { .. } => "UnknownAlias",
            QueryGraphError::Invariant(_) => "Invariant",
            QueryGraphError::MalformedPath { .. } => "MalformedPath",
            QueryGraphError::InvalidHopRange { .. } => "InvalidHopRange",
            QueryGraphError::PatternTooLarge { .. } => "PatternTooLarge",
            QueryGraphError::Matrix(_) => "Matrix",
        }
    }

    fn logged(self) -> Self {
        error!(code = self.code(), error = %self, "query_graph.invariant");
        self
    }
}

/// Convenience wrapper that formats errors with their codes.
pub struct QueryGraphErrorWithCode<'a>(pub &'a QueryGraphError);

impl fmt::Display for QueryGraphErrorWithCode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.0.code(), self.0)
    }
}
