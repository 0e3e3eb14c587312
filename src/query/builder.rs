//! Fluent builder for path descriptors.

use crate::error::QueryGraphError;
use crate::query::ast::{
    EdgeDirection, EdgePattern, HopRange, NodePattern, PathElement, PathPattern,
};
use crate::types::Result;

/// Fluent builder producing a [`PathPattern`].
///
/// ```
/// use qgraph::query::{ast::EdgeDirection, PathBuilder};
///
/// // (a:Person)<-[r:KNOWS]-(b)
/// let path = PathBuilder::new()
///     .node(("a", "Person"))
///     .direction(EdgeDirection::In)
///     .edge(("r", "KNOWS"), "b")
///     .build()
///     .unwrap();
/// assert_eq!(path.node_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct PathBuilder {
    elements: Vec<PathElement>,
    next_anon_idx: usize,
    pending_direction: EdgeDirection,
    pending_hops: Option<HopRange>,
    error: Option<QueryGraphError>,
}

impl PathBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder whose anonymous aliases start at `seed`.
    ///
    /// A graph renames anonymous aliases that collide with ones it already
    /// binds, so seeding only keeps the generated names readable across the
    /// paths of one statement.
    pub fn with_anon_seed(seed: usize) -> Self {
        Self {
            next_anon_idx: seed,
            ..Self::default()
        }
    }

    /// Index the next anonymous alias would use.
    pub fn next_anon_index(&self) -> usize {
        self.next_anon_idx
    }

    /// Starts the path with a node.
    pub fn node<T>(mut self, target: T) -> Self
    where
        T: Into<NodeTarget>,
    {
        if self.error.is_some() {
            return self;
        }
        if !self.elements.is_empty() {
            self.error = Some(QueryGraphError::MalformedPath {
                reason: "node() may only start a path; use edge() to extend it",
            });
            return self;
        }
        let node = self.resolve_node(target.into());
        self.elements.push(PathElement::Node(node));
        self
    }

    /// Extends the path with a relationship leading to `target`.
    pub fn edge<E, T>(mut self, edge: E, target: T) -> Self
    where
        E: Into<EdgeSpec>,
        T: Into<NodeTarget>,
    {
        if self.error.is_some() {
            return self;
        }
        if self.elements.is_empty() {
            self.error = Some(QueryGraphError::MalformedPath {
                reason: "edge() requires a preceding node",
            });
            return self;
        }
        let spec: EdgeSpec = edge.into();
        let alias = match spec.alias {
            Some(alias) => alias,
            None => self.next_anon_alias(),
        };
        let edge = EdgePattern {
            alias,
            direction: self.pending_direction,
            reltypes: spec.reltypes,
            hops: self.pending_hops.take(),
        };
        let node = self.resolve_node(target.into());
        self.elements.push(PathElement::Edge(edge));
        self.elements.push(PathElement::Node(node));
        self.pending_direction = EdgeDirection::Out;
        self
    }

    /// Sets the direction for the next relationship.
    pub fn direction(mut self, dir: EdgeDirection) -> Self {
        self.pending_direction = dir;
        self
    }

    /// Convenience helper for undirected relationships.
    pub fn undirected(self) -> Self {
        self.direction(EdgeDirection::Both)
    }

    /// Makes the next relationship variable-length.
    pub fn hops(mut self, range: HopRange) -> Self {
        self.pending_hops = Some(range);
        self
    }

    /// Finishes the path.
    pub fn build(self) -> Result<PathPattern> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.elements.is_empty() {
            return Err(QueryGraphError::MalformedPath {
                reason: "path requires at least one node",
            });
        }
        Ok(PathPattern::new(self.elements))
    }

    fn resolve_node(&mut self, target: NodeTarget) -> NodePattern {
        match target {
            NodeTarget::Anonymous { label } => NodePattern {
                alias: self.next_anon_alias(),
                label,
            },
            NodeTarget::Alias { name, label } => NodePattern { alias: name, label },
        }
    }

    fn next_anon_alias(&mut self) -> String {
        let idx = self.next_anon_idx;
        self.next_anon_idx += 1;
        anon_alias(idx)
    }
}

/// Prefix of the aliases generated for anonymous nodes and relationships.
pub(crate) const ANON_PREFIX: &str = "_anon_";

pub(crate) fn anon_alias(idx: usize) -> String {
    format!("{ANON_PREFIX}{idx}")
}

pub(crate) fn is_anon_alias(alias: &str) -> bool {
    alias
        .strip_prefix(ANON_PREFIX)
        .is_some_and(|idx| !idx.is_empty() && idx.bytes().all(|b| b.is_ascii_digit()))
}

/// Node reference accepted by the builder.
#[derive(Clone, Debug)]
pub enum NodeTarget {
    /// Anonymous node with an optional label.
    Anonymous {
        /// Optional label constraint
        label: Option<String>,
    },
    /// Node bound to an alias.
    Alias {
        /// Alias name
        name: String,
        /// Optional label constraint
        label: Option<String>,
    },
}

impl NodeTarget {
    /// Anonymous node carrying `label`.
    pub fn labeled(label: impl Into<String>) -> Self {
        NodeTarget::Anonymous {
            label: Some(label.into()),
        }
    }
}

impl From<&str> for NodeTarget {
    fn from(alias: &str) -> Self {
        NodeTarget::Alias {
            name: alias.to_owned(),
            label: None,
        }
    }
}

impl From<(&str, &str)> for NodeTarget {
    fn from((alias, label): (&str, &str)) -> Self {
        NodeTarget::Alias {
            name: alias.to_owned(),
            label: Some(label.to_owned()),
        }
    }
}

impl From<(&str, Option<&str>)> for NodeTarget {
    fn from((alias, label): (&str, Option<&str>)) -> Self {
        NodeTarget::Alias {
            name: alias.to_owned(),
            label: label.map(|l| l.to_owned()),
        }
    }
}

/// Relationship accepted by the builder.
#[derive(Clone, Debug, Default)]
pub struct EdgeSpec {
    alias: Option<String>,
    reltypes: Vec<String>,
}

impl EdgeSpec {
    /// Creates a relationship with an optional alias and no type constraint.
    pub fn new(alias: Option<String>) -> Self {
        Self {
            alias,
            reltypes: Vec::new(),
        }
    }

    /// Untyped relationship bound to `alias`.
    pub fn named(alias: impl Into<String>) -> Self {
        Self::new(Some(alias.into()))
    }

    /// Anonymous, untyped relationship.
    pub fn anonymous() -> Self {
        Self::new(None)
    }

    /// Adds an alternative relationship type (`[:A|B]`).
    pub fn reltype(mut self, name: impl Into<String>) -> Self {
        self.reltypes.push(name.into());
        self
    }
}

impl From<&str> for EdgeSpec {
    /// Anonymous relationship of a single type.
    fn from(reltype: &str) -> Self {
        Self::anonymous().reltype(reltype)
    }
}

impl From<(&str, &str)> for EdgeSpec {
    fn from((alias, reltype): (&str, &str)) -> Self {
        Self::new(Some(alias.to_owned())).reltype(reltype)
    }
}

impl From<(&str, Option<&str>)> for EdgeSpec {
    fn from((alias, reltype): (&str, Option<&str>)) -> Self {
        let spec = Self::new(Some(alias.to_owned()));
        match reltype {
            Some(name) => spec.reltype(name),
            None => spec,
        }
    }
}
