//! Pattern descriptors handed over by the parser.
//!
//! A [`PathPattern`] is one comma-free chain of a `MATCH`/`CREATE`/`MERGE`
//! pattern: `(a:Person)-[r:KNOWS*1..3]->(b)`. The structures are plain data;
//! validation of their shape happens when they are added to a
//! [`QueryGraph`](crate::query::graph::QueryGraph).

/// Direction of a relationship as written in the pattern.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub enum EdgeDirection {
    /// `(a)-[]->(b)`: points right, from the left node to the right node.
    #[default]
    Out,
    /// `(a)<-[]-(b)`: points left, from the right node to the left node.
    In,
    /// `(a)-[]-(b)`: no declared direction.
    Both,
}

/// Node descriptor.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NodePattern {
    /// Alias binding the node within the statement.
    pub alias: String,
    /// Optional label.
    pub label: Option<String>,
}

impl NodePattern {
    /// Creates an unlabeled node descriptor.
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            label: None,
        }
    }

    /// Attaches a label to the descriptor.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Variable-length range attached to a relationship (`*start..end`).
///
/// Either bound may be omitted: `*` leaves both open, `*2..` leaves the end
/// open and `*..5` leaves the start open.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct HopRange {
    /// Declared lower bound.
    pub start: Option<u32>,
    /// Declared upper bound.
    pub end: Option<u32>,
}

impl HopRange {
    /// `*start..end`
    pub fn new(start: Option<u32>, end: Option<u32>) -> Self {
        Self { start, end }
    }

    /// `*n`, an exact hop count.
    pub fn exact(n: u32) -> Self {
        Self::new(Some(n), Some(n))
    }

    /// `*`, any number of hops.
    pub fn any() -> Self {
        Self::new(None, None)
    }
}

/// Relationship descriptor.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EdgePattern {
    /// Alias binding the relationship within the statement.
    pub alias: String,
    /// Direction as written.
    pub direction: EdgeDirection,
    /// Relationship types (`[:A|B]`); empty means any type.
    pub reltypes: Vec<String>,
    /// Variable-length range, when the pattern carries a `*`.
    pub hops: Option<HopRange>,
}

impl EdgePattern {
    /// Creates an untyped, single-hop, right-pointing descriptor.
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            direction: EdgeDirection::Out,
            reltypes: Vec::new(),
            hops: None,
        }
    }

    /// Sets the direction.
    pub fn direction(mut self, direction: EdgeDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Appends a relationship type.
    pub fn reltype(mut self, name: impl Into<String>) -> Self {
        self.reltypes.push(name.into());
        self
    }

    /// Attaches a variable-length range.
    pub fn hops(mut self, range: HopRange) -> Self {
        self.hops = Some(range);
        self
    }
}

/// One element of a path.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathElement {
    /// Node descriptor.
    Node(NodePattern),
    /// Relationship descriptor.
    Edge(EdgePattern),
}

impl From<NodePattern> for PathElement {
    fn from(node: NodePattern) -> Self {
        PathElement::Node(node)
    }
}

impl From<EdgePattern> for PathElement {
    fn from(edge: EdgePattern) -> Self {
        PathElement::Edge(edge)
    }
}

/// Alternating sequence `node, edge, node, edge, ..., node`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PathPattern {
    /// Path elements in pattern order.
    pub elements: Vec<PathElement>,
}

impl PathPattern {
    /// Wraps a list of elements without validating their shape.
    pub fn new(elements: Vec<PathElement>) -> Self {
        Self { elements }
    }

    /// Number of node descriptors in the path.
    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    /// Iterates over node descriptors in pattern order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodePattern> {
        self.elements.iter().filter_map(|el| match el {
            PathElement::Node(n) => Some(n),
            PathElement::Edge(_) => None,
        })
    }

    /// Iterates over relationship descriptors in pattern order.
    pub fn edges(&self) -> impl Iterator<Item = &EdgePattern> {
        self.elements.iter().filter_map(|el| match el {
            PathElement::Edge(e) => Some(e),
            PathElement::Node(_) => None,
        })
    }
}
