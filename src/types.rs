//! Identifier newtypes and catalog resolution state shared across the crate.

use std::fmt;

use crate::error::QueryGraphError;

/// Convenience alias for query-graph results.
pub type Result<T> = std::result::Result<T, QueryGraphError>;

/// Catalog identifier for a node label.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct LabelId(pub u32);

/// Catalog identifier for a relationship type.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct TypeId(pub u32);

/// Handle to a node slot inside one [`QueryGraph`](crate::query::graph::QueryGraph).
///
/// Handles are local to the graph that issued them. Clone and merge rebuild
/// handles, so a `NodeId` must never be carried from one graph to another.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct NodeId(pub u32);

/// Handle to an edge slot inside one [`QueryGraph`](crate::query::graph::QueryGraph).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct EdgeId(pub u32);

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Outcome of resolving a schema name against the catalog.
///
/// Resolution never fails: a name the catalog has not seen yet is recorded as
/// [`CatalogRef::Unresolved`] and may be resolved later once the schema grows.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum CatalogRef<I> {
    /// No name was supplied (only meaningful for node labels).
    Absent,
    /// A name was supplied but the catalog does not know it.
    Unresolved(String),
    /// The catalog mapped the name to an identifier.
    Resolved(I),
}

/// Label resolution state for a query-graph node.
pub type LabelRef = CatalogRef<LabelId>;

/// Relationship-type resolution state for a query-graph edge.
pub type RelTypeRef = CatalogRef<TypeId>;

impl<I: Copy> CatalogRef<I> {
    /// Builds a reference from a catalog lookup for `name`.
    pub fn from_lookup(name: &str, id: Option<I>) -> Self {
        match id {
            Some(id) => CatalogRef::Resolved(id),
            None => CatalogRef::Unresolved(name.to_owned()),
        }
    }

    /// Returns the resolved identifier, if any.
    pub fn id(&self) -> Option<I> {
        match self {
            CatalogRef::Resolved(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns `true` when a name was given but is not yet known to the catalog.
    pub fn is_unresolved(&self) -> bool {
        matches!(self, CatalogRef::Unresolved(_))
    }

    /// Returns `true` when no name was supplied at all.
    pub fn is_absent(&self) -> bool {
        matches!(self, CatalogRef::Absent)
    }
}

impl<I> Default for CatalogRef<I> {
    fn default() -> Self {
        CatalogRef::Absent
    }
}

impl<I: fmt::Display> fmt::Display for CatalogRef<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogRef::Absent => write!(f, "-"),
            CatalogRef::Unresolved(name) => write!(f, "?{name}"),
            CatalogRef::Resolved(id) => write!(f, "{id}"),
        }
    }
}
