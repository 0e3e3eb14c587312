//! Metadata resolution helpers bridging schema names to catalog identifiers.
//!
//! The query graph records labels and relationship types by name and caches
//! their catalog identifiers. Planning stages need the identifiers to pick
//! label scans and typed adjacency operators, so resolution happens while the
//! graph is built. A name the catalog does not know yet is not an error: the
//! graph records it as unresolved and
//! [`QueryGraph::resolve_unknown_ids`](crate::query::graph::QueryGraph::resolve_unknown_ids)
//! can retry once the schema has grown.

use std::collections::HashMap;

use crate::types::{LabelId, TypeId};

/// Schema namespace searched by a lookup.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SchemaKind {
    /// Node labels.
    Label,
    /// Relationship types.
    RelType,
}

/// Provides name-to-identifier resolution for query-graph construction.
pub trait MetadataProvider {
    /// Resolves a label name to its numeric identifier.
    fn resolve_label(&self, name: &str) -> Option<LabelId>;
    /// Resolves a relationship type name to its numeric identifier.
    fn resolve_edge_type(&self, name: &str) -> Option<TypeId>;

    /// Resolves `name` in the namespace selected by `kind`.
    fn resolve(&self, name: &str, kind: SchemaKind) -> Option<u32> {
        match kind {
            SchemaKind::Label => self.resolve_label(name).map(|id| id.0),
            SchemaKind::RelType => self.resolve_edge_type(name).map(|id| id.0),
        }
    }
}

impl<M: MetadataProvider + ?Sized> MetadataProvider for &M {
    fn resolve_label(&self, name: &str) -> Option<LabelId> {
        (**self).resolve_label(name)
    }

    fn resolve_edge_type(&self, name: &str) -> Option<TypeId> {
        (**self).resolve_edge_type(name)
    }
}

/// Catalog that knows no names; every lookup comes back unresolved.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyMetadata;

impl MetadataProvider for EmptyMetadata {
    fn resolve_label(&self, _name: &str) -> Option<LabelId> {
        None
    }

    fn resolve_edge_type(&self, _name: &str) -> Option<TypeId> {
        None
    }
}

/// Simple in-memory metadata provider used for tests or prototyping.
#[derive(Clone, Debug, Default)]
pub struct InMemoryMetadata {
    labels: HashMap<String, LabelId>,
    edge_types: HashMap<String, TypeId>,
}

impl InMemoryMetadata {
    /// Creates a new empty in-memory metadata provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a label name with its identifier.
    pub fn with_label(mut self, name: impl Into<String>, id: LabelId) -> Self {
        self.labels.insert(name.into(), id);
        self
    }

    /// Registers an edge type name with its identifier.
    pub fn with_edge_type(mut self, name: impl Into<String>, id: TypeId) -> Self {
        self.edge_types.insert(name.into(), id);
        self
    }

    /// Registers a label on an existing provider (schema grew after planning began).
    pub fn add_label(&mut self, name: impl Into<String>, id: LabelId) {
        self.labels.insert(name.into(), id);
    }

    /// Registers an edge type on an existing provider.
    pub fn add_edge_type(&mut self, name: impl Into<String>, id: TypeId) {
        self.edge_types.insert(name.into(), id);
    }
}

impl MetadataProvider for InMemoryMetadata {
    fn resolve_label(&self, name: &str) -> Option<LabelId> {
        self.labels.get(name).copied()
    }

    fn resolve_edge_type(&self, name: &str) -> Option<TypeId> {
        self.edge_types.get(name).copied()
    }
}
