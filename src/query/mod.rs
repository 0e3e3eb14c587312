#![forbid(unsafe_code)]

//! Query-graph layer of the query compiler.
//!
//! Pattern descriptors produced by the parser are folded into a
//! [`QueryGraph`], which planning stages consume to pick a traversal order.
//! The graph can be split into independently plannable connected components
//! and projected onto a boolean adjacency matrix for the algebra layer.

/// Pattern descriptors handed over by the parser.
pub mod ast;

/// Fluent builder for path descriptors.
pub mod builder;

/// Query graph model, decomposition and matrix projection.
pub mod graph;

/// Catalog lookups resolving label and relationship-type names.
pub mod metadata;

pub use builder::{EdgeSpec, NodeTarget, PathBuilder};
pub use graph::{MergeStats, QgEdge, QgNode, QueryGraph};
pub use metadata::{InMemoryMetadata, MetadataProvider};
