//! Query-graph model for the Sombra query compiler.
//!
//! Builds the pattern graph of a statement from parsed path descriptors,
//! supports clone/merge/removal under alias identity, decomposes the graph
//! into connected components and projects it onto a boolean adjacency
//! matrix.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod query;
pub mod types;

pub use config::GraphLimits;
pub use error::{EntityKind, QueryGraphError};
pub use query::graph::{BoolMatrix, HopLimit, SparseBoolMatrix};
pub use query::{PathBuilder, QueryGraph};
pub use types::{CatalogRef, EdgeId, LabelId, NodeId, Result, TypeId};
