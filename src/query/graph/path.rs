//! Construction of a query graph from pattern paths.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::config::GraphLimits;
use crate::error::QueryGraphError;
use crate::query::ast::{EdgeDirection, EdgePattern, NodePattern, PathElement, PathPattern};
use crate::query::builder::{anon_alias, is_anon_alias};
use crate::query::metadata::MetadataProvider;
use crate::types::{CatalogRef, NodeId, Result};

use super::edge::{hop_bounds, HopLimit};
use super::{QgEdge, QgNode, QueryGraph};

/// A path split into its leading node and the `(edge, node)` steps after it.
struct PathSteps<'a> {
    head: &'a NodePattern,
    steps: Vec<(&'a EdgePattern, &'a NodePattern)>,
    /// Anonymous aliases rebound to fresh names, keyed by the written alias.
    renames: FxHashMap<&'a str, String>,
}

impl<'a> PathSteps<'a> {
    fn nodes(&self) -> impl Iterator<Item = &'a NodePattern> + '_ {
        std::iter::once(self.head).chain(self.steps.iter().map(|&(_, node)| node))
    }

    fn edges(&self) -> impl Iterator<Item = &'a EdgePattern> + '_ {
        self.steps.iter().map(|&(edge, _)| edge)
    }

    /// Alias under which a written alias is bound in the graph.
    fn alias<'s>(&'s self, written: &'s str) -> &'s str {
        self.renames.get(written).map_or(written, String::as_str)
    }
}

fn split_path(path: &PathPattern) -> Result<PathSteps<'_>> {
    let Some((first, rest)) = path.elements.split_first() else {
        return Err(QueryGraphError::MalformedPath {
            reason: "path has no elements",
        });
    };
    let PathElement::Node(head) = first else {
        return Err(QueryGraphError::MalformedPath {
            reason: "path must start with a node",
        });
    };
    let chunks = rest.chunks_exact(2);
    if !chunks.remainder().is_empty() {
        return Err(QueryGraphError::MalformedPath {
            reason: "path must end with a node",
        });
    }
    let mut steps = Vec::with_capacity(rest.len() / 2);
    for chunk in chunks {
        match chunk {
            [PathElement::Edge(edge), PathElement::Node(node)] => steps.push((edge, node)),
            _ => {
                return Err(QueryGraphError::MalformedPath {
                    reason: "nodes and relationships must alternate",
                })
            }
        }
    }
    Ok(PathSteps {
        head,
        steps,
        renames: FxHashMap::default(),
    })
}

impl QueryGraph {
    /// Builds one graph from every path of a statement.
    pub fn from_paths<'a, I>(
        paths: I,
        catalog: &dyn MetadataProvider,
        limits: GraphLimits,
    ) -> Result<QueryGraph>
    where
        I: IntoIterator<Item = &'a PathPattern>,
    {
        let mut graph = QueryGraph::with_limits(limits);
        for path in paths {
            graph.add_path(path, catalog)?;
        }
        Ok(graph)
    }

    /// Adds the nodes and relationships of `path` to the graph.
    ///
    /// Nodes are matched by alias and created on first sight; a label is
    /// attached the first time one is seen for an alias. Every relationship
    /// creates a new edge, so a relationship alias already bound in the graph
    /// is rejected. Left-pointing relationships are stored with their logical
    /// source as `src`; undirected ones keep the written order and are
    /// flagged bidirectional.
    ///
    /// Generated anonymous aliases (`_anon_N`) never join existing entities:
    /// one that is already bound is renamed to a fresh anonymous alias,
    /// consistently for every occurrence in the path.
    ///
    /// The path is validated in full before the graph is touched: on error
    /// the graph is unchanged.
    pub fn add_path(&mut self, path: &PathPattern, catalog: &dyn MetadataProvider) -> Result<()> {
        let mut parts = split_path(path)?;
        parts.renames = self.anon_renames(&parts);
        self.validate_steps(&parts)?;

        let head = parts.head;
        let mut left = self.ensure_node(parts.alias(&head.alias), head, catalog)?;
        for &(edge, node) in &parts.steps {
            let right = self.ensure_node(parts.alias(&node.alias), node, catalog)?;
            let (src, dest) = match edge.direction {
                EdgeDirection::In => (right, left),
                EdgeDirection::Out | EdgeDirection::Both => (left, right),
            };
            let alias = parts.alias(&edge.alias);
            let (min_hops, max_hops) = hop_bounds(edge.hops);
            let mut qg_edge = QgEdge::new(alias, src, dest)
                .with_bidirectional(edge.direction == EdgeDirection::Both)
                .with_hops(min_hops, max_hops);
            for name in &edge.reltypes {
                let id = CatalogRef::from_lookup(name, catalog.resolve_edge_type(name));
                if id.is_unresolved() {
                    debug!(alias, reltype = %name, "query_graph.reltype.unresolved");
                }
                qg_edge = qg_edge.with_reltype(name.as_str(), id);
            }
            self.push_edge(qg_edge)?;
            left = right;
        }
        Ok(())
    }

    /// Fresh names for the anonymous aliases of `parts` already bound here.
    fn anon_renames<'a>(&self, parts: &PathSteps<'a>) -> FxHashMap<&'a str, String> {
        let written: FxHashSet<&str> = parts
            .nodes()
            .map(|n| n.alias.as_str())
            .chain(parts.edges().map(|e| e.alias.as_str()))
            .collect();
        let bound = |alias: &str| self.contains_node(alias) || self.contains_edge(alias);

        let mut renames = FxHashMap::default();
        let mut next = 0;
        let aliases = parts
            .nodes()
            .map(|n| n.alias.as_str())
            .chain(parts.edges().map(|e| e.alias.as_str()));
        for alias in aliases {
            if !is_anon_alias(alias) || renames.contains_key(alias) || !bound(alias) {
                continue;
            }
            let fresh = loop {
                let candidate = anon_alias(next);
                next += 1;
                if !bound(&candidate) && !written.contains(candidate.as_str()) {
                    break candidate;
                }
            };
            debug!(alias, renamed = %fresh, "query_graph.anon.renamed");
            renames.insert(alias, fresh);
        }
        renames
    }

    fn validate_steps(&self, parts: &PathSteps<'_>) -> Result<()> {
        let mut new_nodes = FxHashSet::default();
        for node in parts.nodes() {
            let alias = parts.alias(&node.alias);
            if !self.contains_node(alias) {
                new_nodes.insert(alias);
            }
        }
        let mut seen_edges = FxHashSet::default();
        for edge in parts.edges() {
            let alias = parts.alias(&edge.alias);
            if self.contains_edge(alias) || !seen_edges.insert(alias) {
                return Err(QueryGraphError::duplicate_edge(alias));
            }
            if let (start, HopLimit::Bounded(end)) = hop_bounds(edge.hops) {
                if start > end {
                    return Err(QueryGraphError::InvalidHopRange {
                        alias: alias.to_owned(),
                        start,
                        end,
                    });
                }
            }
            self.ensure_reltype_budget(edge.reltypes.len())?;
        }
        self.ensure_node_budget(new_nodes.len())?;
        self.ensure_edge_budget(parts.steps.len())
    }

    /// Returns the node bound to `alias`, creating it and attaching the
    /// descriptor's label as needed.
    fn ensure_node(
        &mut self,
        alias: &str,
        pattern: &NodePattern,
        catalog: &dyn MetadataProvider,
    ) -> Result<NodeId> {
        let id = match self.node_id_by_alias(alias) {
            Some(id) => id,
            None => self.push_node(QgNode::new(alias))?,
        };
        if let Some(label) = pattern.label.as_deref() {
            self.set_node_label(id, label, catalog)?;
        }
        Ok(id)
    }
}
