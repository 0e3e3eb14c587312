#![allow(clippy::uninlined_format_args)]

use std::sync::Once;

use qgraph::query::ast::{EdgeDirection, HopRange};
use qgraph::query::{EdgeSpec, InMemoryMetadata, MetadataProvider, NodeTarget};
use qgraph::{
    BoolMatrix, CatalogRef, GraphLimits, HopLimit, LabelId, PathBuilder, QueryGraph,
    QueryGraphError, SparseBoolMatrix, TypeId,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("qgraph=debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .try_init();
    });
}

fn catalog() -> InMemoryMetadata {
    InMemoryMetadata::new()
        .with_label("Person", LabelId(1))
        .with_edge_type("KNOWS", TypeId(7))
}

fn knows_chain() -> QueryGraph {
    let path = PathBuilder::new()
        .node("a")
        .edge(("r", "KNOWS"), "b")
        .edge(("s", "KNOWS"), "c")
        .build()
        .unwrap();
    let mut graph = QueryGraph::new();
    graph.add_path(&path, &catalog()).unwrap();
    graph
}

fn endpoints(graph: &QueryGraph, alias: &str) -> (String, String) {
    let id = graph.require_edge(alias).unwrap();
    let (src, dest) = graph.edge_endpoints(id).unwrap();
    (src.to_owned(), dest.to_owned())
}

/// Dense backend, standing in for an external matrix library.
#[derive(Debug)]
struct DenseMatrix {
    cells: Vec<Vec<bool>>,
}

impl BoolMatrix for DenseMatrix {
    type Error = String;

    fn new(nrows: usize, ncols: usize) -> Result<Self, String> {
        Ok(Self {
            cells: vec![vec![false; ncols]; nrows],
        })
    }

    fn set_entry(&mut self, row: usize, col: usize) -> Result<(), String> {
        let cell = self
            .cells
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or_else(|| format!("({row}, {col}) out of range"))?;
        *cell = true;
        Ok(())
    }
}

/// Backend that refuses to allocate.
#[derive(Debug)]
struct FullMatrix;

impl BoolMatrix for FullMatrix {
    type Error = &'static str;

    fn new(_: usize, _: usize) -> Result<Self, &'static str> {
        Err("out of memory")
    }

    fn set_entry(&mut self, _: usize, _: usize) -> Result<(), &'static str> {
        Ok(())
    }
}

#[test]
fn single_path_builds_connected_chain() {
    init_tracing();
    let graph = knows_chain();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.connected_components().len(), 1);
    assert_eq!(endpoints(&graph, "r"), ("a".into(), "b".into()));
    assert_eq!(endpoints(&graph, "s"), ("b".into(), "c".into()));
    let r = graph.edge_by_alias("r").unwrap();
    assert_eq!(r.reltype_ids(), [CatalogRef::Resolved(TypeId(7))]);
    graph.check_invariants().unwrap();
}

#[test]
fn disjoint_paths_yield_two_components() {
    init_tracing();
    let first = PathBuilder::new()
        .node("a")
        .edge(EdgeSpec::named("r"), "b")
        .build()
        .unwrap();
    let second = PathBuilder::new()
        .node("c")
        .edge(EdgeSpec::named("s"), "d")
        .build()
        .unwrap();
    let mut graph = QueryGraph::new();
    graph.add_path(&first, &catalog()).unwrap();
    graph.add_path(&second, &catalog()).unwrap();

    let components = graph.connected_components();
    assert_eq!(components.len(), 2);
    for component in &components {
        assert_eq!(component.node_count(), 2);
        assert_eq!(component.edge_count(), 1);
    }
    let mut aliases: Vec<_> = components
        .iter()
        .flat_map(|c| {
            c.nodes()
                .map(|(_, n)| n.alias().to_owned())
                .collect::<Vec<_>>()
        })
        .collect();
    aliases.sort();
    assert_eq!(aliases, ["a", "b", "c", "d"]);
}

#[test]
fn left_pointing_relationship_swaps_endpoints() {
    let path = PathBuilder::new()
        .node("b")
        .direction(EdgeDirection::In)
        .edge(EdgeSpec::named("r"), "a")
        .build()
        .unwrap();
    let mut graph = QueryGraph::new();
    graph.add_path(&path, &catalog()).unwrap();
    assert_eq!(endpoints(&graph, "r"), ("a".into(), "b".into()));
    assert!(!graph.edge_by_alias("r").unwrap().is_bidirectional());
}

#[test]
fn variable_length_ranges() {
    let cases = [
        (HopRange::new(Some(2), Some(5)), 2, HopLimit::Bounded(5)),
        (HopRange::new(Some(3), None), 3, HopLimit::Unbounded),
        (HopRange::any(), 1, HopLimit::Unbounded),
        (HopRange::exact(4), 4, HopLimit::Bounded(4)),
    ];
    for (range, min, max) in cases {
        let path = PathBuilder::new()
            .node("a")
            .hops(range)
            .edge(EdgeSpec::named("r"), "b")
            .build()
            .unwrap();
        let mut graph = QueryGraph::new();
        graph.add_path(&path, &catalog()).unwrap();
        let r = graph.edge_by_alias("r").unwrap();
        assert_eq!(r.min_hops(), min, "{:?}", range);
        assert_eq!(r.max_hops(), max, "{:?}", range);
        assert!(r.is_variable_length());
    }
}

#[test]
fn shared_alias_across_paths_is_one_node() {
    let first = PathBuilder::new()
        .node(("a", "Person"))
        .edge(("r", "KNOWS"), "b")
        .build()
        .unwrap();
    let second = PathBuilder::new()
        .node("a")
        .edge(("s", "KNOWS"), "c")
        .build()
        .unwrap();

    let graph =
        QueryGraph::from_paths([&first, &second], &catalog(), GraphLimits::default()).unwrap();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.nodes().filter(|(_, n)| n.alias() == "a").count(), 1);
    let a = graph.require_node("a").unwrap();
    assert_eq!(graph.node(a).unwrap().out_degree(), 2);
    assert_eq!(
        graph.node(a).unwrap().label_id(),
        &CatalogRef::Resolved(LabelId(1))
    );
}

#[test]
fn anonymous_nodes_of_separate_paths_are_separate_nodes() {
    let person = PathBuilder::new().node(NodeTarget::labeled("Person")).build().unwrap();
    let city = PathBuilder::new().node(NodeTarget::labeled("City")).build().unwrap();

    let graph =
        QueryGraph::from_paths([&person, &city], &catalog(), GraphLimits::default()).unwrap();
    assert_eq!(graph.node_count(), 2);
    let mut labels: Vec<_> = graph.nodes().filter_map(|(_, n)| n.label()).collect();
    labels.sort_unstable();
    assert_eq!(labels, ["City", "Person"]);
    assert_eq!(graph.connected_components().len(), 2);
}

#[test]
fn matrix_projection_of_chain() {
    let graph = knows_chain();
    let ordinal = |alias: &str| {
        graph
            .node_ordinals()
            .into_iter()
            .find(|(a, _)| *a == alias)
            .map(|(_, o)| o)
            .unwrap()
    };

    let sparse: SparseBoolMatrix = graph.to_boolean_matrix().unwrap();
    assert_eq!((sparse.nrows(), sparse.ncols()), (3, 3));
    assert_eq!(sparse.nnz(), 2);
    assert!(sparse.get(ordinal("a"), ordinal("b")));
    assert!(sparse.get(ordinal("b"), ordinal("c")));

    let dense: DenseMatrix = graph.to_boolean_matrix().unwrap();
    let set: Vec<(usize, usize)> = dense
        .cells
        .iter()
        .enumerate()
        .flat_map(|(row, cols)| {
            cols.iter()
                .enumerate()
                .filter(|(_, v)| **v)
                .map(move |(col, _)| (row, col))
        })
        .collect();
    assert_eq!(set, sparse.iter().collect::<Vec<_>>());
}

#[test]
fn matrix_backend_errors_are_wrapped() {
    let err = knows_chain().to_boolean_matrix::<FullMatrix>().unwrap_err();
    assert_eq!(err, QueryGraphError::Matrix("out of memory".into()));
    assert_eq!(err.code(), "Matrix");
}

#[test]
fn empty_graph_projects_to_empty_matrix() {
    let m: SparseBoolMatrix = QueryGraph::new().to_boolean_matrix().unwrap();
    assert_eq!((m.nrows(), m.ncols(), m.nnz()), (0, 0, 0));
}

#[test]
fn catalog_outcomes_are_three_way() {
    let path = PathBuilder::new()
        .node(("p", "Person"))
        .edge(EdgeSpec::named("r").reltype("KNOWS").reltype("OWES"), "q")
        .edge("KNOWS", NodeTarget::labeled("Alien"))
        .build()
        .unwrap();
    let mut graph = QueryGraph::new();
    graph.add_path(&path, &catalog()).unwrap();

    assert_eq!(
        graph.node_by_alias("p").unwrap().label_id(),
        &CatalogRef::Resolved(LabelId(1))
    );
    assert!(graph.node_by_alias("q").unwrap().label_id().is_absent());
    let alien = graph
        .nodes()
        .find(|(_, n)| n.label() == Some("Alien"))
        .map(|(_, n)| n)
        .unwrap();
    assert_eq!(alien.label_id(), &CatalogRef::Unresolved("Alien".into()));

    let r = graph.edge_by_alias("r").unwrap();
    assert_eq!(r.reltypes(), ["KNOWS".to_owned(), "OWES".to_owned()]);
    assert_eq!(r.reltype_ids()[0].id(), Some(TypeId(7)));
    assert!(r.reltype_ids()[1].is_unresolved());
}

#[test]
fn catalog_can_be_borrowed_or_boxed() {
    let owned = catalog();
    let boxed: Box<dyn MetadataProvider> = Box::new(catalog());
    let path = PathBuilder::new().node(("a", "Person")).build().unwrap();

    let mut first = QueryGraph::new();
    first.add_path(&path, &&owned).unwrap();
    let mut second = QueryGraph::new();
    second.add_path(&path, boxed.as_ref()).unwrap();
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn strict_limits_reject_wide_type_lists() {
    init_tracing();
    let mut spec = EdgeSpec::named("r");
    for i in 0..=GraphLimits::strict().max_reltypes_per_edge {
        spec = spec.reltype(format!("T{i}"));
    }
    let path = PathBuilder::new().node("a").edge(spec, "b").build().unwrap();
    let mut graph = QueryGraph::with_limits(GraphLimits::strict());
    let err = graph.add_path(&path, &catalog()).unwrap_err();
    assert!(matches!(err, QueryGraphError::PatternTooLarge { .. }));
    assert!(graph.is_empty());

    let mut unbounded = QueryGraph::with_limits(GraphLimits::unbounded());
    unbounded.add_path(&path, &catalog()).unwrap();
    assert_eq!(unbounded.edge_by_alias("r").unwrap().reltype_count(), 17);
}

#[test]
fn components_of_merged_clones_match_input() {
    let mut graph = knows_chain();
    let island = PathBuilder::new()
        .node("x")
        .undirected()
        .edge(EdgeSpec::named("t"), "y")
        .build()
        .unwrap();
    let mut other = QueryGraph::new();
    other.add_path(&island, &catalog()).unwrap();

    let stats = graph.merge(&other).unwrap();
    assert_eq!((stats.nodes_added, stats.edges_added), (2, 1));

    let components = graph.connected_components();
    assert_eq!(components.len(), 2);
    let mut rebuilt = QueryGraph::new();
    for component in &components {
        rebuilt.merge(component).unwrap();
    }
    assert_eq!(rebuilt.to_string(), graph.to_string());
}
