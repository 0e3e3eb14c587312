use std::collections::BTreeSet;

use proptest::prelude::*;
use qgraph::query::ast::HopRange;
use qgraph::query::graph::hop_bounds;
use qgraph::query::metadata::EmptyMetadata;
use qgraph::query::{EdgeSpec, InMemoryMetadata, MetadataProvider, QgEdge};
use qgraph::{
    CatalogRef, HopLimit, LabelId, NodeId, PathBuilder, QueryGraph, SparseBoolMatrix, TypeId,
};

/// Label and relationship-type pools; the last entry of each is unknown to the catalog.
const LABELS: [&str; 3] = ["Person", "City", "Ghost"];
const RELTYPES: [&str; 3] = ["KNOWS", "LIVES_IN", "HAUNTS"];

#[derive(Debug, Clone)]
struct EdgeDecor {
    reltypes: Vec<usize>,
    hops: Option<(Option<u32>, Option<u32>)>,
    bidirectional: bool,
}

#[derive(Debug, Clone)]
struct Shape {
    nodes: usize,
    labels: Vec<Option<usize>>,
    edges: Vec<(usize, usize)>,
    decor: Vec<EdgeDecor>,
}

fn catalog() -> InMemoryMetadata {
    InMemoryMetadata::new()
        .with_label(LABELS[0], LabelId(1))
        .with_label(LABELS[1], LabelId(2))
        .with_edge_type(RELTYPES[0], TypeId(1))
        .with_edge_type(RELTYPES[1], TypeId(2))
}

fn arb_decor() -> impl Strategy<Value = EdgeDecor> {
    let hops = prop::option::of((prop::option::of(1u32..4), prop::option::of(0u32..3)));
    (prop::collection::vec(0..RELTYPES.len(), 0..=2), hops, any::<bool>()).prop_map(
        |(reltypes, hops, bidirectional)| EdgeDecor {
            reltypes,
            // End is an offset from the start so the range stays valid.
            hops: hops.map(|(start, delta)| (start, delta.map(|d| start.unwrap_or(1) + d))),
            bidirectional,
        },
    )
}

fn arb_shape() -> impl Strategy<Value = Shape> {
    (1usize..=8).prop_flat_map(|nodes| {
        let labels = prop::collection::vec(prop::option::of(0..LABELS.len()), nodes);
        let edges = prop::collection::vec(((0..nodes, 0..nodes), arb_decor()), 0..=12);
        (labels, edges).prop_map(move |(labels, edges)| {
            let (edges, decor) = edges.into_iter().unzip();
            Shape {
                nodes,
                labels,
                edges,
                decor,
            }
        })
    })
}

fn build(shape: &Shape) -> QueryGraph {
    let catalog = catalog();
    let mut graph = QueryGraph::new();
    let mut ids: Vec<NodeId> = Vec::with_capacity(shape.nodes);
    for (i, label) in shape.labels.iter().enumerate() {
        let id = graph.add_node(&format!("n{i}")).unwrap();
        if let Some(label) = label {
            graph.set_node_label(id, LABELS[*label], &catalog).unwrap();
        }
        ids.push(id);
    }
    for (i, ((src, dest), decor)) in shape.edges.iter().zip(&shape.decor).enumerate() {
        let (min_hops, max_hops) =
            hop_bounds(decor.hops.map(|(start, end)| HopRange::new(start, end)));
        let mut edge = QgEdge::new(format!("e{i}"), ids[*src], ids[*dest])
            .with_bidirectional(decor.bidirectional)
            .with_hops(min_hops, max_hops);
        for name in decor.reltypes.iter().map(|r| RELTYPES[*r]) {
            let id = CatalogRef::from_lookup(name, catalog.resolve_edge_type(name));
            edge = edge.with_reltype(name, id);
        }
        graph.add_edge(edge).unwrap();
    }
    graph
}

type NodeState = (String, Option<String>, CatalogRef<LabelId>);
type EdgeState = (String, String, String, Vec<CatalogRef<TypeId>>, u32, HopLimit, bool);

/// Everything a planner reads from the graph, keyed by alias.
fn catalog_state(graph: &QueryGraph) -> (Vec<NodeState>, Vec<EdgeState>) {
    let mut nodes: Vec<NodeState> = graph
        .nodes()
        .map(|(_, n)| {
            let label = n.label().map(str::to_owned);
            (n.alias().to_owned(), label, n.label_id().clone())
        })
        .collect();
    nodes.sort_by(|a, b| a.0.cmp(&b.0));
    let mut edges: Vec<EdgeState> = graph
        .edges()
        .map(|(id, e)| {
            let (src, dest) = graph.edge_endpoints(id).unwrap();
            (
                e.alias().to_owned(),
                src.to_owned(),
                dest.to_owned(),
                e.reltype_ids().to_vec(),
                e.min_hops(),
                e.max_hops(),
                e.is_bidirectional(),
            )
        })
        .collect();
    edges.sort_by(|a, b| a.0.cmp(&b.0));
    (nodes, edges)
}

fn node_aliases(graph: &QueryGraph) -> BTreeSet<String> {
    graph.nodes().map(|(_, n)| n.alias().to_owned()).collect()
}

fn edge_aliases(graph: &QueryGraph) -> BTreeSet<String> {
    graph.edges().map(|(_, e)| e.alias().to_owned()).collect()
}

proptest! {
    #[test]
    fn prop_path_node_count_matches_distinct_aliases(
        aliases in prop::collection::vec(0usize..5, 1..10)
    ) {
        let mut builder = PathBuilder::new().node(format!("v{}", aliases[0]).as_str());
        for (i, alias) in aliases.iter().enumerate().skip(1) {
            builder = builder.edge(
                EdgeSpec::named(format!("r{i}")),
                format!("v{alias}").as_str(),
            );
        }
        let path = builder.build().unwrap();
        let mut graph = QueryGraph::new();
        graph.add_path(&path, &EmptyMetadata).unwrap();

        let distinct: BTreeSet<_> = aliases.iter().collect();
        prop_assert_eq!(graph.node_count(), distinct.len());
        prop_assert_eq!(graph.edge_count(), aliases.len() - 1);
        prop_assert!(graph.is_connected());
        prop_assert!(graph.check_invariants().is_ok());
    }

    #[test]
    fn prop_components_partition_graph(shape in arb_shape()) {
        let graph = build(&shape);
        let components = graph.connected_components();

        let mut nodes = BTreeSet::new();
        let mut edges = BTreeSet::new();
        let mut node_total = 0;
        let mut edge_total = 0;
        for component in &components {
            prop_assert!(!component.is_empty());
            prop_assert!(component.is_connected());
            prop_assert!(component.check_invariants().is_ok());
            node_total += component.node_count();
            edge_total += component.edge_count();
            nodes.extend(node_aliases(component));
            edges.extend(edge_aliases(component));
        }
        prop_assert_eq!(node_total, graph.node_count());
        prop_assert_eq!(edge_total, graph.edge_count());
        prop_assert_eq!(nodes, node_aliases(&graph));
        prop_assert_eq!(edges, edge_aliases(&graph));
    }

    #[test]
    fn prop_clone_is_isomorphic_and_independent(shape in arb_shape()) {
        let graph = build(&shape);
        let before = graph.to_string();
        let mut copy = graph.clone();
        prop_assert_eq!(copy.to_string(), before.clone());
        prop_assert_eq!(catalog_state(&copy), catalog_state(&graph));

        let first = copy.require_node("n0").unwrap();
        copy.remove_node(first).unwrap();
        prop_assert_eq!(graph.to_string(), before);
        prop_assert!(graph.check_invariants().is_ok());
        prop_assert!(copy.check_invariants().is_ok());
    }

    #[test]
    fn prop_merge_is_idempotent(shape in arb_shape(), other in arb_shape()) {
        let mut graph = build(&shape);
        let other = build(&other);
        graph.merge(&other).unwrap();
        let once = graph.to_string();
        prop_assert!(graph.merge(&other).unwrap().is_noop());
        prop_assert_eq!(graph.to_string(), once);
        prop_assert!(graph.check_invariants().is_ok());

        let mut empty = QueryGraph::new();
        empty.merge(&other).unwrap();
        prop_assert_eq!(empty.to_string(), other.to_string());
        prop_assert_eq!(catalog_state(&empty), catalog_state(&other));
    }

    #[test]
    fn prop_remove_node_cascades(shape in arb_shape(), pick in any::<prop::sample::Index>()) {
        let mut graph = build(&shape);
        let victim = pick.index(shape.nodes);
        let incident = shape
            .edges
            .iter()
            .filter(|(s, d)| *s == victim || *d == victim)
            .count();
        let id = graph.require_node(&format!("n{victim}")).unwrap();
        graph.remove_node(id).unwrap();

        prop_assert_eq!(graph.node_count(), shape.nodes - 1);
        prop_assert_eq!(graph.edge_count(), shape.edges.len() - incident);
        for (_, edge) in graph.edges() {
            prop_assert!(edge.src() != id && edge.dest() != id);
        }
        prop_assert!(graph.check_invariants().is_ok());
    }

    #[test]
    fn prop_matrix_marks_distinct_pairs(shape in arb_shape()) {
        let graph = build(&shape);
        let matrix: SparseBoolMatrix = graph.to_boolean_matrix().unwrap();
        let pairs: BTreeSet<_> = shape.edges.iter().copied().collect();
        prop_assert_eq!(matrix.nrows(), shape.nodes);
        prop_assert_eq!(matrix.nnz(), pairs.len());
        for (src, dest) in pairs {
            prop_assert!(matrix.get(src, dest));
        }
    }
}
