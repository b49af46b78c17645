//! Integration tests for the graph engine.
//!
//! These tests exercise the public API end to end: the documented scenarios
//! plus property tests over randomly generated graphs.

use proptest::prelude::*;
use trellis_graph::{Error, Graph, MAX_WEIGHT, UnionFind};

/// Weighted undirected graph used across the shortest-path scenarios.
///
/// ```text
///        4       5       6
///    0 ----- 1 ----- 3 ----- 5
///     \      |     / |       |
///    2 \   1 |  8 /  | 2     | 3
///       \    |   /   |       |
///        +-- 2 -+    4 ------+
///             \______/
///                10
/// ```
fn scenario_graph() -> Graph {
    let mut graph = Graph::new(6, false);
    for (from, to, weight) in [
        (0, 1, 4.0),
        (0, 2, 2.0),
        (1, 2, 1.0),
        (1, 3, 5.0),
        (2, 3, 8.0),
        (2, 4, 10.0),
        (3, 4, 2.0),
        (3, 5, 6.0),
        (4, 5, 3.0),
    ] {
        graph.add_edge(from, to, weight).expect("valid edge");
    }
    graph
}

/// Equality up to a relative tolerance, so sums near [`MAX_WEIGHT`] compare
/// sensibly.
fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

fn path_weight(graph: &Graph, path: &[usize]) -> f64 {
    path.windows(2)
        .map(|pair| {
            graph
                .edges(pair[0])
                .unwrap()
                .iter()
                .filter(|edge| edge.to == pair[1])
                .map(|edge| edge.weight)
                .fold(f64::INFINITY, f64::min)
        })
        .sum()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn scenario_dijkstra_distances() {
    let graph = scenario_graph();
    assert_eq!(graph.vertex_count(), 6);
    assert_eq!(graph.edge_count(), 9);
    assert_eq!(
        graph.dijkstra(0).unwrap(),
        vec![0.0, 3.0, 2.0, 8.0, 10.0, 13.0]
    );
}

#[test]
fn scenario_shortest_path_matches_distance() {
    let graph = scenario_graph();
    let path = graph.shortest_path(0, 5).unwrap().expect("5 is reachable");

    assert_eq!(path.first(), Some(&0));
    assert_eq!(path.last(), Some(&5));
    assert_eq!(path_weight(&graph, &path), 13.0);
}

#[test]
fn scenario_union_find() {
    let mut sets = UnionFind::new(5);
    sets.unite(0, 1).unwrap();
    sets.unite(1, 2).unwrap();

    assert!(sets.connected(0, 2).unwrap());
    assert_eq!(sets.component_count(), 3);
}

#[test]
fn scenario_graph_structure() {
    let graph = scenario_graph();
    assert!(graph.is_connected());
    assert!(graph.has_cycle());
    assert!(!graph.is_bipartite());
    assert_eq!(graph.kruskal_mst().len(), 5);
    assert_eq!(graph.prim_mst().len(), 5);
}

#[test]
fn removing_bridge_disconnects_graph() {
    let mut graph = Graph::new(4, false);
    graph.add_edge(0, 1, 1.0).unwrap();
    graph.add_edge(1, 2, 1.0).unwrap();
    graph.add_edge(2, 3, 1.0).unwrap();

    assert_eq!(graph.remove_edge(1, 2).unwrap(), 1);
    assert_eq!(graph.edge_count(), 2);
    assert!(!graph.path_exists(0, 3).unwrap());
    assert_eq!(graph.shortest_path(0, 3).unwrap(), None);
    assert_eq!(graph.connected_components().len(), 2);
}

#[test]
fn out_of_range_queries_fail_explicitly() {
    let graph = scenario_graph();
    for result in [graph.bfs(6), graph.dfs(6)] {
        assert_eq!(
            result.unwrap_err(),
            Error::VertexOutOfRange {
                vertex: 6,
                vertex_count: 6
            }
        );
    }
    assert!(graph.dijkstra(10).is_err());
    assert!(graph.bellman_ford(10).is_err());
    assert!(graph.shortest_path(0, 10).is_err());
}

#[test]
fn graph_survives_json_serialization() {
    let graph = scenario_graph();
    let json = serde_json::to_string(&graph).unwrap();
    let restored: Graph = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, graph);
    assert_eq!(restored.dijkstra(0).unwrap(), graph.dijkstra(0).unwrap());
}

// ============================================================================
// Properties
// ============================================================================

/// Non-negative weights: mostly small integers, sometimes the largest
/// accepted weight.
fn arb_weight() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => (0u8..20).prop_map(f64::from),
        1 => Just(MAX_WEIGHT),
        1 => (1e140..=MAX_WEIGHT),
    ]
}

/// Random graph with up to 12 vertices and non-negative weights.
fn arb_graph() -> impl Strategy<Value = Graph> {
    (1usize..12, any::<bool>()).prop_flat_map(|(n, directed)| {
        prop::collection::vec((0..n, 0..n, arb_weight()), 0..30).prop_map(move |edges| {
            let mut graph = Graph::new(n, directed);
            for (from, to, weight) in edges {
                graph
                    .add_edge(from, to, weight)
                    .expect("generated edge is in range");
            }
            graph
        })
    })
}

/// Random graph paired with a valid vertex.
fn arb_graph_and_vertex() -> impl Strategy<Value = (Graph, usize)> {
    arb_graph().prop_flat_map(|graph| {
        let n = graph.vertex_count();
        (Just(graph), 0..n)
    })
}

/// Random graph paired with two valid vertices.
fn arb_graph_and_pair() -> impl Strategy<Value = (Graph, usize, usize)> {
    arb_graph().prop_flat_map(|graph| {
        let n = graph.vertex_count();
        (Just(graph), 0..n, 0..n)
    })
}

proptest! {
    #[test]
    fn traversals_visit_each_reachable_vertex_once((graph, start) in arb_graph_and_vertex()) {
        let bfs = graph.bfs(start).unwrap();
        let dfs = graph.dfs(start).unwrap();
        let dist = graph.dijkstra(start).unwrap();

        let mut reachable: Vec<usize> =
            (0..graph.vertex_count()).filter(|&v| dist[v].is_finite()).collect();
        let mut bfs_sorted = bfs.clone();
        let mut dfs_sorted = dfs.clone();
        bfs_sorted.sort_unstable();
        dfs_sorted.sort_unstable();
        reachable.sort_unstable();

        prop_assert_eq!(bfs[0], start);
        prop_assert_eq!(dfs[0], start);
        prop_assert_eq!(&bfs_sorted, &reachable);
        prop_assert_eq!(&dfs_sorted, &reachable);
    }

    #[test]
    fn dijkstra_agrees_with_bellman_ford((graph, start) in arb_graph_and_vertex()) {
        let fast = graph.dijkstra(start).unwrap();
        let slow = graph.bellman_ford(start).unwrap();

        prop_assert_eq!(fast[start], 0.0);
        for v in 0..graph.vertex_count() {
            if fast[v].is_finite() {
                prop_assert!(approx_eq(fast[v], slow[v]));
            } else {
                prop_assert!(slow[v].is_infinite());
            }
        }
    }

    #[test]
    fn shortest_path_is_consistent_with_reachability((graph, from, to) in arb_graph_and_pair()) {
        let path = graph.shortest_path(from, to).unwrap();
        let exists = graph.path_exists(from, to).unwrap();
        prop_assert_eq!(path.is_some(), exists);

        if let Some(path) = path {
            prop_assert_eq!(path[0], from);
            prop_assert_eq!(*path.last().unwrap(), to);
            let expected = graph.dijkstra(from).unwrap()[to];
            prop_assert!(expected.is_finite());
            prop_assert!(approx_eq(path_weight(&graph, &path), expected));
        }
    }

    #[test]
    fn components_partition_all_vertices(graph in arb_graph()) {
        let mut seen: Vec<usize> = graph.connected_components().into_iter().flatten().collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..graph.vertex_count()).collect::<Vec<_>>());

        let mut scc: Vec<usize> =
            graph.strongly_connected_components().into_iter().flatten().collect();
        scc.sort_unstable();
        prop_assert_eq!(scc, (0..graph.vertex_count()).collect::<Vec<_>>());
    }

    #[test]
    fn spanning_forests_have_equal_size_and_weight(graph in arb_graph()) {
        let kruskal = graph.kruskal_mst();
        let prim = graph.prim_mst();
        let expected_edges = graph.vertex_count() - graph.connected_components().len();

        prop_assert_eq!(kruskal.len(), expected_edges);
        prop_assert_eq!(prim.len(), expected_edges);

        let weight = |tree: &[(usize, usize)]| -> f64 {
            tree.iter()
                .map(|&(a, b)| {
                    let forward = graph.edges(a).unwrap().iter().filter(|e| e.to == b);
                    let backward = graph.edges(b).unwrap().iter().filter(|e| e.to == a);
                    forward.chain(backward).map(|e| e.weight).fold(f64::INFINITY, f64::min)
                })
                .sum()
        };
        prop_assert!(approx_eq(weight(&kruskal), weight(&prim)));
    }

    #[test]
    fn union_find_counts_successful_merges(
        n in 1usize..20,
        pairs in prop::collection::vec((0usize..20, 0usize..20), 0..40),
    ) {
        let mut sets = UnionFind::new(n);
        let mut graph = Graph::new(n, false);

        for (x, y) in pairs.into_iter().map(|(x, y)| (x % n, y % n)) {
            let before = sets.component_count();
            let merged = sets.unite(x, y).unwrap();
            prop_assert_eq!(sets.component_count(), before - usize::from(merged));
            graph.add_edge(x, y, 1.0).unwrap();
        }

        for x in 0..n {
            for y in 0..n {
                prop_assert_eq!(sets.connected(x, y).unwrap(), graph.path_exists(x, y).unwrap());
            }
        }
        prop_assert_eq!(sets.component_count(), graph.connected_components().len());
    }
}
