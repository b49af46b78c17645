//! Query results in a shape both output modes can render.

use serde::Serialize;

/// Minimum spanning tree algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MstAlgorithm {
    /// Sort edges, join trees with union-find.
    #[default]
    Kruskal,
    /// Grow trees from a priority queue.
    Prim,
}

/// One edge of a spanning forest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TreeEdge {
    /// Endpoint already in the tree.
    pub from: usize,
    /// Endpoint added by this edge.
    pub to: usize,
    /// Edge weight.
    pub weight: f64,
}

/// Summary of a loaded graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    /// Number of vertices.
    pub vertices: usize,
    /// Number of logical edges.
    pub edges: usize,
    /// Whether edges are directed.
    pub directed: bool,
    /// Whether the graph is (weakly) connected.
    pub connected: bool,
    /// Number of (weakly) connected components.
    pub components: usize,
    /// Whether the graph contains a cycle.
    pub has_cycle: bool,
    /// Whether the graph is two-colorable.
    pub bipartite: bool,
}

/// Result of one graph query.
///
/// Unreachable distances are `None`, which serializes as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "query", rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum GraphReport {
    Stats(GraphStats),
    Bfs {
        start: usize,
        order: Vec<usize>,
    },
    Dfs {
        start: usize,
        order: Vec<usize>,
    },
    Topo {
        order: Vec<usize>,
        /// False when the graph has a cycle; the order is then not a valid
        /// topological order.
        acyclic: bool,
    },
    Dijkstra {
        start: usize,
        distances: Vec<Option<f64>>,
    },
    BellmanFord {
        start: usize,
        distances: Vec<Option<f64>>,
    },
    FloydWarshall {
        distances: Vec<Vec<Option<f64>>>,
    },
    Path {
        from: usize,
        to: usize,
        path: Option<Vec<usize>>,
        distance: Option<f64>,
    },
    Components {
        components: Vec<Vec<usize>>,
    },
    Scc {
        components: Vec<Vec<usize>>,
    },
    Cycle {
        has_cycle: bool,
    },
    Bipartite {
        bipartite: bool,
    },
    Mst {
        algorithm: MstAlgorithm,
        edges: Vec<TreeEdge>,
        total_weight: f64,
    },
}

/// Map infinite distances to `None`.
pub fn finite_distances(distances: Vec<f64>) -> Vec<Option<f64>> {
    distances
        .into_iter()
        .map(|d| d.is_finite().then_some(d))
        .collect()
}
