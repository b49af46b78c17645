//! Adjacency-list weighted graph.
//!
//! The graph stores one ordered edge list per vertex. Algorithms live in
//! submodules, each adding an `impl Graph` block:
//!
//! | Module | Operations |
//! |--------|------------|
//! | `traversal` | BFS, DFS, topological sort, reachability |
//! | `shortest_path` | Dijkstra, Bellman-Ford, Floyd-Warshall, path reconstruction |
//! | `analysis` | cycles, components, bipartiteness, strongly connected components |
//! | `spanning` | Kruskal and Prim minimum spanning trees |
//!
//! ## Edge Storage Convention
//!
//! For undirected graphs every logical edge `u - v` is stored twice: as
//! `v` in the list of `u` and as `u` in the list of `v`. The edge counter
//! counts the logical edge once. A self-loop on an undirected graph is
//! stored as two entries in the same list.

mod analysis;
mod shortest_path;
mod spanning;
mod traversal;

use crate::error::{Error, Result};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

/// Weight used by [`Graph::add_unweighted_edge`] and by edge-list loaders
/// when a record carries no weight.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Largest accepted edge-weight magnitude.
///
/// A simple path has fewer than `usize::MAX` edges, so with `|w| <= 1e150`
/// no path sum can leave the finite `f64` range (`1.8e19 * 1e150` is far
/// below `f64::MAX`). Distances therefore stay finite exactly when a path
/// exists.
pub const MAX_WEIGHT: f64 = 1e150;

/// Outgoing edge stored in a vertex's adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Target vertex index.
    pub to: usize,
    /// Edge weight.
    pub weight: f64,
}

impl Edge {
    /// Create an edge to `to` with the given weight.
    pub fn new(to: usize, weight: f64) -> Self {
        Self { to, weight }
    }
}

/// Weighted graph over dense vertex indices `0..vertex_count`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    /// Outgoing edges, indexed by source vertex.
    adjacency: Vec<Vec<Edge>>,

    /// Whether edges are one-way.
    directed: bool,

    /// Logical edge count (mirrored entries are not counted twice).
    edge_count: usize,
}

impl Graph {
    /// Create a graph with `vertex_count` isolated vertices.
    pub fn new(vertex_count: usize, directed: bool) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count],
            directed,
            edge_count: 0,
        }
    }

    /// Append an isolated vertex and return its index.
    pub fn add_vertex(&mut self) -> usize {
        self.adjacency.push(Vec::new());
        self.adjacency.len() - 1
    }

    /// Add an edge `from -> to`.
    ///
    /// Undirected graphs also store the mirrored `to -> from` entry. Parallel
    /// edges are allowed and are kept in insertion order.
    ///
    /// # Errors
    ///
    /// - [`Error::VertexOutOfRange`] if either endpoint does not exist
    /// - [`Error::InvalidWeight`] if `weight` is NaN, infinite, or larger in
    ///   magnitude than [`MAX_WEIGHT`]
    pub fn add_edge(&mut self, from: usize, to: usize, weight: f64) -> Result<()> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        if !weight.is_finite() || weight.abs() > MAX_WEIGHT {
            return Err(Error::InvalidWeight { from, to, weight });
        }

        self.adjacency[from].push(Edge::new(to, weight));
        if !self.directed {
            self.adjacency[to].push(Edge::new(from, weight));
        }
        self.edge_count += 1;
        Ok(())
    }

    /// Add an edge with [`DEFAULT_WEIGHT`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexOutOfRange`] if either endpoint does not exist.
    pub fn add_unweighted_edge(&mut self, from: usize, to: usize) -> Result<()> {
        self.add_edge(from, to, DEFAULT_WEIGHT)
    }

    /// Remove every `from -> to` edge (and the mirrors on undirected graphs).
    ///
    /// Returns the number of logical edges removed; the edge count drops by
    /// the same amount, so removing a missing edge leaves it unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexOutOfRange`] if either endpoint does not exist.
    pub fn remove_edge(&mut self, from: usize, to: usize) -> Result<usize> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;

        let before = self.adjacency[from].len();
        self.adjacency[from].retain(|edge| edge.to != to);
        let mut removed = before - self.adjacency[from].len();

        if !self.directed {
            if from == to {
                // Both halves of an undirected self-loop live in the same list.
                removed /= 2;
            } else {
                self.adjacency[to].retain(|edge| edge.to != from);
            }
        }

        self.edge_count -= removed;
        tracing::trace!(from, to, removed, "Removed edges");
        Ok(removed)
    }

    /// Whether at least one `from -> to` edge exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexOutOfRange`] if `from` does not exist.
    pub fn has_edge(&self, from: usize, to: usize) -> Result<bool> {
        Ok(self.edges(from)?.iter().any(|edge| edge.to == to))
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of logical edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Whether the graph is directed.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Targets of the outgoing edges of `vertex`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexOutOfRange`] if `vertex` does not exist.
    pub fn neighbors(&self, vertex: usize) -> Result<Vec<usize>> {
        Ok(self.edges(vertex)?.iter().map(|edge| edge.to).collect())
    }

    /// Outgoing edges of `vertex`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexOutOfRange`] if `vertex` does not exist.
    pub fn edges(&self, vertex: usize) -> Result<&[Edge]> {
        self.check_vertex(vertex)?;
        Ok(&self.adjacency[vertex])
    }

    /// Weight of the first `from -> to` edge, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexOutOfRange`] if `from` does not exist.
    pub fn edge_weight(&self, from: usize, to: usize) -> Result<Option<f64>> {
        Ok(self
            .edges(from)?
            .iter()
            .find(|edge| edge.to == to)
            .map(|edge| edge.weight))
    }

    /// Build a petgraph view of this graph.
    ///
    /// Node `i` carries the weight `i`, so node indices and vertex indices
    /// coincide. Undirected graphs produce both directions of every edge.
    pub fn to_petgraph(&self) -> DiGraph<usize, f64> {
        let stored_edges = self.adjacency.iter().map(Vec::len).sum();
        let mut graph = DiGraph::with_capacity(self.vertex_count(), stored_edges);
        for vertex in 0..self.vertex_count() {
            graph.add_node(vertex);
        }
        for (from, edges) in self.adjacency.iter().enumerate() {
            for edge in edges {
                graph.add_edge(NodeIndex::new(from), NodeIndex::new(edge.to), edge.weight);
            }
        }
        graph
    }

    pub(crate) fn check_vertex(&self, vertex: usize) -> Result<()> {
        if vertex < self.adjacency.len() {
            Ok(())
        } else {
            Err(Error::VertexOutOfRange {
                vertex,
                vertex_count: self.adjacency.len(),
            })
        }
    }

    /// Fail on the first negative weight. Dijkstra is only correct without them.
    pub(crate) fn ensure_non_negative(&self) -> Result<()> {
        for (from, edges) in self.adjacency.iter().enumerate() {
            if let Some(edge) = edges.iter().find(|edge| edge.weight < 0.0) {
                return Err(Error::NegativeWeight {
                    from,
                    to: edge.to,
                    weight: edge.weight,
                });
            }
        }
        Ok(())
    }

    /// Adjacency of the underlying undirected graph.
    ///
    /// Undirected graphs already store both directions; directed graphs get
    /// every edge mirrored.
    pub(crate) fn undirected_adjacency(&self) -> Vec<Vec<Edge>> {
        if !self.directed {
            return self.adjacency.clone();
        }
        let mut view = vec![Vec::new(); self.vertex_count()];
        for (from, edges) in self.adjacency.iter().enumerate() {
            for edge in edges {
                view[from].push(*edge);
                view[edge.to].push(Edge::new(from, edge.weight));
            }
        }
        view
    }

    pub(crate) fn adjacency(&self) -> &[Vec<Edge>] {
        &self.adjacency
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undirected_edge_is_mirrored_and_counted_once() {
        let mut graph = Graph::new(3, false);
        graph.add_edge(0, 1, 2.5).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors(0).unwrap(), vec![1]);
        assert_eq!(graph.neighbors(1).unwrap(), vec![0]);
        assert_eq!(graph.edge_weight(1, 0).unwrap(), Some(2.5));
    }

    #[test]
    fn directed_edge_is_one_way() {
        let mut graph = Graph::new(2, true);
        graph.add_unweighted_edge(0, 1).unwrap();

        assert!(graph.has_edge(0, 1).unwrap());
        assert!(!graph.has_edge(1, 0).unwrap());
        assert_eq!(graph.edge_weight(0, 1).unwrap(), Some(DEFAULT_WEIGHT));
        assert_eq!(graph.edge_weight(1, 0).unwrap(), None);
    }

    #[test]
    fn out_of_range_vertex_is_rejected() {
        let mut graph = Graph::new(2, true);

        let err = graph.add_edge(0, 2, 1.0).unwrap_err();
        assert_eq!(
            err,
            Error::VertexOutOfRange {
                vertex: 2,
                vertex_count: 2
            }
        );
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.neighbors(5).is_err());
    }

    #[test]
    fn non_finite_weight_is_rejected() {
        let mut graph = Graph::new(2, false);

        assert!(matches!(
            graph.add_edge(0, 1, f64::NAN),
            Err(Error::InvalidWeight { from: 0, to: 1, .. })
        ));
        assert!(graph.add_edge(0, 1, f64::INFINITY).is_err());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn oversized_weight_is_rejected() {
        let mut graph = Graph::new(3, true);

        assert!(matches!(
            graph.add_edge(0, 1, 1e308),
            Err(Error::InvalidWeight { from: 0, to: 1, .. })
        ));
        assert!(graph.add_edge(1, 2, -1e308).is_err());
        assert!(graph.add_edge(0, 1, MAX_WEIGHT).is_ok());
        assert!(graph.add_edge(1, 2, -MAX_WEIGHT).is_ok());
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn remove_edge_counts_logical_edges() {
        let mut graph = Graph::new(3, false);
        graph.add_edge(0, 1, 1.0).unwrap();
        graph.add_edge(0, 1, 3.0).unwrap();
        graph.add_edge(1, 2, 1.0).unwrap();

        assert_eq!(graph.remove_edge(1, 0).unwrap(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(!graph.has_edge(0, 1).unwrap());
        assert!(graph.has_edge(2, 1).unwrap());

        // Removing a missing edge is a no-op.
        assert_eq!(graph.remove_edge(0, 2).unwrap(), 0);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn remove_undirected_self_loop() {
        let mut graph = Graph::new(1, false);
        graph.add_edge(0, 0, 1.0).unwrap();
        assert_eq!(graph.edges(0).unwrap().len(), 2);

        assert_eq!(graph.remove_edge(0, 0).unwrap(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.edges(0).unwrap().is_empty());
    }

    #[test]
    fn add_vertex_returns_new_index() {
        let mut graph = Graph::default();
        assert_eq!(graph.add_vertex(), 0);
        assert_eq!(graph.add_vertex(), 1);
        assert_eq!(graph.vertex_count(), 2);
        assert!(!graph.is_directed());
    }

    #[test]
    fn petgraph_view_matches_adjacency() {
        let mut graph = Graph::new(3, false);
        graph.add_edge(0, 1, 1.0).unwrap();
        graph.add_edge(1, 2, 4.0).unwrap();

        let view = graph.to_petgraph();
        assert_eq!(view.node_count(), 3);
        assert_eq!(view.edge_count(), 4);
        assert_eq!(view[NodeIndex::new(2)], 2);
    }

    #[test]
    fn negative_weight_is_reported_with_its_edge() {
        let mut graph = Graph::new(3, true);
        graph.add_edge(0, 1, 1.0).unwrap();
        graph.add_edge(1, 2, -2.0).unwrap();

        assert_eq!(
            graph.ensure_non_negative().unwrap_err(),
            Error::NegativeWeight {
                from: 1,
                to: 2,
                weight: -2.0
            }
        );
    }
}
