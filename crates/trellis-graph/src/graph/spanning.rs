//! Minimum spanning trees.
//!
//! Both algorithms treat the graph as undirected and return a minimum
//! spanning forest when the graph is disconnected: one tree per
//! (weakly) connected component, `vertex_count - components` edges in total.

use super::Graph;
use crate::union_find::UnionFind;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

impl Graph {
    /// Kruskal's algorithm: edges in ascending weight order, joined with a
    /// [`UnionFind`] whenever they connect two different trees.
    ///
    /// Returns the chosen edges as `(from, to)` pairs in selection order.
    /// Equal weights keep insertion order.
    pub fn kruskal_mst(&self) -> Vec<(usize, usize)> {
        let mut candidates: Vec<(f64, usize, usize)> = Vec::new();
        for (from, edges) in self.adjacency().iter().enumerate() {
            for edge in edges {
                // Undirected graphs store each edge twice; keep one copy.
                if self.is_directed() || from <= edge.to {
                    candidates.push((edge.weight, from, edge.to));
                }
            }
        }
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut forest = UnionFind::new(self.vertex_count());
        let mut tree = Vec::with_capacity(self.vertex_count().saturating_sub(1));
        for (_, from, to) in candidates {
            if forest.merge(from, to) {
                tree.push((from, to));
            }
        }

        tracing::debug!(
            vertices = self.vertex_count(),
            tree_edges = tree.len(),
            "Kruskal MST finished"
        );
        tree
    }

    /// Prim's algorithm grown from each unvisited vertex in index order.
    ///
    /// Returns `(parent, child)` pairs in the order vertices join the tree.
    pub fn prim_mst(&self) -> Vec<(usize, usize)> {
        let adjacency = self.undirected_adjacency();
        let mut in_tree = vec![false; self.vertex_count()];
        let mut tree = Vec::with_capacity(self.vertex_count().saturating_sub(1));
        let mut frontier: BinaryHeap<Reverse<(OrderedFloat<f64>, usize, usize)>> =
            BinaryHeap::new();

        for root in 0..self.vertex_count() {
            if in_tree[root] {
                continue;
            }
            in_tree[root] = true;
            for edge in &adjacency[root] {
                frontier.push(Reverse((OrderedFloat(edge.weight), root, edge.to)));
            }

            while let Some(Reverse((_, parent, child))) = frontier.pop() {
                if in_tree[child] {
                    continue;
                }
                in_tree[child] = true;
                tree.push((parent, child));
                for edge in &adjacency[child] {
                    if !in_tree[edge.to] {
                        frontier.push(Reverse((OrderedFloat(edge.weight), child, edge.to)));
                    }
                }
            }
        }

        tracing::debug!(
            vertices = self.vertex_count(),
            tree_edges = tree.len(),
            "Prim MST finished"
        );
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_weight(graph: &Graph, tree: &[(usize, usize)]) -> f64 {
        tree.iter()
            .map(|&(from, to)| graph.edge_weight(from, to).unwrap().unwrap())
            .sum()
    }

    fn weighted_square() -> Graph {
        // 0 --1-- 1
        // |     / |
        // 4   2   3
        // | /     |
        // 2 --5-- 3
        let mut graph = Graph::new(4, false);
        graph.add_edge(0, 1, 1.0).unwrap();
        graph.add_edge(1, 2, 2.0).unwrap();
        graph.add_edge(1, 3, 3.0).unwrap();
        graph.add_edge(0, 2, 4.0).unwrap();
        graph.add_edge(2, 3, 5.0).unwrap();
        graph
    }

    #[test]
    fn kruskal_picks_cheapest_edges() {
        let graph = weighted_square();
        let tree = graph.kruskal_mst();
        assert_eq!(tree, vec![(0, 1), (1, 2), (1, 3)]);
        assert_eq!(tree_weight(&graph, &tree), 6.0);
    }

    #[test]
    fn prim_matches_kruskal_weight() {
        let graph = weighted_square();
        let tree = graph.prim_mst();
        assert_eq!(tree, vec![(0, 1), (1, 2), (1, 3)]);
        assert_eq!(tree_weight(&graph, &tree), 6.0);
    }

    #[test]
    fn disconnected_graph_yields_spanning_forest() {
        let mut graph = Graph::new(5, false);
        graph.add_edge(0, 1, 1.0).unwrap();
        graph.add_edge(2, 3, 1.0).unwrap();
        graph.add_edge(3, 4, 2.0).unwrap();
        graph.add_edge(2, 4, 9.0).unwrap();

        assert_eq!(graph.kruskal_mst().len(), 3);
        assert_eq!(graph.prim_mst(), vec![(0, 1), (2, 3), (3, 4)]);
    }

    #[test]
    fn directed_edges_are_treated_as_undirected() {
        let mut graph = Graph::new(3, true);
        graph.add_edge(1, 0, 1.0).unwrap();
        graph.add_edge(2, 0, 1.0).unwrap();

        assert_eq!(graph.kruskal_mst().len(), 2);
        assert_eq!(graph.prim_mst(), vec![(0, 1), (0, 2)]);
    }

    #[test]
    fn self_loops_never_join_the_tree() {
        let mut graph = Graph::new(2, false);
        graph.add_edge(0, 0, 0.5).unwrap();
        graph.add_edge(0, 1, 1.0).unwrap();

        assert_eq!(graph.kruskal_mst(), vec![(0, 1)]);
        assert_eq!(graph.prim_mst(), vec![(0, 1)]);
    }
}
