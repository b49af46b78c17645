//! Shortest-path algorithms.
//!
//! | Operation | Algorithm | Weights |
//! |-----------|-----------|---------|
//! | [`Graph::dijkstra`] | binary-heap Dijkstra | non-negative only |
//! | [`Graph::shortest_path`] | Dijkstra with predecessors | non-negative only |
//! | [`Graph::bellman_ford`] | `V - 1` relaxation rounds | any finite |
//! | [`Graph::floyd_warshall`] | all pairs, O(V³) | any finite |
//!
//! Unreachable vertices have distance `f64::INFINITY`. Edge weights are
//! bounded by [`crate::MAX_WEIGHT`], so a reachable vertex always has a
//! finite distance. Negative cycles are
//! not detected by Bellman-Ford or Floyd-Warshall; distances on graphs that
//! contain one are not meaningful.

use super::Graph;
use crate::error::Result;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Min-heap entry: `(distance, vertex)`.
type Frontier = BinaryHeap<Reverse<(OrderedFloat<f64>, usize)>>;

impl Graph {
    /// Single-source shortest distances from `start`.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::VertexOutOfRange`] if `start` does not exist
    /// - [`crate::Error::NegativeWeight`] if any edge weight is negative
    pub fn dijkstra(&self, start: usize) -> Result<Vec<f64>> {
        self.check_vertex(start)?;
        self.ensure_non_negative()?;

        let mut dist = vec![f64::INFINITY; self.vertex_count()];
        dist[start] = 0.0;
        let mut frontier = Frontier::new();
        frontier.push(Reverse((OrderedFloat(0.0), start)));

        while let Some(Reverse((OrderedFloat(d), u))) = frontier.pop() {
            if d > dist[u] {
                continue;
            }
            for edge in &self.adjacency()[u] {
                let candidate = d + edge.weight;
                if candidate < dist[edge.to] {
                    dist[edge.to] = candidate;
                    frontier.push(Reverse((OrderedFloat(candidate), edge.to)));
                }
            }
        }
        Ok(dist)
    }

    /// Single-source shortest distances using Bellman-Ford relaxation.
    ///
    /// Runs at most `vertex_count - 1` rounds over every edge and stops early
    /// once a round relaxes nothing. Accepts negative weights.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::VertexOutOfRange`] if `start` does not exist.
    pub fn bellman_ford(&self, start: usize) -> Result<Vec<f64>> {
        self.check_vertex(start)?;

        let n = self.vertex_count();
        let mut dist = vec![f64::INFINITY; n];
        dist[start] = 0.0;

        let mut rounds = 0;
        for _ in 0..n.saturating_sub(1) {
            rounds += 1;
            let mut changed = false;
            for (u, edges) in self.adjacency().iter().enumerate() {
                if dist[u].is_infinite() {
                    continue;
                }
                for edge in edges {
                    let candidate = dist[u] + edge.weight;
                    if candidate < dist[edge.to] {
                        dist[edge.to] = candidate;
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }

        tracing::debug!(start, vertices = n, rounds, "Bellman-Ford finished");
        Ok(dist)
    }

    /// All-pairs shortest distances.
    ///
    /// `result[i][j]` is the distance from `i` to `j`; the diagonal is 0.
    pub fn floyd_warshall(&self) -> Vec<Vec<f64>> {
        let n = self.vertex_count();
        let mut dist = vec![vec![f64::INFINITY; n]; n];

        for (u, edges) in self.adjacency().iter().enumerate() {
            dist[u][u] = 0.0;
            for edge in edges {
                if edge.weight < dist[u][edge.to] {
                    dist[u][edge.to] = edge.weight;
                }
            }
        }

        for k in 0..n {
            for i in 0..n {
                if dist[i][k].is_infinite() {
                    continue;
                }
                for j in 0..n {
                    let through_k = dist[i][k] + dist[k][j];
                    if through_k < dist[i][j] {
                        dist[i][j] = through_k;
                    }
                }
            }
        }

        tracing::debug!(vertices = n, "Floyd-Warshall finished");
        dist
    }

    /// Cheapest vertex sequence from `from` to `to`, or `None` if `to` is
    /// unreachable.
    ///
    /// The path starts with `from` and ends with `to`; `shortest_path(v, v)`
    /// is `Some(vec![v])`.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::VertexOutOfRange`] if either vertex does not exist
    /// - [`crate::Error::NegativeWeight`] if any edge weight is negative
    pub fn shortest_path(&self, from: usize, to: usize) -> Result<Option<Vec<usize>>> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        self.ensure_non_negative()?;

        let n = self.vertex_count();
        let mut dist = vec![f64::INFINITY; n];
        let mut prev: Vec<Option<usize>> = vec![None; n];
        dist[from] = 0.0;
        let mut frontier = Frontier::new();
        frontier.push(Reverse((OrderedFloat(0.0), from)));

        while let Some(Reverse((OrderedFloat(d), u))) = frontier.pop() {
            if u == to {
                break;
            }
            if d > dist[u] {
                continue;
            }
            for edge in &self.adjacency()[u] {
                let candidate = d + edge.weight;
                if candidate < dist[edge.to] {
                    dist[edge.to] = candidate;
                    prev[edge.to] = Some(u);
                    frontier.push(Reverse((OrderedFloat(candidate), edge.to)));
                }
            }
        }

        if dist[to].is_infinite() {
            return Ok(None);
        }

        let mut path = vec![to];
        let mut current = to;
        while let Some(previous) = prev[current] {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        Ok(Some(path))
    }
}
