//! Breadth-first and depth-first traversals.
//!
//! Depth-first walks use an explicit stack of `(vertex, next edge)` frames
//! so deep graphs cannot overflow the call stack, while still producing the
//! same pre-order and post-order as a recursive walk that explores edges in
//! adjacency-list order.

use super::{Edge, Graph};
use crate::error::Result;
use std::collections::VecDeque;

impl Graph {
    /// Breadth-first visitation order from `start`.
    ///
    /// Only vertices reachable from `start` appear, each exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::VertexOutOfRange`] if `start` does not exist.
    pub fn bfs(&self, start: usize) -> Result<Vec<usize>> {
        self.check_vertex(start)?;

        let mut order = Vec::new();
        let mut visited = vec![false; self.vertex_count()];
        let mut queue = VecDeque::from([start]);
        visited[start] = true;

        while let Some(vertex) = queue.pop_front() {
            order.push(vertex);
            for edge in &self.adjacency()[vertex] {
                if !visited[edge.to] {
                    visited[edge.to] = true;
                    queue.push_back(edge.to);
                }
            }
        }
        Ok(order)
    }

    /// Depth-first (pre-order) visitation order from `start`.
    ///
    /// Only vertices reachable from `start` appear, each exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::VertexOutOfRange`] if `start` does not exist.
    pub fn dfs(&self, start: usize) -> Result<Vec<usize>> {
        self.check_vertex(start)?;

        let mut order = Vec::new();
        let mut visited = vec![false; self.vertex_count()];
        depth_first(
            self.adjacency(),
            start,
            &mut visited,
            |vertex| order.push(vertex),
            |_| {},
        );
        Ok(order)
    }

    /// Topological order of all vertices (reversed DFS post-order).
    ///
    /// Only meaningful for acyclic directed graphs. No cycle check is made:
    /// on a cyclic graph the result is still a permutation of all vertices,
    /// but the order does not respect every edge.
    pub fn topological_sort(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.vertex_count());
        let mut visited = vec![false; self.vertex_count()];

        for root in 0..self.vertex_count() {
            if !visited[root] {
                depth_first(
                    self.adjacency(),
                    root,
                    &mut visited,
                    |_| {},
                    |vertex| order.push(vertex),
                );
            }
        }

        order.reverse();
        order
    }

    /// Whether `to` is reachable from `from` following edge directions.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::VertexOutOfRange`] if either vertex does not exist.
    pub fn path_exists(&self, from: usize, to: usize) -> Result<bool> {
        self.check_vertex(to)?;
        Ok(self.bfs(from)?.contains(&to))
    }
}

/// Iterative depth-first walk over `adjacency` starting at `root`.
///
/// `on_enter` runs when a vertex is first discovered (pre-order) and
/// `on_exit` once all of its edges have been explored (post-order).
/// Vertices already marked in `visited` are skipped.
pub(crate) fn depth_first(
    adjacency: &[Vec<Edge>],
    root: usize,
    visited: &mut [bool],
    mut on_enter: impl FnMut(usize),
    mut on_exit: impl FnMut(usize),
) {
    visited[root] = true;
    on_enter(root);
    let mut stack = vec![(root, 0usize)];

    while let Some(frame) = stack.last_mut() {
        let (vertex, cursor) = *frame;
        match adjacency[vertex].get(cursor) {
            Some(edge) => {
                frame.1 += 1;
                let next = edge.to;
                if !visited[next] {
                    visited[next] = true;
                    on_enter(next);
                    stack.push((next, 0));
                }
            }
            None => {
                stack.pop();
                on_exit(vertex);
            }
        }
    }
}
