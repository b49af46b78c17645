//! Structural properties: cycles, components and bipartiteness.

use super::traversal::depth_first;
use super::Graph;
use petgraph::algo::tarjan_scc;
use std::collections::VecDeque;

/// DFS vertex state for cycle detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Not discovered yet.
    White,
    /// On the current DFS path.
    Gray,
    /// Fully explored.
    Black,
}

/// DFS frame for cycle detection.
struct Frame {
    vertex: usize,
    parent: Option<usize>,
    cursor: usize,
    skipped_parent_edge: bool,
}

impl Graph {
    /// Whether the graph contains a cycle.
    ///
    /// Three-color DFS: reaching a gray vertex is a back edge. On undirected
    /// graphs the one stored entry leading back to the DFS parent is the
    /// mirror of the tree edge and is ignored, so a single edge `u - v` is not
    /// a cycle. Parallel undirected edges and self-loops are cycles.
    pub fn has_cycle(&self) -> bool {
        let adjacency = self.adjacency();
        let mut color = vec![Color::White; self.vertex_count()];

        for root in 0..self.vertex_count() {
            if color[root] != Color::White {
                continue;
            }
            color[root] = Color::Gray;
            let mut stack = vec![Frame {
                vertex: root,
                parent: None,
                cursor: 0,
                skipped_parent_edge: false,
            }];

            while let Some(frame) = stack.last_mut() {
                let Some(edge) = adjacency[frame.vertex].get(frame.cursor) else {
                    color[frame.vertex] = Color::Black;
                    stack.pop();
                    continue;
                };
                frame.cursor += 1;

                let target = edge.to;
                if !self.is_directed()
                    && frame.parent == Some(target)
                    && !frame.skipped_parent_edge
                {
                    frame.skipped_parent_edge = true;
                    continue;
                }

                match color[target] {
                    Color::Gray => return true,
                    Color::White => {
                        color[target] = Color::Gray;
                        let parent = Some(frame.vertex);
                        stack.push(Frame {
                            vertex: target,
                            parent,
                            cursor: 0,
                            skipped_parent_edge: false,
                        });
                    }
                    Color::Black => {}
                }
            }
        }
        false
    }

    /// Partition of all vertices into connected components.
    ///
    /// Directed graphs are treated as undirected (weak connectivity).
    /// Components are discovered from the lowest unvisited index and list
    /// their vertices in DFS order.
    pub fn connected_components(&self) -> Vec<Vec<usize>> {
        let adjacency = self.undirected_adjacency();
        let mut visited = vec![false; self.vertex_count()];
        let mut components = Vec::new();

        for root in 0..self.vertex_count() {
            if !visited[root] {
                let mut component = Vec::new();
                depth_first(
                    &adjacency,
                    root,
                    &mut visited,
                    |vertex| component.push(vertex),
                    |_| {},
                );
                components.push(component);
            }
        }
        components
    }

    /// Whether every vertex is in one (weakly) connected component.
    ///
    /// An empty graph is connected.
    pub fn is_connected(&self) -> bool {
        self.connected_components().len() <= 1
    }

    /// Whether the vertices can be two-colored so that no edge joins two
    /// vertices of the same color.
    ///
    /// Edge direction is ignored. A self-loop makes a graph non-bipartite.
    pub fn is_bipartite(&self) -> bool {
        let adjacency = self.undirected_adjacency();
        let mut side: Vec<Option<bool>> = vec![None; self.vertex_count()];

        for root in 0..self.vertex_count() {
            if side[root].is_some() {
                continue;
            }
            side[root] = Some(false);
            let mut queue = VecDeque::from([root]);

            while let Some(vertex) = queue.pop_front() {
                let current = side[vertex].unwrap_or(false);
                for edge in &adjacency[vertex] {
                    match side[edge.to] {
                        None => {
                            side[edge.to] = Some(!current);
                            queue.push_back(edge.to);
                        }
                        Some(other) if other == current => return false,
                        Some(_) => {}
                    }
                }
            }
        }
        true
    }

    /// Strongly connected components (Tarjan).
    ///
    /// Each component is sorted ascending and components are ordered by their
    /// smallest vertex. On undirected graphs these equal the connected
    /// components.
    pub fn strongly_connected_components(&self) -> Vec<Vec<usize>> {
        let view = self.to_petgraph();
        let mut components: Vec<Vec<usize>> = tarjan_scc(&view)
            .into_iter()
            .map(|nodes| {
                let mut component: Vec<usize> = nodes.into_iter().map(|node| view[node]).collect();
                component.sort_unstable();
                component
            })
            .collect();
        components.sort_unstable_by_key(|component| component[0]);
        components
    }
}
