//! Trellis graph engine.
//!
//! This crate provides an adjacency-list weighted [`Graph`] with traversal,
//! shortest-path, connectivity and spanning-tree algorithms, plus a
//! [`UnionFind`] (disjoint set union) used for component tracking.
//!
//! Vertices are dense indices `0..vertex_count`. Every operation that takes
//! a vertex checks it and returns [`Error::VertexOutOfRange`] for indices
//! outside that range.
//!
//! # Example
//!
//! ```
//! use trellis_graph::Graph;
//!
//! # fn main() -> trellis_graph::Result<()> {
//! let mut graph = Graph::new(4, true);
//! graph.add_edge(0, 1, 2.0)?;
//! graph.add_edge(1, 2, 1.5)?;
//! graph.add_edge(0, 2, 5.0)?;
//!
//! assert_eq!(graph.dijkstra(0)?[2], 3.5);
//! assert_eq!(graph.shortest_path(0, 2)?, Some(vec![0, 1, 2]));
//! assert_eq!(graph.shortest_path(0, 3)?, None);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod graph;
pub mod union_find;

pub use error::{Error, Result};
pub use graph::{Edge, Graph, DEFAULT_WEIGHT, MAX_WEIGHT};
pub use union_find::UnionFind;
