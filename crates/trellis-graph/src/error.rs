//! Error types for trellis-graph operations.

use thiserror::Error;

/// The error type for graph and union-find operations.
///
/// Vertex indices are always bounds-checked, so an out-of-range index is
/// reported as [`Error::VertexOutOfRange`] instead of panicking.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A vertex (or union-find element) index was not in `0..vertex_count`.
    #[error("vertex {vertex} is out of range for {vertex_count} vertices")]
    VertexOutOfRange {
        /// The offending index.
        vertex: usize,
        /// Number of vertices in the structure.
        vertex_count: usize,
    },

    /// An edge weight was NaN, infinite, or above [`crate::MAX_WEIGHT`] in
    /// magnitude.
    #[error("edge {from} -> {to} has unusable weight {weight}")]
    InvalidWeight {
        /// Source vertex.
        from: usize,
        /// Target vertex.
        to: usize,
        /// The rejected weight.
        weight: f64,
    },

    /// A Dijkstra-based operation found a negative edge weight.
    #[error("edge {from} -> {to} has negative weight {weight}")]
    NegativeWeight {
        /// Source vertex.
        from: usize,
        /// Target vertex.
        to: usize,
        /// The negative weight.
        weight: f64,
    },
}

/// A specialized Result type for trellis-graph operations.
pub type Result<T> = std::result::Result<T, Error>;
