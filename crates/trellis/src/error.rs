//! Error types for the trellis front end.

use std::io;
use thiserror::Error;

/// The error type for loading inputs and configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An edge list or `--vertices` asked for more vertices than allowed.
    #[error("{requested} vertices exceeds the limit of {limit}")]
    TooManyVertices {
        /// Vertex count that was asked for.
        requested: usize,
        /// The enforced maximum.
        limit: usize,
    },

    /// Graph construction or query failed.
    #[error("Graph error: {0}")]
    Graph(#[from] trellis_graph::Error),
}

/// A specialized Result type for trellis operations.
pub type Result<T> = std::result::Result<T, Error>;
