//! CLI argument structs for all commands.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::validators::validate_vertex_count;
use crate::report::MstAlgorithm;

/// Arguments for the `graph` command
#[derive(Parser, Debug, Clone)]
pub struct GraphArgs {
    /// JSON Lines edge list, one `{"from": u, "to": v, "weight": w}` per line
    pub file: PathBuf,

    /// Treat edges as directed
    #[arg(long, conflicts_with = "undirected")]
    pub directed: bool,

    /// Treat edges as undirected
    #[arg(long)]
    pub undirected: bool,

    /// Minimum number of vertices (the file may imply more)
    #[arg(short = 'n', long, value_parser = validate_vertex_count)]
    pub vertices: Option<usize>,

    /// Query to run on the loaded graph
    #[command(subcommand)]
    pub query: GraphQuery,
}

impl GraphArgs {
    /// Directedness from the flags, or `default` when neither is given.
    pub fn directed_or(&self, default: bool) -> bool {
        if self.directed {
            true
        } else if self.undirected {
            false
        } else {
            default
        }
    }
}

/// Graph queries
#[derive(Subcommand, Debug, Clone)]
pub enum GraphQuery {
    /// Vertex and edge counts plus connectivity, cycle and bipartite checks
    Stats,

    /// Breadth-first traversal order
    Bfs(StartArgs),

    /// Depth-first (pre-order) traversal order
    Dfs(StartArgs),

    /// Topological order (meaningful for directed acyclic graphs)
    Topo,

    /// Single-source shortest distances (non-negative weights)
    Dijkstra(StartArgs),

    /// Single-source shortest distances (negative weights allowed)
    BellmanFord(StartArgs),

    /// All-pairs shortest distances (graphs of at most 4096 vertices)
    FloydWarshall,

    /// Shortest path between two vertices
    Path(PathArgs),

    /// Connected components (edge direction ignored)
    Components,

    /// Strongly connected components
    Scc,

    /// Whether the graph has a cycle
    Cycle,

    /// Whether the graph is bipartite
    Bipartite,

    /// Minimum spanning tree or forest
    Mst(MstArgs),
}

/// Source vertex for traversals and single-source queries
#[derive(Args, Debug, Clone)]
pub struct StartArgs {
    /// Vertex to start from
    #[arg(short, long, default_value = "0")]
    pub start: usize,
}

/// Endpoints for the `path` query
#[derive(Args, Debug, Clone)]
pub struct PathArgs {
    /// Source vertex
    #[arg(long)]
    pub from: usize,

    /// Target vertex
    #[arg(long)]
    pub to: usize,
}

/// Arguments for the `mst` query
#[derive(Args, Debug, Clone)]
pub struct MstArgs {
    /// Spanning tree algorithm
    #[arg(short, long, value_enum, default_value = "kruskal")]
    pub algorithm: MstAlgorithm,
}

/// Arguments for the `events` command
#[derive(Parser, Debug, Clone)]
pub struct EventsArgs {
    /// Threads feeding the deferred queue
    #[arg(long, default_value = "2", value_parser = clap::value_parser!(u16).range(1..=64))]
    pub workers: u16,

    /// Events queued by each worker thread
    #[arg(long, default_value = "3", value_parser = clap::value_parser!(u16).range(0..=1000))]
    pub events_per_worker: u16,
}
