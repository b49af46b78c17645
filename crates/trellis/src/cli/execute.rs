//! Command execution logic.

use anyhow::{Context, Result, bail};
use trellis_graph::Graph;

use super::args::{EventsArgs, GraphArgs, GraphQuery};
use crate::config::TrellisConfig;
use crate::demo::{self, DemoOptions};
use crate::loader::{self, GraphOptions};
use crate::output::{self, OutputConfig, OutputMode};
use crate::report::{GraphReport, GraphStats, MstAlgorithm, TreeEdge, finite_distances};

/// Largest graph `floyd-warshall` will run on; its distance matrix holds
/// `vertex_count²` entries.
pub const MAX_ALL_PAIRS_VERTICES: usize = 4096;

/// Execute the graph command
pub fn execute_graph(
    args: &GraphArgs,
    config: &TrellisConfig,
    mode: OutputMode,
    output_config: &OutputConfig,
) -> Result<()> {
    let options = GraphOptions {
        directed: args.directed_or(config.graph.directed),
        min_vertices: args.vertices.unwrap_or(0),
        default_weight: config.graph.default_weight,
    };
    let (graph, warnings) = loader::load_graph(&args.file, &options)
        .with_context(|| format!("Failed to load graph from {}", args.file.display()))?;
    output::print_warnings(&warnings, output_config)?;

    let report = run_query(&graph, &args.query)?;
    output::print_report(&report, mode, output_config)?;
    Ok(())
}

/// Execute the events command
pub fn execute_events(
    args: &EventsArgs,
    mode: OutputMode,
    output_config: &OutputConfig,
) -> Result<()> {
    let report = demo::run(DemoOptions {
        workers: usize::from(args.workers),
        events_per_worker: usize::from(args.events_per_worker),
    });
    output::print_demo(&report, mode, output_config)?;
    Ok(())
}

/// Run one query against `graph`.
///
/// # Errors
///
/// Fails when a vertex argument is out of range, when a Dijkstra-based
/// query meets a negative weight, or when `floyd-warshall` is asked for a
/// graph larger than [`MAX_ALL_PAIRS_VERTICES`].
pub fn run_query(graph: &Graph, query: &GraphQuery) -> Result<GraphReport> {
    let report = match query {
        GraphQuery::Stats => GraphReport::Stats(GraphStats {
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
            directed: graph.is_directed(),
            connected: graph.is_connected(),
            components: graph.connected_components().len(),
            has_cycle: graph.has_cycle(),
            bipartite: graph.is_bipartite(),
        }),
        GraphQuery::Bfs(args) => GraphReport::Bfs {
            start: args.start,
            order: graph.bfs(args.start)?,
        },
        GraphQuery::Dfs(args) => GraphReport::Dfs {
            start: args.start,
            order: graph.dfs(args.start)?,
        },
        GraphQuery::Topo => {
            if !graph.is_directed() {
                tracing::warn!("Topological order of an undirected graph is not meaningful");
            }
            GraphReport::Topo {
                order: graph.topological_sort(),
                acyclic: !graph.has_cycle(),
            }
        }
        GraphQuery::Dijkstra(args) => GraphReport::Dijkstra {
            start: args.start,
            distances: finite_distances(
                graph
                    .dijkstra(args.start)
                    .context("Dijkstra failed; use bellman-ford for negative weights")?,
            ),
        },
        GraphQuery::BellmanFord(args) => GraphReport::BellmanFord {
            start: args.start,
            distances: finite_distances(graph.bellman_ford(args.start)?),
        },
        GraphQuery::FloydWarshall => {
            let vertices = graph.vertex_count();
            if vertices > MAX_ALL_PAIRS_VERTICES {
                bail!(
                    "floyd-warshall supports at most {MAX_ALL_PAIRS_VERTICES} vertices, graph has {vertices}; use dijkstra or bellman-ford per source"
                );
            }
            GraphReport::FloydWarshall {
                distances: graph
                    .floyd_warshall()
                    .into_iter()
                    .map(finite_distances)
                    .collect(),
            }
        }
        GraphQuery::Path(args) => {
            let path = graph.shortest_path(args.from, args.to)?;
            let distance = match &path {
                Some(_) => Some(graph.dijkstra(args.from)?[args.to]),
                None => None,
            };
            GraphReport::Path {
                from: args.from,
                to: args.to,
                path,
                distance,
            }
        }
        GraphQuery::Components => GraphReport::Components {
            components: graph.connected_components(),
        },
        GraphQuery::Scc => GraphReport::Scc {
            components: graph.strongly_connected_components(),
        },
        GraphQuery::Cycle => GraphReport::Cycle {
            has_cycle: graph.has_cycle(),
        },
        GraphQuery::Bipartite => GraphReport::Bipartite {
            bipartite: graph.is_bipartite(),
        },
        GraphQuery::Mst(args) => {
            let pairs = match args.algorithm {
                MstAlgorithm::Kruskal => graph.kruskal_mst(),
                MstAlgorithm::Prim => graph.prim_mst(),
            };
            let edges = tree_edges(graph, &pairs)?;
            GraphReport::Mst {
                algorithm: args.algorithm,
                total_weight: edges.iter().map(|edge| edge.weight).sum(),
                edges,
            }
        }
    };
    Ok(report)
}

/// Attach weights to spanning-tree pairs.
///
/// Trees treat edges as undirected, so a pair may only exist in the
/// reverse direction; the lightest parallel edge is the one the tree used.
fn tree_edges(graph: &Graph, pairs: &[(usize, usize)]) -> Result<Vec<TreeEdge>> {
    pairs
        .iter()
        .map(|&(from, to)| {
            let forward = graph.edges(from)?.iter().filter(|edge| edge.to == to);
            let backward = graph.edges(to)?.iter().filter(|edge| edge.to == from);
            let weight = forward
                .chain(backward)
                .map(|edge| edge.weight)
                .min_by(f64::total_cmp)
                .with_context(|| format!("Spanning tree edge {from}-{to} is not in the graph"))?;
            Ok(TreeEdge { from, to, weight })
        })
        .collect()
}
