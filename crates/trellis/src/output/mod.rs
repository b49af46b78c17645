//! Output formatting for CLI commands.
//!
//! Every command result can be printed as human-readable text or as pretty
//! JSON for programmatic use.
//!
//! Submodules:
//! - [`color`]: semantic color helpers

pub mod color;

use crate::demo::DemoReport;
use crate::loader::LoadWarning;
use crate::report::{GraphReport, GraphStats, TreeEdge};
use serde::Serialize;
use std::env;
use std::io::{self, Write};

pub use color::{error, info, success, warning};

use color::{bold, dimmed, yes_no};

// ============================================================================
// Output Configuration
// ============================================================================

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

impl OutputMode {
    /// `Json` when `json` is set.
    pub fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// Settings that control text formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create an `OutputConfig` with explicit values.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Create an `OutputConfig` from the configured color preference and
    /// environment variables.
    ///
    /// Reads:
    /// - `NO_COLOR`: standard env var to disable colors (any value disables colors)
    /// - `TRELLIS_COLOR`: set to "0" or "false" to disable colors
    pub fn from_env(color_enabled: bool) -> Self {
        // https://no-color.org/
        let use_colors = color_enabled
            && env::var_os("NO_COLOR").is_none()
            && env::var("TRELLIS_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);
        Self { use_colors }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

// ============================================================================
// Public Dispatch Functions
// ============================================================================

/// Print a graph query result in the specified format.
pub fn print_report(report: &GraphReport, mode: OutputMode, config: &OutputConfig) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match mode {
        OutputMode::Text => write_report_text(&mut handle, report, config),
        OutputMode::Json => write_json(&mut handle, report),
    }
}

/// Print the events demo log in the specified format.
pub fn print_demo(report: &DemoReport, mode: OutputMode, config: &OutputConfig) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match mode {
        OutputMode::Text => write_demo_text(&mut handle, report, config),
        OutputMode::Json => write_json(&mut handle, report),
    }
}

/// Print load warnings to stderr.
///
/// Warnings never go to stdout so JSON output stays parseable.
pub fn print_warnings(warnings: &[LoadWarning], config: &OutputConfig) -> io::Result<()> {
    if warnings.is_empty() {
        return Ok(());
    }
    let stderr = io::stderr();
    let mut handle = stderr.lock();
    writeln!(
        handle,
        "{}",
        warning(&format!("Skipped {} edge-list line(s):", warnings.len()), config)
    )?;
    for item in warnings {
        writeln!(handle, "  {item}")?;
    }
    Ok(())
}

/// Print a JSON-formatted result for any serializable value.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, value)
}

fn write_json<W: Write, T: Serialize>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{json}")
}

// ============================================================================
// Text Formatting
// ============================================================================

/// Write a graph query result as text.
pub fn write_report_text<W: Write>(
    w: &mut W,
    report: &GraphReport,
    config: &OutputConfig,
) -> io::Result<()> {
    match report {
        GraphReport::Stats(stats) => write_stats(w, stats, config),
        GraphReport::Bfs { start, order } => {
            writeln!(w, "{} {}", bold("BFS from", config), vertex(*start, config))?;
            writeln!(w, "  {}", vertex_list(order, config))
        }
        GraphReport::Dfs { start, order } => {
            writeln!(w, "{} {}", bold("DFS from", config), vertex(*start, config))?;
            writeln!(w, "  {}", vertex_list(order, config))
        }
        GraphReport::Topo { order, acyclic } => {
            writeln!(w, "{}", bold("Topological order", config))?;
            writeln!(w, "  {}", vertex_list(order, config))?;
            if !acyclic {
                writeln!(
                    w,
                    "  {}",
                    warning("graph has a cycle; order is not a valid topological order", config)
                )?;
            }
            Ok(())
        }
        GraphReport::Dijkstra { start, distances } => {
            write_distances(w, "Dijkstra", *start, distances, config)
        }
        GraphReport::BellmanFord { start, distances } => {
            write_distances(w, "Bellman-Ford", *start, distances, config)
        }
        GraphReport::FloydWarshall { distances } => write_matrix(w, distances, config),
        GraphReport::Path {
            from,
            to,
            path,
            distance,
        } => {
            let header = format!("{} {} -> {}", bold("Shortest path", config), from, to);
            match (path, distance) {
                (Some(path), Some(distance)) => {
                    writeln!(w, "{header}")?;
                    writeln!(w, "  {}", vertex_list(path, config))?;
                    writeln!(w, "  {} {}", dimmed("distance:", config), format_weight(*distance))
                }
                _ => {
                    writeln!(w, "{header}")?;
                    writeln!(w, "  {}", error("no path", config))
                }
            }
        }
        GraphReport::Components { components } => {
            write_components(w, "Connected components", components, config)
        }
        GraphReport::Scc { components } => {
            write_components(w, "Strongly connected components", components, config)
        }
        GraphReport::Cycle { has_cycle } => {
            writeln!(w, "{} {}", bold("Has cycle:", config), yes_no(*has_cycle, config))
        }
        GraphReport::Bipartite { bipartite } => {
            writeln!(w, "{} {}", bold("Bipartite:", config), yes_no(*bipartite, config))
        }
        GraphReport::Mst {
            algorithm,
            edges,
            total_weight,
        } => {
            let name = match algorithm {
                crate::report::MstAlgorithm::Kruskal => "Kruskal",
                crate::report::MstAlgorithm::Prim => "Prim",
            };
            writeln!(w, "{} ({name})", bold("Minimum spanning forest", config))?;
            for edge in edges {
                write_tree_edge(w, edge, config)?;
            }
            writeln!(
                w,
                "  {} {} edge(s), weight {}",
                dimmed("total:", config),
                edges.len(),
                format_weight(*total_weight)
            )
        }
    }
}

fn write_stats<W: Write>(w: &mut W, stats: &GraphStats, config: &OutputConfig) -> io::Result<()> {
    let kind = if stats.directed { "directed" } else { "undirected" };
    writeln!(w, "{} ({kind})", bold("Graph", config))?;
    writeln!(w, "  {:<12} {}", dimmed("vertices:", config), stats.vertices)?;
    writeln!(w, "  {:<12} {}", dimmed("edges:", config), stats.edges)?;
    writeln!(w, "  {:<12} {}", dimmed("components:", config), stats.components)?;
    writeln!(w, "  {:<12} {}", dimmed("connected:", config), yes_no(stats.connected, config))?;
    writeln!(w, "  {:<12} {}", dimmed("cycle:", config), yes_no(stats.has_cycle, config))?;
    writeln!(w, "  {:<12} {}", dimmed("bipartite:", config), yes_no(stats.bipartite, config))
}

fn write_distances<W: Write>(
    w: &mut W,
    algorithm: &str,
    start: usize,
    distances: &[Option<f64>],
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{} {}",
        bold(&format!("{algorithm} distances from"), config),
        vertex(start, config)
    )?;
    for (target, distance) in distances.iter().enumerate() {
        writeln!(
            w,
            "  {} {}",
            vertex(target, config),
            format_distance(*distance, config)
        )?;
    }
    Ok(())
}

fn write_matrix<W: Write>(
    w: &mut W,
    distances: &[Vec<Option<f64>>],
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{}", bold("All-pairs distances", config))?;
    for (from, row) in distances.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .map(|distance| format_distance(*distance, config))
            .collect();
        writeln!(w, "  {}: {}", vertex(from, config), cells.join(" "))?;
    }
    Ok(())
}

fn write_components<W: Write>(
    w: &mut W,
    title: &str,
    components: &[Vec<usize>],
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{} ({})", bold(title, config), components.len())?;
    for component in components {
        writeln!(w, "  {{{}}}", vertex_list_with(component, ", ", config))?;
    }
    Ok(())
}

fn write_tree_edge<W: Write>(w: &mut W, edge: &TreeEdge, config: &OutputConfig) -> io::Result<()> {
    writeln!(
        w,
        "  {} - {} {}",
        vertex(edge.from, config),
        vertex(edge.to, config),
        dimmed(&format!("({})", format_weight(edge.weight)), config)
    )
}

/// Write the events demo log as text.
pub fn write_demo_text<W: Write>(
    w: &mut W,
    report: &DemoReport,
    config: &OutputConfig,
) -> io::Result<()> {
    for (index, stage) in report.stages.iter().enumerate() {
        if index > 0 {
            writeln!(w)?;
        }
        writeln!(w, "{}", bold(&format!("{}. {}", index + 1, stage.title), config))?;
        for line in &stage.log {
            writeln!(w, "  {line}")?;
        }
    }
    writeln!(w)?;
    writeln!(
        w,
        "{}",
        success(
            &format!("Processed {} queued event(s)", report.queued_processed),
            config
        )
    )
}

fn vertex(id: usize, config: &OutputConfig) -> String {
    info(&id.to_string(), config)
}

fn vertex_list(vertices: &[usize], config: &OutputConfig) -> String {
    if vertices.is_empty() {
        return dimmed("(empty)", config);
    }
    vertex_list_with(vertices, " -> ", config)
}

fn vertex_list_with(vertices: &[usize], separator: &str, config: &OutputConfig) -> String {
    vertices
        .iter()
        .map(|&v| vertex(v, config))
        .collect::<Vec<_>>()
        .join(separator)
}

fn format_distance(distance: Option<f64>, config: &OutputConfig) -> String {
    match distance {
        Some(d) => format_weight(d),
        None => dimmed("inf", config),
    }
}

/// Integral weights print without a trailing `.0`.
fn format_weight(weight: f64) -> String {
    format!("{weight}")
}
