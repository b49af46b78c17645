//! Edge-list loading.
//!
//! Graphs are read from JSON Lines files with one edge per line:
//!
//! ```text
//! {"from": 0, "to": 1, "weight": 4.0}
//! {"from": 1, "to": 2}
//! ```
//!
//! Loading is resilient: blank lines are ignored, and a line that is not
//! valid JSON or describes an unusable edge is skipped with a
//! [`LoadWarning`] while the rest of the file still loads.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use trellis_graph::Graph;

/// Largest vertex count a file or `--vertices` may ask for.
pub const MAX_VERTICES: usize = 1 << 20;

/// A non-fatal problem found while loading an edge list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// The line is not a JSON edge record.
    ///
    /// **Effect**: the line is skipped.
    MalformedJson {
        /// 1-based line number.
        line_number: usize,
        /// Parser message.
        error: String,
    },

    /// The record parsed but cannot become an edge (negative or oversized
    /// index, non-finite weight).
    ///
    /// **Effect**: the line is skipped.
    InvalidEdge {
        /// 1-based line number.
        line_number: usize,
        /// Why the edge was rejected.
        reason: String,
    },
}

impl LoadWarning {
    /// The 1-based line the warning refers to.
    pub fn line_number(&self) -> usize {
        match self {
            Self::MalformedJson { line_number, .. } | Self::InvalidEdge { line_number, .. } => {
                *line_number
            }
        }
    }

    /// Short identifier for grouping warnings.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedJson { .. } => "malformed_json",
            Self::InvalidEdge { .. } => "invalid_edge",
        }
    }
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedJson { line_number, error } => {
                write!(f, "line {line_number}: malformed JSON: {error}")
            }
            Self::InvalidEdge {
                line_number,
                reason,
            } => write!(f, "line {line_number}: invalid edge: {reason}"),
        }
    }
}

/// One line of the edge-list format.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EdgeRecord {
    from: i64,
    to: i64,
    weight: Option<f64>,
}

/// An edge that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadedEdge {
    /// Source vertex.
    pub from: usize,
    /// Target vertex.
    pub to: usize,
    /// Edge weight.
    pub weight: f64,
}

/// How to turn an edge list into a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphOptions {
    /// Build a directed graph.
    pub directed: bool,
    /// Minimum vertex count; the file may imply more.
    pub min_vertices: usize,
    /// Weight for records without one.
    pub default_weight: f64,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            directed: false,
            min_vertices: 0,
            default_weight: trellis_graph::DEFAULT_WEIGHT,
        }
    }
}

/// Parse edge records from `reader`, skipping unusable lines.
pub fn read_edges<R: Read>(
    reader: R,
    default_weight: f64,
) -> Result<(Vec<LoadedEdge>, Vec<LoadWarning>)> {
    let mut edges = Vec::new();
    let mut warnings = Vec::new();

    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let record: EdgeRecord = match serde_json::from_str(&line) {
            Ok(record) => record,
            Err(e) => {
                warnings.push(LoadWarning::MalformedJson {
                    line_number,
                    error: e.to_string(),
                });
                continue;
            }
        };

        match validate(&record, default_weight) {
            Ok(edge) => edges.push(edge),
            Err(reason) => warnings.push(LoadWarning::InvalidEdge {
                line_number,
                reason,
            }),
        }
    }

    Ok((edges, warnings))
}

fn validate(record: &EdgeRecord, default_weight: f64) -> std::result::Result<LoadedEdge, String> {
    let index = |value: i64, field: &str| -> std::result::Result<usize, String> {
        match usize::try_from(value) {
            Ok(vertex) if vertex < MAX_VERTICES => Ok(vertex),
            Ok(_) => Err(format!("{field} vertex {value} exceeds the limit of {MAX_VERTICES}")),
            Err(_) => Err(format!("{field} vertex {value} is negative")),
        }
    };

    let weight = record.weight.unwrap_or(default_weight);
    if !weight.is_finite() {
        return Err(format!("weight {weight} is not finite"));
    }
    if weight.abs() > trellis_graph::MAX_WEIGHT {
        return Err(format!(
            "weight {weight} exceeds the magnitude limit of {:e}",
            trellis_graph::MAX_WEIGHT
        ));
    }

    Ok(LoadedEdge {
        from: index(record.from, "from")?,
        to: index(record.to, "to")?,
        weight,
    })
}

/// Build a graph from validated edges.
///
/// The vertex count is the larger of `options.min_vertices` and one past the
/// highest index used by any edge.
///
/// # Errors
///
/// Returns [`Error::TooManyVertices`] if that count is above
/// [`MAX_VERTICES`], before anything is allocated.
pub fn build_graph(edges: &[LoadedEdge], options: &GraphOptions) -> Result<Graph> {
    let implied = edges
        .iter()
        .map(|edge| edge.from.max(edge.to) + 1)
        .max()
        .unwrap_or(0);
    let vertex_count = implied.max(options.min_vertices);
    if vertex_count > MAX_VERTICES {
        return Err(Error::TooManyVertices {
            requested: vertex_count,
            limit: MAX_VERTICES,
        });
    }
    let mut graph = Graph::new(vertex_count, options.directed);
    for edge in edges {
        graph.add_edge(edge.from, edge.to, edge.weight)?;
    }
    Ok(graph)
}

/// Load a graph from a JSON Lines edge-list file.
///
/// Returns the graph plus any warnings for skipped lines. Only IO failures
/// are errors.
pub fn load_graph(path: &Path, options: &GraphOptions) -> Result<(Graph, Vec<LoadWarning>)> {
    let file = File::open(path)?;
    let (edges, warnings) = read_edges(file, options.default_weight)?;
    let graph = build_graph(&edges, options)?;

    tracing::debug!(
        path = %path.display(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        warnings = warnings.len(),
        "Loaded edge list"
    );
    for warning in &warnings {
        tracing::warn!(kind = warning.kind(), "{warning}");
    }
    Ok((graph, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn read(content: &str) -> (Vec<LoadedEdge>, Vec<LoadWarning>) {
        read_edges(content.as_bytes(), 1.0).unwrap()
    }

    #[test]
    fn reads_weighted_and_unweighted_edges() {
        let (edges, warnings) = read("{\"from\":0,\"to\":1,\"weight\":4.5}\n\n{\"from\":1,\"to\":2}\n");
        assert!(warnings.is_empty());
        assert_eq!(
            edges,
            vec![
                LoadedEdge { from: 0, to: 1, weight: 4.5 },
                LoadedEdge { from: 1, to: 2, weight: 1.0 },
            ]
        );
    }

    #[test]
    fn default_weight_applies_to_missing_weights() {
        let (edges, _) = read_edges("{\"from\":0,\"to\":1}".as_bytes(), 7.0).unwrap();
        assert_eq!(edges[0].weight, 7.0);
    }

    #[rstest]
    #[case::not_json("not json", "malformed_json")]
    #[case::missing_field("{\"from\":0}", "malformed_json")]
    #[case::unknown_field("{\"from\":0,\"to\":1,\"cost\":2}", "malformed_json")]
    #[case::fractional_index("{\"from\":0.5,\"to\":1}", "malformed_json")]
    #[case::negative_index("{\"from\":-1,\"to\":1}", "invalid_edge")]
    #[case::oversized_index("{\"from\":0,\"to\":2000000}", "invalid_edge")]
    #[case::oversized_weight("{\"from\":0,\"to\":1,\"weight\":1e200}", "invalid_edge")]
    fn bad_lines_are_skipped_with_warning(#[case] line: &str, #[case] kind: &str) {
        let content = format!("{{\"from\":0,\"to\":1}}\n{line}\n{{\"from\":1,\"to\":2}}\n");
        let (edges, warnings) = read(&content);

        assert_eq!(edges.len(), 2);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind(), kind);
        assert_eq!(warnings[0].line_number(), 2);
    }

    #[test]
    fn vertex_count_covers_highest_index_and_minimum() {
        let (edges, _) = read("{\"from\":0,\"to\":3}\n");
        let sparse = build_graph(&edges, &GraphOptions::default()).unwrap();
        assert_eq!(sparse.vertex_count(), 4);

        let padded = GraphOptions {
            min_vertices: 10,
            ..GraphOptions::default()
        };
        assert_eq!(build_graph(&edges, &padded).unwrap().vertex_count(), 10);
        assert_eq!(build_graph(&[], &padded).unwrap().vertex_count(), 10);
    }

    #[rstest]
    #[case::just_over(MAX_VERTICES + 1)]
    #[case::capacity_overflow(usize::MAX / 2)]
    fn oversized_vertex_count_is_rejected(#[case] min_vertices: usize) {
        let options = GraphOptions {
            min_vertices,
            ..GraphOptions::default()
        };
        let err = build_graph(&[], &options).unwrap_err();
        assert!(matches!(
            err,
            Error::TooManyVertices { requested, limit: MAX_VERTICES } if requested == min_vertices
        ));
    }

    #[test]
    fn vertex_limit_itself_is_allowed() {
        let options = GraphOptions {
            min_vertices: MAX_VERTICES,
            ..GraphOptions::default()
        };
        assert_eq!(build_graph(&[], &options).unwrap().vertex_count(), MAX_VERTICES);
    }

    #[test]
    fn directedness_is_respected() {
        let (edges, _) = read("{\"from\":0,\"to\":1}\n");
        let undirected = build_graph(&edges, &GraphOptions::default()).unwrap();
        let directed = build_graph(
            &edges,
            &GraphOptions {
                directed: true,
                ..GraphOptions::default()
            },
        )
        .unwrap();

        assert!(undirected.has_edge(1, 0).unwrap());
        assert!(!directed.has_edge(1, 0).unwrap());
    }

    #[test]
    fn warning_display_names_the_line() {
        let warning = LoadWarning::InvalidEdge {
            line_number: 3,
            reason: "from vertex -1 is negative".into(),
        };
        assert_eq!(warning.to_string(), "line 3: invalid edge: from vertex -1 is negative");
    }
}
