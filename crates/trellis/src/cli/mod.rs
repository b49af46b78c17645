//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `graph`: load a JSON Lines edge list and run one query on it
//! - `events`: scripted walkthrough of the event dispatcher
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//! - `--config`: YAML configuration file (default `./trellis.yaml`)
//!
//! # Example
//!
//! ```bash
//! trellis graph roads.jsonl --undirected dijkstra --start 0
//! trellis --json graph deps.jsonl --directed topo
//! trellis graph roads.jsonl mst --algorithm prim
//! trellis events --workers 4
//! ```

mod args;
mod execute;
mod validators;

pub use args::{EventsArgs, GraphArgs, GraphQuery, MstArgs, PathArgs, StartArgs};
pub use execute::{MAX_ALL_PAIRS_VERTICES, run_query};

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::TrellisConfig;
use crate::output::{OutputConfig, OutputMode};

/// Trellis - graph algorithms and priority event dispatch
///
/// Runs graph queries over JSON Lines edge lists and demonstrates the
/// priority event dispatcher.
#[derive(Parser, Debug)]
#[command(name = "trellis")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (default: ./trellis.yaml if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run a query on a graph loaded from an edge list
    ///
    /// Lines that are not valid edge records are skipped with a warning on
    /// stderr; the query runs on everything else.
    Graph(GraphArgs),

    /// Walk through the event dispatcher
    ///
    /// Shows priority ordering, the handled short-circuit, handler adapters,
    /// a deferred queue fed from worker threads and guard-based
    /// unsubscription.
    Events(EventsArgs),
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Load the configuration named by `--config`, or `./trellis.yaml`.
    ///
    /// A missing file yields the defaults; see [`Cli::missing_config`].
    pub fn load_config(&self) -> crate::error::Result<TrellisConfig> {
        let path = self
            .config
            .as_deref()
            .unwrap_or_else(|| Path::new(crate::config::CONFIG_FILE_NAME));
        TrellisConfig::load_or_default(path)
    }

    /// The `--config` path, if one was given and does not exist.
    ///
    /// Checked separately from [`Cli::load_config`] because the config is
    /// read before logging is installed.
    pub fn missing_config(&self) -> Option<&Path> {
        self.config.as_deref().filter(|path| !path.exists())
    }

    /// Execute the parsed command
    pub fn execute(&self, config: &TrellisConfig) -> Result<()> {
        let mode = OutputMode::from_flag(self.json || config.output.json);
        let output = OutputConfig::from_env(config.output.color);

        match &self.command {
            Commands::Graph(args) => execute::execute_graph(args, config, mode, &output),
            Commands::Events(args) => execute::execute_events(args, mode, &output),
        }
    }
}
