//! Trellis CLI binary.

use anyhow::Result;
use trellis::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let config = cli.load_config()?;

    // RUST_LOG wins over the configured level.
    // Example: RUST_LOG=trellis_graph=debug,trellis_events=trace trellis events
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.log_level))
                .unwrap_or_else(|_| EnvFilter::new(trellis::config::DEFAULT_LOG_LEVEL)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = cli.missing_config() {
        tracing::warn!(path = %path.display(), "Config file not found, using defaults");
    }

    tracing::debug!("Starting trellis CLI");
    cli.execute(&config)?;
    tracing::debug!("Trellis CLI completed successfully");
    Ok(())
}
