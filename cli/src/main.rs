//! CLI entrypoint for Perspective Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod commands;
mod console;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use commands::{Cli, OutputFormat};
use console::ConsoleFormatter;
use council_application::DeliberateUseCase;
use council_infrastructure::{ConfigLoader, JsonSnapshotLoader};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let snapshot_path = match &cli.snapshot {
        Some(path) => path,
        None => bail!("Snapshot file is required. Use --show-config to inspect configuration."),
    };

    info!("Starting Perspective Council");

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    for issue in config.validate() {
        warn!("{}", issue.message);
    }

    let mut params = config.to_params();
    cli.apply_overrides(&mut params);

    // === Dependency Injection ===
    let snapshot = JsonSnapshotLoader::load(snapshot_path)
        .await
        .with_context(|| format!("Failed to load snapshot {}", snapshot_path.display()))?;
    let (catalog, mut input) = snapshot.into_parts(params);
    if !cli.options.is_empty() {
        input.options = cli.options.clone();
    }

    let use_case = DeliberateUseCase::new(Arc::new(catalog))
        .with_policy(Arc::new(config.heuristics.clone()));
    let outcome = use_case.execute(input).await?;

    // Output results
    let output = match cli.output {
        OutputFormat::Json => serde_json::to_string_pretty(&outcome)?,
        OutputFormat::Summary => ConsoleFormatter::format_summary(&outcome),
    };

    println!("{}", output);

    Ok(())
}
