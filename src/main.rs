use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

use banks_etl::logging;
use banks_etl::{EtlConfig, Pipeline};

#[derive(Parser)]
#[command(name = "banks_etl")]
#[command(about = "Extract, convert and load the largest banks by market capitalization")]
#[command(version = "0.1.0")]
struct Cli {
    /// TOML file overriding the built-in paths and names (defaults to ./banks_etl.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let _guard = logging::init_logging();

    let cli = Cli::parse();
    let config = EtlConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    info!(?config, "Configuration loaded");

    let pipeline = Pipeline::from_config(config)?;
    match pipeline.run() {
        Ok(summary) => {
            info!("Run finished: {} rows, {} office views", summary.rows_loaded, summary.offices.len());
            Ok(())
        }
        Err(e) => {
            error!("ETL run failed: {}", e);
            Err(e.into())
        }
    }
}
