//! Validator Health Probe
//!
//! Answers "is the local validator keeping up?" over HTTP.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────┐
//!                     │                  HEALTH PROBE                     │
//!   GET /health       │  ┌─────────┐    ┌───────────┐    ┌────────────┐  │
//!   ──────────────────┼─▶│  http   │───▶│ evaluator │───▶│  fetcher   │  │
//!                     │  │ server  │    │           │    │ (fan-out)  │  │
//!                     │  └─────────┘    └─────┬─────┘    └─────┬──────┘  │
//!                     │                       │                │ ×N      │
//!                     │               ┌───────┴──────┐   ┌─────▼──────┐  │   local +
//!                     │               │ threshold    │   │ rpc client │──┼─▶ trusted
//!                     │               │ + tracker    │   │ getEpoch.. │  │   nodes
//!                     │               └──────────────┘   └────────────┘  │
//!                     │  ┌────────────────────────────────────────────┐  │
//!                     │  │ config · observability · lifecycle         │  │
//!                     │  └────────────────────────────────────────────┘  │
//!                     └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use validator_health::lifecycle::{resolve_config, startup, Overrides};
use validator_health::observability::logging;

#[derive(Parser)]
#[command(name = "validator-health", version)]
#[command(about = "Liveness probe comparing a validator's height with trusted nodes", long_about = None)]
struct Cli {
    /// TOML configuration file (compiled defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overriding the config file
    #[arg(short, long)]
    bind: Option<String>,

    /// Directory holding the threshold override file
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = resolve_config(
        cli.config.as_deref(),
        Overrides {
            bind_address: cli.bind,
            data_dir: cli.data_dir,
        },
    )?;

    logging::init_logging(&config.observability.log_level);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "validator-health starting");

    startup::run(config).await?;
    Ok(())
}
