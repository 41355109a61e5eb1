//! RAM Load Provider
//!
//! Polls memory statistics and prints one reading per tick to stdout.
//! Logs go to stderr.
//!
//! # Usage
//!
//! ```text
//! ram-load                       # text lines every 2s
//! ram-load --format json --once  # single JSON reading
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use ram_load::config::{OutputFormat, RamLoadConfig};
use ram_load::{driver, MemoryStatsProbe};

#[derive(Parser)]
#[command(name = "ram-load")]
#[command(about = "Memory usage event provider for desktop status bars")]
struct Cli {
    /// Milliseconds between refreshes
    #[arg(long, env = "RAM_LOAD_INTERVAL_MS")]
    interval_ms: Option<u64>,

    /// Output line format
    #[arg(long, value_enum, env = "RAM_LOAD_FORMAT")]
    format: Option<OutputFormat>,

    /// Print byte counts as GiB/MiB
    #[arg(long)]
    human: bool,

    /// Print a single reading and exit
    #[arg(long)]
    once: bool,

    /// Config file (defaults to .ram-load.toml discovery)
    #[arg(long, env = "RAM_LOAD_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    provider_common::init_tracing("ram_load")?;

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RamLoadConfig::load_from_path(path)?,
        None => RamLoadConfig::load()?,
    }
    .with_overrides(cli.interval_ms, cli.format, cli.human);

    tracing::info!(
        interval_ms = config.effective_interval_ms(),
        format = ?config.format,
        "Starting ram-load provider"
    );

    let mut probe = MemoryStatsProbe::system();
    let max_ticks = cli.once.then_some(1);
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    let mut stdout = std::io::stdout();
    let emitted = driver::run(&mut probe, &config, max_ticks, &mut stdout, shutdown).await?;

    if cli.once && emitted == 0 {
        anyhow::bail!("could not read memory statistics");
    }

    tracing::info!(readings = emitted, "Provider shutting down");
    Ok(())
}
