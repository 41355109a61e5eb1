//! Polling loop that feeds readings to the bar

use std::future::Future;
use std::io::Write;

use anyhow::{Context, Result};
use provider_common::format_bytes;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::config::{OutputFormat, RamLoadConfig};
use crate::host::HostStatistics;
use crate::probe::MemoryStatsProbe;
use crate::types::MemoryReading;

/// Render a reading as a single output line (without trailing newline)
pub fn render(
    reading: &MemoryReading,
    format: OutputFormat,
    human_readable: bool,
) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string(reading).context("serializing reading"),
        OutputFormat::Text if human_readable => Ok(format!(
            "used_memory=\"{}\" free_memory=\"{}\" total_memory=\"{}\" percentage={}",
            format_bytes(reading.used_memory),
            format_bytes(reading.free_memory),
            format_bytes(reading.total_memory),
            reading.usage_percent,
        )),
        OutputFormat::Text => Ok(format!(
            "used_memory={} free_memory={} total_memory={} percentage={}",
            reading.used_memory, reading.free_memory, reading.total_memory, reading.usage_percent,
        )),
    }
}

/// Refresh `probe` on every tick and write one line per successful reading.
///
/// Ticks never overlap: a slow refresh delays the next tick instead of
/// queueing a burst. Failed refreshes are logged and skipped. Stops when
/// `shutdown` resolves or after `max_ticks` ticks. Returns the number of
/// lines written.
pub async fn run<H, W, F>(
    probe: &mut MemoryStatsProbe<H>,
    config: &RamLoadConfig,
    max_ticks: Option<u64>,
    out: &mut W,
    shutdown: F,
) -> Result<u64>
where
    H: HostStatistics,
    W: Write,
    F: Future<Output = ()>,
{
    let mut ticker = tokio::time::interval(config.interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut ticks = 0u64;
    let mut emitted = 0u64;

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!("Shutdown requested");
                break;
            }
            _ = ticker.tick() => {}
        }

        ticks += 1;
        match probe.refresh() {
            Ok(reading) => {
                let line = render(&reading, config.format, config.human_readable)?;
                writeln!(out, "{}", line).context("writing reading")?;
                out.flush().context("flushing output")?;
                emitted += 1;
            }
            Err(e) => warn!(error = %e, "memory refresh failed"),
        }

        if max_ticks.is_some_and(|max| ticks >= max) {
            break;
        }
    }

    Ok(emitted)
}
