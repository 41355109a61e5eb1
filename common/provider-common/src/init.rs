//! Provider initialization utilities
//!
//! Provides standardized tracing setup for event providers.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging for event providers
///
/// Sets up logging to stderr (stdout is reserved for readings consumed by the bar) with:
/// - Formatted output without ANSI colors (for clean logs)
/// - Environment-based filtering via RUST_LOG
/// - Default log level of `info` for the specified crate
///
/// Set `LOG_FORMAT=json` for structured JSON output.
/// Default is human-readable text output.
///
/// # Arguments
///
/// * `crate_name` - The name of the provider crate (e.g., "ram_load")
pub fn init_tracing(crate_name: &str) -> anyhow::Result<()> {
    let filter = build_filter(crate_name)?;

    let registry = tracing_subscriber::registry().with(filter);

    if use_json_format() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

fn build_filter(crate_name: &str) -> anyhow::Result<EnvFilter> {
    let directive = format!("{}=info", crate_name);
    Ok(EnvFilter::from_default_env().add_directive(directive.parse()?))
}

fn use_json_format() -> bool {
    std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
