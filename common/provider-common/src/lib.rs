//! Provider Common - Shared utilities for bar event providers
//!
//! This crate provides common functionality used across event providers:
//!
//! - **Initialization**: [`init_tracing`] for stderr logging (stdout carries readings)
//! - **Config**: [`find_config_file`] and [`load_toml`] for `.toml` discovery and parsing
//! - **Formatting**: [`format_bytes`] for human-readable byte counts
//!
//! # Example
//!
//! ```rust,ignore
//! use provider_common::{init_tracing, format_bytes};
//!
//! init_tracing("ram_load")?;
//! println!("{}", format_bytes(8 * 1024 * 1024 * 1024));
//! ```

pub mod config;
pub mod format;
pub mod init;

// Re-export commonly used items at crate root
pub use config::{find_config_file, load_toml};
pub use format::format_bytes;
pub use init::init_tracing;
