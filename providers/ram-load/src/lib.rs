//! RAM Load Provider Library
//!
//! Reads operating-system memory counters and derives the used/free/percent
//! summary shown by a status bar memory widget.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use ram_load::MemoryStatsProbe;
//!
//! let mut probe = MemoryStatsProbe::system();
//! if let Ok(reading) = probe.refresh() {
//!     println!("{}% used", reading.usage_percent);
//! }
//! ```
//!
//! # Usage as Binary
//!
//! Run directly: `ram-load --interval-ms 2000`
//!
//! Each refresh prints one line to stdout:
//! ```text
//! used_memory=6963200 free_memory=8601600 total_memory=16000000000 percentage=0
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod host;
pub mod probe;
pub mod types;

// Re-export main probe type
pub use probe::MemoryStatsProbe;

// Re-export value and error types for direct API usage
pub use error::{ProbeError, ProbeResult};
pub use host::{HostStatistics, SystemHost};
pub use types::{MemoryReading, VmCounters};
