//! Probe error types

use thiserror::Error;

/// Errors raised while querying the operating system for memory statistics
#[derive(Debug, Error)]
pub enum ProbeError {
    /// `host_statistics64` returned something other than `KERN_SUCCESS`
    #[error("could not read memory host statistics (kern_return {code})")]
    HostStatistics { code: i32 },

    /// A sysctl lookup failed
    #[error("sysctl {name} failed: {source}")]
    Sysctl {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The page size query failed or reported zero
    #[error("page size unavailable")]
    PageSize,

    /// `/proc/meminfo` could not be read
    #[error("failed to read /proc/meminfo: {0}")]
    Meminfo(#[from] std::io::Error),

    /// A required `/proc/meminfo` field was missing or malformed
    #[error("missing or malformed /proc/meminfo field: {0}")]
    MeminfoField(&'static str),

    /// The platform reported no physical memory size
    #[error("total physical memory unavailable")]
    TotalMemoryUnavailable,
}

/// Result type for probe operations
pub type ProbeResult<T> = Result<T, ProbeError>;
