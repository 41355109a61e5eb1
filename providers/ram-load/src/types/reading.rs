//! Derived memory reading handed to the bar

use serde::{Deserialize, Serialize};

use super::VmCounters;

/// Point-in-time memory summary derived from one refresh
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryReading {
    /// Total physical memory in bytes
    pub total_memory: u64,
    /// Free + speculative memory in bytes
    pub free_memory: u64,
    /// Active + wired + compressed memory in bytes
    pub used_memory: u64,
    /// `floor(used * 100 / total)`, or 0 when total is unknown.
    /// Can exceed 100 since inactive pages are excluded from both buckets.
    pub usage_percent: u32,
    /// Page counters the reading was derived from
    pub counters: VmCounters,
    /// Page size in bytes used for the conversion
    pub page_size: u64,
}
