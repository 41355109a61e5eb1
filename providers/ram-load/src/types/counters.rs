//! Raw virtual-memory page counters

use serde::{Deserialize, Serialize};

/// Snapshot of the OS virtual-memory page counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmCounters {
    /// Pages on the free list
    pub free: u64,
    /// Pages in use by running processes
    pub active: u64,
    /// Recently used, reclaimable pages
    pub inactive: u64,
    /// Pinned pages that cannot be paged out
    pub wired: u64,
    /// Pre-fetched pages not yet accessed
    pub speculative: u64,
    /// Pages held by the memory compressor
    pub compressed: u64,
}

impl VmCounters {
    /// Pages counted as free: free + speculative
    pub fn free_pages(&self) -> u64 {
        self.free.saturating_add(self.speculative)
    }

    /// Pages counted as used: active + wired + compressed.
    ///
    /// Inactive pages are reclaimable cache and belong to neither bucket.
    pub fn used_pages(&self) -> u64 {
        self.active
            .saturating_add(self.wired)
            .saturating_add(self.compressed)
    }
}
