//! Memory usage probe
//!
//! [`MemoryStatsProbe`] owns a statistics endpoint and turns its page
//! counters into the used/free/percent figures shown in the bar.
//!
//! Pages are bucketed the way macOS memory widgets do it:
//!
//! - free = free + speculative
//! - used = active + wired + compressed
//!
//! Inactive pages are reclaimable cache and count toward neither, so
//! `free + used` usually falls short of the total, and `used` can exceed it.

use tracing::{debug, warn};

use crate::error::{ProbeError, ProbeResult};
use crate::host::{HostStatistics, SystemHost};
use crate::types::{MemoryReading, VmCounters};

/// Polls a [`HostStatistics`] endpoint and keeps the latest derived figures
#[derive(Debug)]
pub struct MemoryStatsProbe<H = SystemHost> {
    host: H,
    initialized: bool,
    total_memory: u64,
    counters: VmCounters,
    page_size: u64,
    free_memory: u64,
    used_memory: u64,
    usage_percent: u32,
}

impl MemoryStatsProbe<SystemHost> {
    /// Acquire the current machine's statistics endpoint and initialize the probe
    pub fn system() -> Self {
        let mut probe = Self::new(SystemHost::new());
        probe.initialize();
        probe
    }
}

impl<H: HostStatistics> MemoryStatsProbe<H> {
    /// Wrap a statistics endpoint. All figures read zero until
    /// [`initialize`](Self::initialize) and [`refresh`](Self::refresh) run.
    pub fn new(host: H) -> Self {
        Self {
            host,
            initialized: false,
            total_memory: 0,
            counters: VmCounters::default(),
            page_size: 0,
            free_memory: 0,
            used_memory: 0,
            usage_percent: 0,
        }
    }

    /// Record the machine's total physical memory.
    ///
    /// Failure is not fatal: the total stays at 0 and every later
    /// percentage reads 0. Only the first call queries the host.
    pub fn initialize(&mut self) {
        if self.initialized {
            debug!("probe already initialized");
            return;
        }
        self.initialized = true;

        match self.host.total_memory() {
            Ok(total) => {
                self.total_memory = total;
                debug!(total_memory = total, "probe initialized");
            }
            Err(e) => {
                warn!(error = %e, "could not read total physical memory, usage will read 0");
            }
        }
    }

    /// Query the current page counters and recompute the derived figures.
    ///
    /// On error nothing is updated and the previous figures stay visible.
    pub fn refresh(&mut self) -> ProbeResult<MemoryReading> {
        let counters = self.host.vm_statistics().inspect_err(|e| {
            debug!(error = %e, "vm statistics query failed");
        })?;

        // Re-queried every time rather than cached.
        let page_size = match self.host.page_size() {
            Ok(0) => Err(ProbeError::PageSize),
            other => other,
        }
        .inspect_err(|e| {
            debug!(error = %e, "page size query failed");
        })?;

        self.counters = counters;
        self.page_size = page_size;
        self.free_memory = counters.free_pages().saturating_mul(page_size);
        self.used_memory = counters.used_pages().saturating_mul(page_size);
        self.usage_percent = usage_percent(self.used_memory, self.total_memory);

        debug!(
            used_memory = self.used_memory,
            free_memory = self.free_memory,
            usage_percent = self.usage_percent,
            "memory refreshed"
        );

        Ok(self.reading())
    }

    /// Snapshot of the current figures
    pub fn reading(&self) -> MemoryReading {
        MemoryReading {
            total_memory: self.total_memory,
            free_memory: self.free_memory,
            used_memory: self.used_memory,
            usage_percent: self.usage_percent,
            counters: self.counters,
            page_size: self.page_size,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn total_memory(&self) -> u64 {
        self.total_memory
    }

    pub fn free_memory(&self) -> u64 {
        self.free_memory
    }

    pub fn used_memory(&self) -> u64 {
        self.used_memory
    }

    pub fn usage_percent(&self) -> u32 {
        self.usage_percent
    }

    /// Page counters from the last successful refresh
    pub fn counters(&self) -> &VmCounters {
        &self.counters
    }

    /// Page size from the last successful refresh
    pub fn page_size(&self) -> u64 {
        self.page_size
    }
}

/// `floor(used * 100 / total)`, or 0 when `total` is 0.
///
/// Not clamped: used can exceed total, so values above 100 are possible.
pub fn usage_percent(used: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    let percent = u128::from(used) * 100 / u128::from(total);
    u32::try_from(percent).unwrap_or(u32::MAX)
}
