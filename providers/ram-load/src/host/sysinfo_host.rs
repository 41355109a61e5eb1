//! Portable statistics via the `sysinfo` crate
//!
//! Used where no native page-level backend exists. `sysinfo` only reports
//! byte totals, so counters are expressed in nominal 4 KiB pages: free
//! memory lands in `free`, used memory in `active`, and the remaining
//! categories stay at zero.

use sysinfo::{MemoryRefreshKind, RefreshKind, System};

use crate::error::{ProbeError, ProbeResult};
use crate::types::VmCounters;

use super::HostStatistics;

/// Page size reported by [`SysinfoHost`]
pub const NOMINAL_PAGE_SIZE: u64 = 4096;

/// Statistics endpoint backed by `sysinfo::System`
#[derive(Debug)]
pub struct SysinfoHost {
    system: System,
}

impl SysinfoHost {
    pub fn new() -> Self {
        Self {
            system: System::new_with_specifics(
                RefreshKind::new().with_memory(MemoryRefreshKind::new().with_ram()),
            ),
        }
    }
}

impl Default for SysinfoHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostStatistics for SysinfoHost {
    fn total_memory(&self) -> ProbeResult<u64> {
        match self.system.total_memory() {
            0 => Err(ProbeError::TotalMemoryUnavailable),
            total => Ok(total),
        }
    }

    fn vm_statistics(&mut self) -> ProbeResult<VmCounters> {
        self.system
            .refresh_memory_specifics(MemoryRefreshKind::new().with_ram());

        if self.system.total_memory() == 0 {
            return Err(ProbeError::TotalMemoryUnavailable);
        }

        Ok(VmCounters {
            free: self.system.free_memory() / NOMINAL_PAGE_SIZE,
            active: self.system.used_memory() / NOMINAL_PAGE_SIZE,
            ..Default::default()
        })
    }

    fn page_size(&self) -> ProbeResult<u64> {
        Ok(NOMINAL_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sysinfo_host_reports_memory() {
        let mut host = SysinfoHost::new();
        assert!(host.total_memory().unwrap() > 0);

        let counters = host.vm_statistics().unwrap();
        assert_eq!(counters.inactive, 0);
        assert_eq!(counters.speculative, 0);
        assert!(counters.active > 0);
    }

    #[test]
    fn test_nominal_page_size() {
        let host = SysinfoHost::new();
        assert_eq!(host.page_size().unwrap(), NOMINAL_PAGE_SIZE);
    }
}
