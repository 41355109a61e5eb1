//! Platform statistics endpoints
//!
//! Each backend answers the same three read-only questions: how much
//! physical memory the machine has, how the VM pages are currently
//! distributed, and how large a page is. [`SystemHost`] names the backend
//! for the platform being compiled.

#[cfg(target_os = "macos")]
pub mod darwin;
#[cfg(target_os = "linux")]
pub mod linux;
pub mod sysinfo_host;

use crate::error::ProbeResult;
use crate::types::VmCounters;

/// Read-only access to a machine's memory statistics
pub trait HostStatistics {
    /// Total physical memory in bytes
    fn total_memory(&self) -> ProbeResult<u64>;

    /// Current virtual-memory page counters
    fn vm_statistics(&mut self) -> ProbeResult<VmCounters>;

    /// Bytes per page
    fn page_size(&self) -> ProbeResult<u64>;
}

/// Statistics backend for the current platform
#[cfg(target_os = "macos")]
pub type SystemHost = darwin::MachHost;

/// Statistics backend for the current platform
#[cfg(target_os = "linux")]
pub type SystemHost = linux::ProcMeminfoHost;

/// Statistics backend for the current platform
#[cfg(not(any(target_os = "macos", target_os = "linux")))]
pub type SystemHost = sysinfo_host::SysinfoHost;
