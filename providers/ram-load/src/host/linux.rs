//! `/proc/meminfo` statistics (Linux)
//!
//! Linux has no direct equivalent of the Mach page categories, so the
//! meminfo counters are mapped onto them:
//!
//! | category    | meminfo fields                                      |
//! |-------------|-----------------------------------------------------|
//! | free        | `MemFree`                                           |
//! | active      | `Active`                                            |
//! | inactive    | `Inactive`                                          |
//! | wired       | `Unevictable + SUnreclaim + KernelStack + PageTables` |
//! | speculative | none (always 0)                                     |
//! | compressed  | `Zswap`, when the kernel reports it                 |
//!
//! Byte counts are rounded to the nearest whole page.

use std::path::PathBuf;

use sysinfo::{MemoryRefreshKind, RefreshKind, System};

use crate::error::{ProbeError, ProbeResult};
use crate::types::VmCounters;

use super::HostStatistics;

const DEFAULT_MEMINFO: &str = "/proc/meminfo";

/// Statistics endpoint backed by procfs
#[derive(Debug, Clone)]
pub struct ProcMeminfoHost {
    meminfo: PathBuf,
}

impl ProcMeminfoHost {
    pub fn new() -> Self {
        Self::with_path(DEFAULT_MEMINFO)
    }

    /// Read counters from an alternate meminfo file
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            meminfo: path.into(),
        }
    }
}

impl Default for ProcMeminfoHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostStatistics for ProcMeminfoHost {
    fn total_memory(&self) -> ProbeResult<u64> {
        let sys = System::new_with_specifics(
            RefreshKind::new().with_memory(MemoryRefreshKind::new().with_ram()),
        );
        match sys.total_memory() {
            0 => Err(ProbeError::TotalMemoryUnavailable),
            total => Ok(total),
        }
    }

    fn vm_statistics(&mut self) -> ProbeResult<VmCounters> {
        let content = std::fs::read_to_string(&self.meminfo)?;
        parse_meminfo(&content, self.page_size()?)
    }

    fn page_size(&self) -> ProbeResult<u64> {
        // SAFETY: sysconf only reads a configuration value.
        let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
        match u64::try_from(size) {
            Ok(size) if size > 0 => Ok(size),
            _ => Err(ProbeError::PageSize),
        }
    }
}

/// Convert meminfo kB counters into page counts of `page_size` bytes
pub fn parse_meminfo(content: &str, page_size: u64) -> ProbeResult<VmCounters> {
    if page_size == 0 {
        return Err(ProbeError::PageSize);
    }

    let mut free = None;
    let mut active = None;
    let mut inactive = None;
    let mut wired_kb = 0u64;
    let mut zswap_kb = 0u64;

    for line in content.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        match key {
            "MemFree" => free = Some(parse_kb("MemFree", rest)?),
            "Active" => active = Some(parse_kb("Active", rest)?),
            "Inactive" => inactive = Some(parse_kb("Inactive", rest)?),
            "Unevictable" => wired_kb = wired_kb.saturating_add(parse_kb("Unevictable", rest)?),
            "SUnreclaim" => wired_kb = wired_kb.saturating_add(parse_kb("SUnreclaim", rest)?),
            "KernelStack" => wired_kb = wired_kb.saturating_add(parse_kb("KernelStack", rest)?),
            "PageTables" => wired_kb = wired_kb.saturating_add(parse_kb("PageTables", rest)?),
            "Zswap" => zswap_kb = parse_kb("Zswap", rest)?,
            _ => {}
        }
    }

    // Nearest whole page, so sub-page counters are not dropped to zero.
    let pages = |kb: u64| {
        kb.saturating_mul(1024)
            .saturating_add(page_size / 2)
            / page_size
    };

    Ok(VmCounters {
        free: pages(free.ok_or(ProbeError::MeminfoField("MemFree"))?),
        active: pages(active.ok_or(ProbeError::MeminfoField("Active"))?),
        inactive: pages(inactive.ok_or(ProbeError::MeminfoField("Inactive"))?),
        wired: pages(wired_kb),
        speculative: 0,
        compressed: pages(zswap_kb),
    })
}

fn parse_kb(field: &'static str, rest: &str) -> ProbeResult<u64> {
    rest.trim()
        .trim_end_matches("kB")
        .trim()
        .parse::<u64>()
        .map_err(|_| ProbeError::MeminfoField(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
MemTotal:       16318412 kB
MemFree:          800000 kB
MemAvailable:    9000000 kB
Buffers:          123456 kB
Cached:          7000000 kB
Active:          4000000 kB
Inactive:        6000000 kB
Active(anon):    2000000 kB
Inactive(anon):   100000 kB
Unevictable:        4096 kB
Mlocked:            4096 kB
SUnreclaim:       200000 kB
KernelStack:       20000 kB
PageTables:        40000 kB
Zswap:             81920 kB
";

    #[test]
    fn test_parse_meminfo_maps_categories() {
        let counters = parse_meminfo(SAMPLE, 4096).unwrap();
        assert_eq!(counters.free, 800_000 / 4);
        assert_eq!(counters.active, 4_000_000 / 4);
        assert_eq!(counters.inactive, 6_000_000 / 4);
        assert_eq!(counters.wired, (4096 + 200_000 + 20_000 + 40_000) / 4);
        assert_eq!(counters.speculative, 0);
        assert_eq!(counters.compressed, 81920 / 4);
    }

    #[test]
    fn test_parse_meminfo_ignores_anon_split() {
        // "Active(anon)" must not overwrite the "Active" total
        let counters = parse_meminfo(SAMPLE, 1024).unwrap();
        assert_eq!(counters.active, 4_000_000);
    }

    #[test]
    fn test_parse_meminfo_without_zswap() {
        let content = "MemFree: 1024 kB\nActive: 2048 kB\nInactive: 0 kB\n";
        let counters = parse_meminfo(content, 1024).unwrap();
        assert_eq!(counters.compressed, 0);
        assert_eq!(counters.wired, 0);
        assert_eq!(counters.free, 1024);
    }

    #[test]
    fn test_parse_meminfo_missing_field() {
        let content = "MemFree: 1024 kB\nInactive: 0 kB\n";
        let err = parse_meminfo(content, 4096).unwrap_err();
        assert!(matches!(err, ProbeError::MeminfoField("Active")));
    }

    #[test]
    fn test_parse_meminfo_malformed_value() {
        let content = "MemFree: lots kB\nActive: 1 kB\nInactive: 1 kB\n";
        let err = parse_meminfo(content, 4096).unwrap_err();
        assert!(matches!(err, ProbeError::MeminfoField("MemFree")));
    }

    #[test]
    fn test_parse_meminfo_wired_saturates() {
        let content = "MemFree: 1 kB\nActive: 1 kB\nInactive: 1 kB\n\
                       Unevictable: 18446744073709551615 kB\nSUnreclaim: 1 kB\n";
        let counters = parse_meminfo(content, 4096).unwrap();
        assert_eq!(counters.wired, u64::MAX / 4096);
    }

    #[test]
    fn test_parse_meminfo_rounds_to_nearest_page() {
        let content = "MemFree: 7 kB\nActive: 3 kB\nInactive: 1 kB\n";
        let counters = parse_meminfo(content, 4096).unwrap();
        assert_eq!(counters.free, 2);
        assert_eq!(counters.active, 1);
        assert_eq!(counters.inactive, 0);
    }

    #[test]
    fn test_parse_meminfo_zero_page_size() {
        assert!(matches!(
            parse_meminfo(SAMPLE, 0),
            Err(ProbeError::PageSize)
        ));
    }

    #[test]
    fn test_missing_meminfo_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = ProcMeminfoHost::with_path(dir.path().join("meminfo"));
        assert!(matches!(host.vm_statistics(), Err(ProbeError::Meminfo(_))));
    }

    #[test]
    fn test_meminfo_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meminfo");
        std::fs::write(&path, SAMPLE).unwrap();

        let mut host = ProcMeminfoHost::with_path(&path);
        let page_size = host.page_size().unwrap();
        let counters = host.vm_statistics().unwrap();
        assert_eq!(counters.active, (4_000_000 * 1024 + page_size / 2) / page_size);
    }

    #[test]
    fn test_live_host() {
        let mut host = ProcMeminfoHost::new();
        assert!(host.total_memory().unwrap() > 0);
        assert!(host.page_size().unwrap().is_power_of_two());
        assert!(host.vm_statistics().is_ok());
    }
}
