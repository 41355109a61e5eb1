//! Mach host statistics (macOS)

#![allow(deprecated)]

use std::ffi::CStr;

use crate::error::{ProbeError, ProbeResult};
use crate::types::VmCounters;

use super::HostStatistics;

/// Statistics endpoint backed by the Mach host port
#[derive(Debug)]
pub struct MachHost {
    port: libc::mach_port_t,
}

impl MachHost {
    /// Acquire the host port for the current machine
    pub fn new() -> Self {
        // SAFETY: mach_host_self takes no arguments and always returns the
        // host name port of the calling task.
        let port = unsafe { libc::mach_host_self() };
        Self { port }
    }
}

impl Default for MachHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostStatistics for MachHost {
    fn total_memory(&self) -> ProbeResult<u64> {
        sysctl_u64("hw.memsize", c"hw.memsize")
    }

    fn vm_statistics(&mut self) -> ProbeResult<VmCounters> {
        // SAFETY: vm_statistics64 is a plain C struct of integers.
        let mut stats: libc::vm_statistics64 = unsafe { std::mem::zeroed() };
        let mut count = libc::HOST_VM_INFO64_COUNT;

        // SAFETY: `stats` is large enough for HOST_VM_INFO64_COUNT integers
        // and `count` tells the kernel exactly that.
        let code = unsafe {
            libc::host_statistics64(
                self.port,
                libc::HOST_VM_INFO64,
                &mut stats as *mut libc::vm_statistics64 as libc::host_info64_t,
                &mut count,
            )
        };

        if code != libc::KERN_SUCCESS {
            return Err(ProbeError::HostStatistics { code });
        }

        Ok(VmCounters {
            free: u64::from(stats.free_count),
            active: u64::from(stats.active_count),
            inactive: u64::from(stats.inactive_count),
            wired: u64::from(stats.wire_count),
            speculative: u64::from(stats.speculative_count),
            compressed: u64::from(stats.compressor_page_count),
        })
    }

    fn page_size(&self) -> ProbeResult<u64> {
        match sysctl_u64("hw.pagesize", c"hw.pagesize")? {
            0 => Err(ProbeError::PageSize),
            size => Ok(size),
        }
    }
}

/// Read an integer sysctl, accepting both 32- and 64-bit values
fn sysctl_u64(name: &'static str, key: &CStr) -> ProbeResult<u64> {
    let mut buf = [0u8; 8];
    let mut len: libc::size_t = buf.len();

    // SAFETY: `buf` is writable for `len` bytes and no new value is set.
    let rc = unsafe {
        libc::sysctlbyname(
            key.as_ptr(),
            buf.as_mut_ptr().cast(),
            &mut len,
            std::ptr::null_mut(),
            0,
        )
    };

    if rc != 0 {
        return Err(ProbeError::Sysctl {
            name,
            source: std::io::Error::last_os_error(),
        });
    }

    match len {
        4 => Ok(u64::from(u32::from_ne_bytes([buf[0], buf[1], buf[2], buf[3]]))),
        8 => Ok(u64::from_ne_bytes(buf)),
        _ => Err(ProbeError::Sysctl {
            name,
            source: std::io::Error::from(std::io::ErrorKind::InvalidData),
        }),
    }
}
