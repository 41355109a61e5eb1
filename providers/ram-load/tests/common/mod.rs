//! Scripted statistics endpoint shared by the integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use ram_load::{HostStatistics, ProbeError, ProbeResult, VmCounters};

/// What the fake host will answer next
#[derive(Debug, Default)]
pub struct HostState {
    pub total: Option<u64>,
    pub counters: Option<VmCounters>,
    pub page_size: Option<u64>,
    pub total_queries: u32,
    pub stats_queries: u32,
    pub page_size_queries: u32,
}

/// Host whose answers can be changed between refreshes through a shared handle
#[derive(Debug, Clone, Default)]
pub struct ScriptedHost {
    state: Rc<RefCell<HostState>>,
}

impl ScriptedHost {
    pub fn new(total: Option<u64>, counters: Option<VmCounters>, page_size: Option<u64>) -> Self {
        let host = Self::default();
        {
            let mut state = host.state.borrow_mut();
            state.total = total;
            state.counters = counters;
            state.page_size = page_size;
        }
        host
    }

    pub fn state(&self) -> std::cell::RefMut<'_, HostState> {
        self.state.borrow_mut()
    }
}

impl HostStatistics for ScriptedHost {
    fn total_memory(&self) -> ProbeResult<u64> {
        let mut state = self.state.borrow_mut();
        state.total_queries += 1;
        state.total.ok_or(ProbeError::TotalMemoryUnavailable)
    }

    fn vm_statistics(&mut self) -> ProbeResult<VmCounters> {
        let mut state = self.state.borrow_mut();
        state.stats_queries += 1;
        state.counters.ok_or(ProbeError::HostStatistics { code: 5 })
    }

    fn page_size(&self) -> ProbeResult<u64> {
        let mut state = self.state.borrow_mut();
        state.page_size_queries += 1;
        state.page_size.ok_or(ProbeError::PageSize)
    }
}

/// Counters from the reference scenario: 1700 used pages, 2100 free pages
pub fn scenario_counters() -> VmCounters {
    VmCounters {
        free: 2000,
        active: 1000,
        inactive: 0,
        wired: 500,
        speculative: 100,
        compressed: 200,
    }
}
