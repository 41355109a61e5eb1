//! Arithmetic properties of the derived figures

mod common;

use common::ScriptedHost;
use proptest::prelude::*;
use ram_load::probe::usage_percent;
use ram_load::{MemoryStatsProbe, VmCounters};

fn counters() -> impl Strategy<Value = VmCounters> {
    // Mach reports 32-bit page counts
    let page = 0u64..=u64::from(u32::MAX);
    (
        page.clone(),
        page.clone(),
        page.clone(),
        page.clone(),
        page.clone(),
        page,
    )
        .prop_map(
            |(free, active, inactive, wired, speculative, compressed)| VmCounters {
                free,
                active,
                inactive,
                wired,
                speculative,
                compressed,
            },
        )
}

fn page_size() -> impl Strategy<Value = u64> {
    (9u32..=16).prop_map(|shift| 1u64 << shift)
}

proptest! {
    #[test]
    fn bytes_follow_page_buckets(c in counters(), p in page_size(), total in 0u64..=1 << 40) {
        let host = ScriptedHost::new(Some(total), Some(c), Some(p));
        let mut probe = MemoryStatsProbe::new(host);
        probe.initialize();

        let reading = probe.refresh().unwrap();
        prop_assert_eq!(reading.free_memory, (c.free + c.speculative) * p);
        prop_assert_eq!(reading.used_memory, (c.active + c.wired + c.compressed) * p);
    }

    #[test]
    fn percent_is_truncated_ratio(used in any::<u64>(), total in 1u64..) {
        let expected = (u128::from(used) * 100 / u128::from(total)).min(u128::from(u32::MAX));
        prop_assert_eq!(u128::from(usage_percent(used, total)), expected);
    }

    #[test]
    fn percent_is_zero_without_total(used in any::<u64>()) {
        prop_assert_eq!(usage_percent(used, 0), 0);
    }

    #[test]
    fn percent_bounded_when_used_fits(total in 1u64.., frac in 0u64..=1000) {
        let used = (u128::from(total) * u128::from(frac) / 1000) as u64;
        prop_assert!(usage_percent(used, total) <= 100);
    }

    #[test]
    fn refresh_is_deterministic(c in counters(), p in page_size(), total in any::<u64>()) {
        let host = ScriptedHost::new(Some(total), Some(c), Some(p));
        let mut probe = MemoryStatsProbe::new(host);
        probe.initialize();

        let first = probe.refresh().unwrap();
        let second = probe.refresh().unwrap();
        prop_assert_eq!(first, second);
    }
}
