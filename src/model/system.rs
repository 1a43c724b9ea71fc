//! System-wide memory and CPU snapshots.

use serde::{Deserialize, Serialize};

/// Memory usage from /proc/meminfo.
///
/// Source: `/proc/meminfo`
///
/// All values are in kB as reported by the kernel. Signed, because `used`
/// is derived and is not clamped when the source values disagree.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct MemorySnapshot {
    /// Total usable RAM.
    /// Source: `MemTotal`
    pub total: i64,

    /// `total - free - buffers - cached`.
    pub used: i64,

    /// Kernel estimate of memory available for new allocations.
    /// Source: `MemAvailable`
    pub available: i64,

    /// Memory not in use at all.
    /// Source: `MemFree`
    pub free: i64,

    /// Memory used for block device buffers.
    /// Source: `Buffers`
    pub buffers: i64,

    /// Memory used for the page cache.
    /// Source: `Cached`
    pub cached: i64,
}

impl MemorySnapshot {
    /// Builds a snapshot from the raw fields, deriving `used`.
    pub fn new(total: i64, available: i64, free: i64, buffers: i64, cached: i64) -> Self {
        Self {
            total,
            used: total - free - buffers - cached,
            available,
            free,
            buffers,
            cached,
        }
    }
}

/// Frequency limits of one core.
///
/// Source: `/sys/devices/system/cpu/cpuN/cpufreq/cpuinfo_{min,max}_freq`
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct CoreFrequency {
    /// Core label, `cpu0`, `cpu1`, ...
    pub core: String,

    /// Minimum frequency in kHz. `None` when unavailable and tolerated.
    pub min_freq: Option<u64>,

    /// Maximum frequency in kHz. `None` when unavailable and tolerated.
    pub max_freq: Option<u64>,
}

impl CoreFrequency {
    /// Label of the core at `index`.
    pub fn label(index: usize) -> String {
        format!("cpu{index}")
    }
}

/// CPU description.
///
/// Source: `/proc/cpuinfo` and `/sys/devices/system/cpu/`
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct CpuSnapshot {
    /// Number of `processor` records in `/proc/cpuinfo`.
    pub num_cores: usize,

    /// First `model name` value, empty if absent.
    pub model_name: String,

    /// Aggregate cache size in KB:
    /// `num_cores * (L1i + L1d + L2) + L3`, sampled from core 0.
    pub cache_size: u64,

    /// Mean of the parsed `cpu MHz` readings; `None` when there are none.
    pub cpu_mhz: Option<f64>,

    /// Per-core frequency limits, one entry per core index.
    pub frequency: Vec<CoreFrequency>,
}

/// Aggregate cache size for `num_cores` cores with the given per-level sizes.
///
/// The last-level cache is shared between cores and is counted once.
/// `None` if the total does not fit in a `u64`.
pub fn aggregate_cache_size(
    num_cores: usize,
    l1i: u64,
    l1d: u64,
    l2: u64,
    l3: u64,
) -> Option<u64> {
    let per_core = l1i.checked_add(l1d)?.checked_add(l2)?;
    u64::try_from(num_cores)
        .ok()?
        .checked_mul(per_core)?
        .checked_add(l3)
}
